pub mod order_service;
pub mod product_service;

#[cfg(test)]
pub(crate) mod testing;

pub use order_service::OrderService;
pub use product_service::ProductService;
