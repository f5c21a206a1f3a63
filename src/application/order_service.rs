use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    self, NewOrder, OrderItem, OrderItemInput, OrderItemView, OrderRecord, OrderView,
    ProductDetails, MISSING_PRODUCT_NAME,
};
use crate::domain::ports::{OrderRepository, ProductRepository};
use crate::domain::product::ProductSummary;
use crate::pagination::{self, PageMeta};

/// Every order is currently recorded against this fixed user; the
/// caller-supplied userId is ignored. Preserved observable behavior of the
/// existing API, see DESIGN.md before changing it.
const ORDER_USER_ID: &str = "user_1";

#[derive(Clone)]
pub struct OrderService<P, O> {
    products: P,
    orders: O,
}

impl<P: ProductRepository, O: OrderRepository> OrderService<P, O> {
    pub fn new(products: P, orders: O) -> Self {
        Self { products, orders }
    }

    /// Create an order in two strictly separated phases: resolve every
    /// referenced product (reads only, snapshotting current prices and
    /// computing the total), then perform a single store write. A failed
    /// resolution persists nothing.
    ///
    /// There is no transaction spanning both phases: a product deleted or
    /// repriced between resolve and write still ends up in the order with
    /// the snapshotted price. Accepted weak-consistency policy.
    pub fn create_order(
        &self,
        user_id: &str,
        items: Vec<OrderItemInput>,
    ) -> Result<Uuid, DomainError> {
        order::validate_user_id(user_id)?;
        order::validate_items(&items)?;

        let resolved = self.resolve_items(&items)?;
        let total = order::order_total(&resolved);

        self.orders.insert(NewOrder {
            user_id: ORDER_USER_ID.to_string(),
            items: resolved,
            total,
        })
    }

    pub fn get_order(&self, raw_id: &str) -> Result<OrderView, DomainError> {
        let id = Uuid::parse_str(raw_id).map_err(|_| DomainError::InvalidId {
            field: "order ID",
            value: raw_id.to_string(),
        })?;
        let record = self
            .orders
            .find_by_id(id)?
            .ok_or_else(|| DomainError::order_not_found(raw_id))?;

        let mut views = self.attach_product_details(vec![record])?;
        Ok(views.remove(0))
    }

    /// Paginated listing of one user's orders in ascending-id order, each
    /// order carrying the same product-name join as `get_order`.
    pub fn list_orders_by_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderView>, PageMeta), DomainError> {
        let (limit, offset) = pagination::clamp(limit, offset);
        let page = self.orders.list_by_user(user_id, limit, offset)?;
        let meta = pagination::page_meta(limit, offset, page.total_count);
        let views = self.attach_product_details(page.orders)?;
        Ok((views, meta))
    }

    /// Resolution phase of order creation. Malformed product ids are
    /// reported as not-found, matching the API's historical behavior.
    fn resolve_items(&self, items: &[OrderItemInput]) -> Result<Vec<OrderItem>, DomainError> {
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let id = Uuid::parse_str(&item.product_id)
                .map_err(|_| DomainError::product_not_found(&item.product_id))?;
            ids.push(id);
        }

        let prices = self.fetch_summaries(&ids)?;

        items
            .iter()
            .zip(&ids)
            .map(|(item, id)| {
                let product = prices
                    .get(id)
                    .ok_or_else(|| DomainError::product_not_found(&item.product_id))?;
                Ok(OrderItem {
                    product_id: *id,
                    qty: item.qty,
                    price: product.price.clone(),
                })
            })
            .collect()
    }

    /// Read-time join: one batched lookup covering every distinct product
    /// referenced by the given orders. Items whose product has vanished get
    /// a placeholder name instead of failing the read.
    fn attach_product_details(
        &self,
        records: Vec<OrderRecord>,
    ) -> Result<Vec<OrderView>, DomainError> {
        let ids: Vec<Uuid> = records
            .iter()
            .flat_map(|o| o.items.iter().map(|i| i.product_id))
            .collect();
        let names = self.fetch_summaries(&ids)?;

        Ok(records
            .into_iter()
            .map(|record| {
                let items = record
                    .items
                    .into_iter()
                    .map(|item| {
                        let product = match names.get(&item.product_id) {
                            Some(p) => ProductDetails {
                                id: p.id.to_string(),
                                name: p.name.clone(),
                            },
                            None => {
                                log::warn!(
                                    "Product {} not found for order {}",
                                    item.product_id,
                                    record.id
                                );
                                ProductDetails {
                                    id: item.product_id.to_string(),
                                    name: MISSING_PRODUCT_NAME.to_string(),
                                }
                            }
                        };
                        OrderItemView {
                            product,
                            qty: item.qty,
                        }
                    })
                    .collect();
                OrderView {
                    id: record.id,
                    user_id: record.user_id,
                    items,
                    total: record.total,
                }
            })
            .collect())
    }

    fn fetch_summaries(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, ProductSummary>, DomainError> {
        let mut distinct = ids.to_vec();
        distinct.sort();
        distinct.dedup();
        if distinct.is_empty() {
            return Ok(HashMap::new());
        }
        let summaries = self.products.find_summaries(&distinct)?;
        Ok(summaries.into_iter().map(|p| (p.id, p)).collect())
    }
}
