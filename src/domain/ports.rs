use uuid::Uuid;

use super::errors::DomainError;
use super::order::{NewOrder, OrderListPage, OrderRecord};
use super::product::{NewProduct, ProductFilter, ProductPage, ProductSummary};

pub trait ProductRepository: Send + Sync + 'static {
    fn insert(&self, product: NewProduct) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductSummary>, DomainError>;
    fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<ProductPage, DomainError>;
    /// Batch lookup for order resolution and order-read joins: one query
    /// covering all distinct referenced ids. Missing ids are simply absent
    /// from the result.
    fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<ProductSummary>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn insert(&self, order: NewOrder) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderRecord>, DomainError>;
    fn list_by_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<OrderListPage, DomainError>;
}
