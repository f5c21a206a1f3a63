//! In-memory repository fakes for service-level tests.

use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderListPage, OrderRecord};
use crate::domain::ports::{OrderRepository, ProductRepository};
use crate::domain::product::{
    NewProduct, ProductFilter, ProductPage, ProductSummary, SizeEntry,
};

struct StoredProduct {
    summary: ProductSummary,
    sizes: Vec<SizeEntry>,
}

#[derive(Clone)]
pub struct FakeProductRepository {
    store: Arc<Mutex<Vec<StoredProduct>>>,
}

impl FakeProductRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Insert bypassing validation, for test setup.
    pub fn seed(&self, product: NewProduct) -> Result<Uuid, DomainError> {
        self.insert(product)
    }

    /// Simulate an out-of-band product deletion (there is no delete
    /// operation in the API).
    pub fn remove(&self, id: Uuid) {
        self.store
            .lock()
            .unwrap()
            .retain(|p| p.summary.id != id);
    }
}

impl ProductRepository for FakeProductRepository {
    fn insert(&self, product: NewProduct) -> Result<Uuid, DomainError> {
        let id = Uuid::now_v7();
        self.store.lock().unwrap().push(StoredProduct {
            summary: ProductSummary {
                id,
                name: product.name,
                price: product.price,
            },
            sizes: product.sizes,
        });
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductSummary>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.summary.id == id)
            .map(|p| p.summary.clone()))
    }

    fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<ProductPage, DomainError> {
        let store = self.store.lock().unwrap();
        let mut matching: Vec<&StoredProduct> = store
            .iter()
            .filter(|p| {
                let name_ok = filter.name.as_ref().map_or(true, |n| {
                    p.summary.name.to_lowercase().contains(&n.to_lowercase())
                });
                let size_ok = filter
                    .size
                    .as_ref()
                    .map_or(true, |s| p.sizes.iter().any(|e| &e.label == s));
                name_ok && size_ok
            })
            .collect();
        matching.sort_by_key(|p| p.summary.id);

        let total_count = matching.len() as i64;
        let products = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| p.summary.clone())
            .collect();
        Ok(ProductPage {
            products,
            total_count,
        })
    }

    fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<ProductSummary>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.summary.id))
            .map(|p| p.summary.clone())
            .collect())
    }
}

#[derive(Clone)]
pub struct FakeOrderRepository {
    store: Arc<Mutex<Vec<OrderRecord>>>,
}

impl FakeOrderRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn count(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    pub fn seed_for_user(&self, user_id: &str, total: BigDecimal) -> Uuid {
        let id = Uuid::now_v7();
        self.store.lock().unwrap().push(OrderRecord {
            id,
            user_id: user_id.to_string(),
            items: Vec::new(),
            total,
            created_at: Utc::now(),
        });
        id
    }
}

impl OrderRepository for FakeOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let id = Uuid::now_v7();
        self.store.lock().unwrap().push(OrderRecord {
            id,
            user_id: order.user_id,
            items: order.items,
            total: order.total,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderRecord>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn list_by_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<OrderListPage, DomainError> {
        let store = self.store.lock().unwrap();
        let mut matching: Vec<&OrderRecord> =
            store.iter().filter(|o| o.user_id == user_id).collect();
        matching.sort_by_key(|o| o.id);

        let total_count = matching.len() as i64;
        let orders = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(OrderListPage {
            orders,
            total_count,
        })
    }
}
