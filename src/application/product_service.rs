use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, ProductFilter, ProductSummary};
use crate::pagination::{self, PageMeta};

#[derive(Clone)]
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_product(&self, product: NewProduct) -> Result<Uuid, DomainError> {
        product.validate()?;
        self.repo.insert(product)
    }

    pub fn get_product(&self, raw_id: &str) -> Result<ProductSummary, DomainError> {
        let id = parse_product_id(raw_id)?;
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::product_not_found(raw_id))
    }

    /// Filtered, paginated catalog listing in ascending-id order. The page
    /// descriptor is computed from a count over the same filter.
    pub fn list_products(
        &self,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductSummary>, PageMeta), DomainError> {
        let (limit, offset) = pagination::clamp(limit, offset);
        let page = self.repo.list(filter, limit, offset)?;
        let meta = pagination::page_meta(limit, offset, page.total_count);
        Ok((page.products, meta))
    }
}

fn parse_product_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidId {
        field: "product ID",
        value: raw.to_string(),
    })
}
