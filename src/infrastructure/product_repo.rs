use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, ProductFilter, ProductPage, ProductSummary};
use crate::schema::{product_sizes, products};

use super::models::{NewProductRow, NewProductSizeRow, ProductSummaryRow};

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Build the filtered catalog query. Called once for the count and once
    /// for the page so both see the same filter.
    fn filtered(filter: &ProductFilter) -> products::BoxedQuery<'static, Pg> {
        let mut query = products::table.into_boxed();
        if let Some(name) = &filter.name {
            let pattern = format!("%{}%", escape_like(name));
            query = query.filter(products::name.ilike(pattern));
        }
        if let Some(size) = &filter.size {
            query = query.filter(exists(
                product_sizes::table
                    .filter(product_sizes::product_id.eq(products::id))
                    .filter(product_sizes::label.eq(size.clone())),
            ));
        }
        query
    }
}

/// Escape ILIKE metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl ProductRepository for DieselProductRepository {
    fn insert(&self, product: NewProduct) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let product_id = Uuid::now_v7();
            diesel::insert_into(products::table)
                .values(&NewProductRow {
                    id: product_id,
                    name: product.name,
                    price: product.price,
                })
                .execute(conn)?;

            let size_rows: Vec<NewProductSizeRow> = product
                .sizes
                .into_iter()
                .enumerate()
                .map(|(i, entry)| NewProductSizeRow {
                    id: Uuid::now_v7(),
                    product_id,
                    label: entry.label,
                    quantity: entry.quantity,
                    position: i as i32,
                })
                .collect();
            diesel::insert_into(product_sizes::table)
                .values(&size_rows)
                .execute(conn)?;

            Ok(product_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::id.eq(id))
            .select(ProductSummaryRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(summary_from_row))
    }

    fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<ProductPage, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total_count: i64 = Self::filtered(filter).count().get_result(conn)?;

            let rows = Self::filtered(filter)
                .select(ProductSummaryRow::as_select())
                .order(products::id.asc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ProductPage {
                products: rows.into_iter().map(summary_from_row).collect(),
                total_count,
            })
        })
    }

    fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<ProductSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::id.eq_any(ids))
            .select(ProductSummaryRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(summary_from_row).collect())
    }
}

fn summary_from_row(row: ProductSummaryRow) -> ProductSummary {
    ProductSummary {
        id: row.id,
        name: row.name,
        price: row.price,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::product::SizeEntry;
    use crate::infrastructure::test_support::setup_db;

    fn new_product(name: &str, price: &str, labels: &[&str]) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            sizes: labels
                .iter()
                .map(|l| SizeEntry {
                    label: l.to_string(),
                    quantity: 5,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_id_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let id = repo
            .insert(new_product("T-Shirt", "19.99", &["S", "M"]))
            .expect("insert failed");

        let found = repo
            .find_by_id(id)
            .expect("find failed")
            .expect("product should exist");
        assert_eq!(found.id, id);
        assert_eq!(found.name, "T-Shirt");
        assert_eq!(found.price, BigDecimal::from_str("19.99").unwrap());
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let result = repo.find_by_id(Uuid::now_v7()).expect("find should not error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_filters_by_name_case_insensitively() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.insert(new_product("Blue Hoodie", "30.00", &["M"]))
            .expect("insert failed");
        repo.insert(new_product("Red Shirt", "20.00", &["M"]))
            .expect("insert failed");

        let filter = ProductFilter {
            name: Some("HOOD".to_string()),
            size: None,
        };
        let page = repo.list(&filter, 10, 0).expect("list failed");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.products[0].name, "Blue Hoodie");
    }

    #[tokio::test]
    async fn list_name_filter_treats_percent_literally() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.insert(new_product("100% Cotton Tee", "15.00", &["M"]))
            .expect("insert failed");
        repo.insert(new_product("Linen Tee", "18.00", &["M"]))
            .expect("insert failed");

        let filter = ProductFilter {
            name: Some("100%".to_string()),
            size: None,
        };
        let page = repo.list(&filter, 10, 0).expect("list failed");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.products[0].name, "100% Cotton Tee");
    }

    #[tokio::test]
    async fn list_filters_by_exact_size_label() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.insert(new_product("Jacket", "50.00", &["XL"]))
            .expect("insert failed");
        repo.insert(new_product("Shirt", "20.00", &["S", "M"]))
            .expect("insert failed");

        let filter = ProductFilter {
            name: None,
            size: Some("XL".to_string()),
        };
        let page = repo.list(&filter, 10, 0).expect("list failed");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.products[0].name, "Jacket");
    }

    #[tokio::test]
    async fn list_pages_in_ascending_id_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(
                repo.insert(new_product(&format!("Item {}", i), "1.00", &["M"]))
                    .expect("insert failed"),
            );
        }
        ids.sort();

        let filter = ProductFilter::default();
        let page1 = repo.list(&filter, 3, 0).expect("list failed");
        let page2 = repo.list(&filter, 3, 3).expect("list failed");
        assert_eq!(page1.total_count, 5);
        assert_eq!(page1.products.len(), 3);
        assert_eq!(page2.products.len(), 2);

        let seen: Vec<Uuid> = page1
            .products
            .iter()
            .chain(page2.products.iter())
            .map(|p| p.id)
            .collect();
        assert_eq!(seen, ids);
    }

    #[tokio::test]
    async fn find_summaries_returns_only_existing_ids() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        let a = repo
            .insert(new_product("A", "10.00", &["M"]))
            .expect("insert failed");
        let missing = Uuid::now_v7();

        let summaries = repo.find_summaries(&[a, missing]).expect("lookup failed");
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, a);
    }
}
