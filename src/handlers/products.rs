use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::product::{NewProduct, ProductFilter, ProductSummary, SizeEntry};
use crate::errors::AppError;
use crate::pagination::{self, PageMeta};
use crate::CatalogService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct SizeRequest {
    pub size: String,
    pub quantity: i32,
}

/// Price as it arrives on the wire: either `"19.99"` or `19.99`.
///
/// Accepting the bare number keeps older clients working; both forms go
/// through the same `BigDecimal` parse so `19.999` fails validation
/// identically either way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(serde_json::Number),
}

impl PriceField {
    fn into_raw(self) -> String {
        match self {
            PriceField::Text(s) => s,
            PriceField::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    /// Decimal price, e.g. "19.99"; a JSON number is accepted too.
    #[schema(value_type = String)]
    pub price: PriceField,
    pub sizes: Vec<SizeRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    pub name: Option<String>,
    pub size: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    pagination::DEFAULT_LIMIT
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListProductsResponse {
    pub data: Vec<ProductResponse>,
    pub page: PageMeta,
}

fn product_response(product: ProductSummary) -> ProductResponse {
    ProductResponse {
        id: product.id.to_string(),
        name: product.name,
        price: product.price.to_string(),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /products/
#[utoipa::path(
    post,
    path = "/products/",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = CreatedResponse),
        (status = 422, description = "Validation error"),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product(
    svc: web::Data<CatalogService>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let raw_price = body.price.into_raw();
    let price = BigDecimal::from_str(&raw_price).map_err(|_| {
        AppError::Validation(format!("Invalid price '{}': not a decimal number", raw_price))
    })?;
    let product = NewProduct {
        name: body.name,
        price,
        sizes: body
            .sizes
            .into_iter()
            .map(|s| SizeEntry {
                label: s.size,
                quantity: s.quantity,
            })
            .collect(),
    };

    let svc = svc.into_inner();
    let id = web::block(move || svc.create_product(product))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": id.to_string() })))
}

/// GET /products/
#[utoipa::path(
    get,
    path = "/products/",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring match on the product name"),
        ("size" = Option<String>, Query, description = "Only products with this exact size label"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 10, max 100)"),
        ("offset" = Option<i64>, Query, description = "Number of items to skip"),
    ),
    responses(
        (status = 200, description = "Paginated list of products", body = ListProductsResponse),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(
    svc: web::Data<CatalogService>,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let filter = ProductFilter {
        name: params.name,
        size: params.size,
    };

    let svc = svc.into_inner();
    let (products, page) =
        web::block(move || svc.list_products(&filter, params.limit, params.offset))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListProductsResponse {
        data: products.into_iter().map(product_response).collect(),
        page,
    }))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn get_product(
    svc: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let svc = svc.into_inner();
    let product = web::block(move || svc.get_product(&id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(product_response(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_price(body: &str) -> String {
        let req: CreateProductRequest = serde_json::from_str(body).unwrap();
        req.price.into_raw()
    }

    #[test]
    fn price_accepted_as_string() {
        let raw = parse_price(r#"{"name":"Tee","price":"19.99","sizes":[]}"#);
        assert_eq!(BigDecimal::from_str(&raw).unwrap().to_string(), "19.99");
    }

    #[test]
    fn price_accepted_as_number() {
        let raw = parse_price(r#"{"name":"Tee","price":19.99,"sizes":[]}"#);
        assert_eq!(BigDecimal::from_str(&raw).unwrap().to_string(), "19.99");
    }

    #[test]
    fn string_and_number_prices_parse_identically() {
        let from_string = parse_price(r#"{"name":"Tee","price":"10.50","sizes":[]}"#);
        let from_number = parse_price(r#"{"name":"Tee","price":10.50,"sizes":[]}"#);
        assert_eq!(
            BigDecimal::from_str(&from_string).unwrap(),
            BigDecimal::from_str(&from_number).unwrap()
        );
    }

    #[test]
    fn non_decimal_price_string_fails_bigdecimal_parse() {
        let raw = parse_price(r#"{"name":"Tee","price":"cheap","sizes":[]}"#);
        assert!(BigDecimal::from_str(&raw).is_err());
    }
}
