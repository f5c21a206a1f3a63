use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::order::{OrderItemInput, OrderView};
use crate::errors::AppError;
use crate::pagination::{self, PageMeta};
use crate::OrderingService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub qty: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailsResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    #[serde(rename = "productDetails")]
    pub product_details: ProductDetailsResponse,
    pub qty: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total: String,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    pagination::DEFAULT_LIMIT
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub data: Vec<OrderResponse>,
    pub page: PageMeta,
}

fn order_response(order: OrderView) -> OrderResponse {
    OrderResponse {
        id: order.id.to_string(),
        user_id: order.user_id,
        items: order
            .items
            .into_iter()
            .map(|item| OrderItemResponse {
                product_details: ProductDetailsResponse {
                    id: item.product.id,
                    name: item.product.name,
                },
                qty: item.qty,
            })
            .collect(),
        total: order.total.to_string(),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders/
///
/// Every referenced product is resolved before anything is written, so a
/// missing product leaves no partial order behind.
#[utoipa::path(
    post,
    path = "/orders/",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = CreatedOrderResponse),
        (status = 404, description = "A referenced product does not exist"),
        (status = 422, description = "Validation error"),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    svc: web::Data<OrderingService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let items: Vec<OrderItemInput> = body
        .items
        .into_iter()
        .map(|i| OrderItemInput {
            product_id: i.product_id,
            qty: i.qty,
        })
        .collect();

    let svc = svc.into_inner();
    let id = web::block(move || svc.create_order(&body.user_id, items))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": id.to_string() })))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedOrderResponse {
    pub id: String,
}

/// GET /orders/order/{id}
#[utoipa::path(
    get,
    path = "/orders/order/{id}",
    params(
        ("id" = String, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, description = "Malformed order ID"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    svc: web::Data<OrderingService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let svc = svc.into_inner();
    let order = web::block(move || svc.get_order(&id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(order_response(order)))
}

/// GET /orders/{userId}
#[utoipa::path(
    get,
    path = "/orders/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID to list orders for"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 10, max 100)"),
        ("offset" = Option<i64>, Query, description = "Number of items to skip"),
    ),
    responses(
        (status = 200, description = "Paginated list of the user's orders", body = ListOrdersResponse),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders_by_user(
    svc: web::Data<OrderingService>,
    path: web::Path<String>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let params = query.into_inner();

    let svc = svc.into_inner();
    let (orders, page) =
        web::block(move || svc.list_orders_by_user(&user_id, params.limit, params.offset))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        data: orders.into_iter().map(order_response).collect(),
        page,
    }))
}
