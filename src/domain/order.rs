use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

pub const MAX_ORDER_ITEMS: usize = 100;
pub const MAX_ITEM_QTY: i32 = 1_000;
pub const MAX_USER_ID_CHARS: usize = 100;

/// Display name attached to an order item whose product no longer exists.
/// Orders must stay readable even when referenced products are gone.
pub const MISSING_PRODUCT_NAME: &str = "Product Not Available";

/// An order line as submitted by the client: the product reference is the
/// raw string from the request so that resolution can report malformed ids
/// the same way as unknown ones.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: String,
    pub qty: i32,
}

/// An order line after product resolution, carrying the price snapshot
/// taken at creation time. Also the shape of a stored line on read.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub qty: i32,
    pub price: BigDecimal,
}

/// An order ready to be persisted: resolution is complete, the total is
/// computed, and a single store write remains.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
}

/// Product details joined onto an order item at read time. The id stays a
/// string because a missing product is represented by its stored reference.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product: ProductDetails,
    pub qty: i32,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: String,
    pub items: Vec<OrderItemView>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderListPage {
    pub orders: Vec<OrderRecord>,
    pub total_count: i64,
}

pub fn validate_user_id(user_id: &str) -> Result<(), DomainError> {
    let chars = user_id.chars().count();
    if chars == 0 || chars > MAX_USER_ID_CHARS {
        return Err(DomainError::Validation(format!(
            "userId must be between 1 and {} characters",
            MAX_USER_ID_CHARS
        )));
    }
    Ok(())
}

pub fn validate_items(items: &[OrderItemInput]) -> Result<(), DomainError> {
    if items.is_empty() || items.len() > MAX_ORDER_ITEMS {
        return Err(DomainError::Validation(format!(
            "items must contain between 1 and {} entries",
            MAX_ORDER_ITEMS
        )));
    }
    for item in items {
        if item.qty < 1 || item.qty > MAX_ITEM_QTY {
            return Err(DomainError::Validation(format!(
                "item qty must be between 1 and {}",
                MAX_ITEM_QTY
            )));
        }
    }
    Ok(())
}

/// Sum of `price * qty` over all items, rounded half-up to 2 decimals.
///
/// Half-up is the documented rounding rule for order totals. With valid
/// catalog prices (at most 2 decimal places) the sum never actually needs
/// rounding, but the rule is pinned down so a midpoint is unambiguous.
pub fn order_total(items: &[OrderItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| {
            acc + &item.price * BigDecimal::from(item.qty)
        })
        .with_scale_round(2, RoundingMode::HalfUp)
}
