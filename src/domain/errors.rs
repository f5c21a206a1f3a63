use thiserror::Error;

/// Service-level error taxonomy. Infrastructure errors are converted into
/// `Unavailable` or `Internal` before they cross this boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid {field} format: {value}")]
    InvalidId { field: &'static str, value: String },
    #[error("{0}")]
    Validation(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn product_not_found(id: &str) -> Self {
        DomainError::NotFound(format!("Product with ID {} not found", id))
    }

    pub fn order_not_found(id: &str) -> Self {
        DomainError::NotFound(format!("Order with ID {} not found", id))
    }
}
