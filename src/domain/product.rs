use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use super::errors::DomainError;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_SIZE_LABEL_CHARS: usize = 10;
pub const MAX_SIZE_QUANTITY: i32 = 10_000;
pub const MAX_SIZE_ENTRIES: usize = 50;

/// One stock entry of a product, e.g. `{size: "M", quantity: 12}`.
/// Entry order is preserved but sizes are never surfaced in API views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub label: String,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: BigDecimal,
    pub sizes: Vec<SizeEntry>,
}

impl NewProduct {
    /// Field constraints for product creation. Violations map to 422.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name_chars = self.name.chars().count();
        if name_chars == 0 || name_chars > MAX_NAME_CHARS {
            return Err(DomainError::Validation(format!(
                "name must be between 1 and {} characters",
                MAX_NAME_CHARS
            )));
        }
        if self.price <= BigDecimal::zero() {
            return Err(DomainError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        // Trailing zeros are not significant: "10.50" has one fractional digit.
        if self.price.normalized().fractional_digit_count() > 2 {
            return Err(DomainError::Validation(
                "price must have at most 2 decimal places".to_string(),
            ));
        }
        if self.sizes.is_empty() || self.sizes.len() > MAX_SIZE_ENTRIES {
            return Err(DomainError::Validation(format!(
                "sizes must contain between 1 and {} entries",
                MAX_SIZE_ENTRIES
            )));
        }
        for entry in &self.sizes {
            let label_chars = entry.label.chars().count();
            if label_chars == 0 || label_chars > MAX_SIZE_LABEL_CHARS {
                return Err(DomainError::Validation(format!(
                    "size label must be between 1 and {} characters",
                    MAX_SIZE_LABEL_CHARS
                )));
            }
            if entry.quantity < 0 || entry.quantity > MAX_SIZE_QUANTITY {
                return Err(DomainError::Validation(format!(
                    "size quantity must be between 0 and {}",
                    MAX_SIZE_QUANTITY
                )));
            }
        }
        Ok(())
    }
}

/// The minimal projection used by every product view: sizes are
/// intentionally omitted from single-item and list responses.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Restrict to products with at least one size entry of this exact label.
    pub size: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub total_count: i64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn product(name: &str, price: &str, sizes: Vec<SizeEntry>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            sizes,
        }
    }

    fn one_size() -> Vec<SizeEntry> {
        vec![SizeEntry {
            label: "M".to_string(),
            quantity: 5,
        }]
    }

    #[test]
    fn valid_product_passes() {
        assert!(product("T-Shirt", "19.99", one_size()).validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            product("", "19.99", one_size()).validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn name_longer_than_200_chars_is_rejected() {
        let name = "x".repeat(201);
        assert!(product(&name, "19.99", one_size()).validate().is_err());
    }

    #[test]
    fn name_of_exactly_200_chars_passes() {
        let name = "x".repeat(200);
        assert!(product(&name, "19.99", one_size()).validate().is_ok());
    }

    #[test]
    fn zero_price_is_rejected() {
        assert!(product("Shirt", "0", one_size()).validate().is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(product("Shirt", "-1.00", one_size()).validate().is_err());
    }

    #[test]
    fn price_with_three_decimal_places_is_rejected() {
        assert!(product("Shirt", "9.999", one_size()).validate().is_err());
    }

    #[test]
    fn price_with_insignificant_trailing_zeros_passes() {
        // 9.9900 is numerically two decimal places.
        assert!(product("Shirt", "9.9900", one_size()).validate().is_ok());
    }

    #[test]
    fn empty_sizes_are_rejected() {
        assert!(product("Shirt", "9.99", vec![]).validate().is_err());
    }

    #[test]
    fn more_than_50_sizes_are_rejected() {
        let sizes = (0..51)
            .map(|i| SizeEntry {
                label: format!("S{}", i),
                quantity: 1,
            })
            .collect();
        assert!(product("Shirt", "9.99", sizes).validate().is_err());
    }

    #[test]
    fn size_label_longer_than_10_chars_is_rejected() {
        let sizes = vec![SizeEntry {
            label: "x".repeat(11),
            quantity: 1,
        }];
        assert!(product("Shirt", "9.99", sizes).validate().is_err());
    }

    #[test]
    fn negative_size_quantity_is_rejected() {
        let sizes = vec![SizeEntry {
            label: "M".to_string(),
            quantity: -1,
        }];
        assert!(product("Shirt", "9.99", sizes).validate().is_err());
    }

    #[test]
    fn size_quantity_above_10000_is_rejected() {
        let sizes = vec![SizeEntry {
            label: "M".to_string(),
            quantity: 10_001,
        }];
        assert!(product("Shirt", "9.99", sizes).validate().is_err());
    }

    #[test]
    fn zero_size_quantity_passes() {
        let sizes = vec![SizeEntry {
            label: "M".to_string(),
            quantity: 0,
        }];
        assert!(product("Shirt", "9.99", sizes).validate().is_ok());
    }
}
