//! Discount value object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A percentage discount in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Discount {
    percentage: Decimal,
}

impl Discount {
    /// Create a discount, rejecting percentages outside `[0, 100]`.
    pub fn new(percentage: Decimal) -> Result<Self, ValidationError> {
        if percentage < Decimal::ZERO || percentage > Decimal::from(100) {
            return Err(ValidationError::DiscountOutOfRange { percentage });
        }
        Ok(Self { percentage })
    }

    /// A zero discount.
    pub fn none() -> Self {
        Self {
            percentage: Decimal::ZERO,
        }
    }

    pub fn percentage(&self) -> Decimal {
        self.percentage
    }

    /// Whether this discount actually reduces the price.
    pub fn is_active(&self) -> bool {
        self.percentage > Decimal::ZERO
    }
}
