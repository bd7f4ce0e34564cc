//! Status and delta enums.
//!
//! Both are deliberately closed variants: an order status that is not one of
//! the four lifecycle states, or a quantity delta other than plus or minus
//! one, is rejected at the type boundary instead of being accepted as a raw
//! string or integer.

use serde::{Deserialize, Serialize};

/// Order lifecycle status, mutable only through the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Initial status of every order created at checkout.
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order. Used by dropdown-style surfaces.
    pub const ALL: [Self; 4] = [
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid order status: {0}")]
pub struct InvalidOrderStatus(pub String);

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidOrderStatus(s.to_string())),
        }
    }
}

/// A single-step cart quantity adjustment.
///
/// The cart only ever moves one unit at a time, so the delta is a closed
/// variant rather than an unconstrained integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityDelta {
    Increment,
    Decrement,
}

impl QuantityDelta {
    /// The signed step this delta applies to a quantity.
    #[must_use]
    pub const fn step(&self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}
