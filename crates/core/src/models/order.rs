//! Finalized order record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CartLine, CustomerRecord};
use crate::types::{OrderId, OrderStatus};

/// A finalized purchase.
///
/// `line_items` is a copy of the cart at checkout time, decoupled from the
/// live cart. `total` is computed once at creation and never recomputed, so
/// it does not reflect later catalog price changes. `status` is the only
/// field mutated after creation, and only through the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub line_items: Vec<CartLine>,
    pub total: Decimal,
    pub customer: CustomerRecord,
    pub status: OrderStatus,
}

impl Order {
    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|line| line.quantity).sum()
    }

    /// Display string for the success view summary (e.g., `$234.98`).
    #[must_use]
    pub fn total_display(&self) -> String {
        format!("${:.2}", self.total)
    }
}
