//! Cart line item record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::types::{Price, ProductId};

/// One product entry in the cart.
///
/// Product fields are snapshotted at add time, so a line is not affected by
/// later catalog changes. Invariants maintained by the cart store: at most
/// one line per product id, and `quantity >= 1` while the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub category: String,
    pub quantity: u32,
}

impl CartLine {
    /// Create a quantity-1 line snapshotting the given product.
    #[must_use]
    pub fn first(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}
