//! Catalog product record.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// An immutable catalog product, seeded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Reference to the product image (a URL in the seed catalog).
    pub image_url: String,
    pub category: String,
    /// Units in stock. Informational only; the cart does not reserve stock.
    pub stock: u32,
}
