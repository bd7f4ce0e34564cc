//! The cart store.
//!
//! A mutable collection of line items with derived totals. Operations here
//! are pure collection manipulation; persistence and analytics side effects
//! live in [`crate::shop::Shop`].
//!
//! Invariants: at most one line per product id, and every retained line has
//! quantity >= 1. A quantity driven to zero removes the line. Operations on
//! a line that does not exist are uniform no-ops.

use rust_decimal::Decimal;

use shopstand_core::{CartLine, Product, ProductId, QuantityDelta};

/// In-memory collection of current, unpurchased line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

/// Outcome of a single-step quantity adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line's quantity went up by one.
    Increased { quantity: u32 },
    /// The line's quantity went down by one and at least one unit remains.
    Decreased { quantity: u32 },
    /// The decrement hit zero and the line was removed.
    Removed { line: CartLine },
    /// No line exists for the product id; nothing changed.
    Missing,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from persisted lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Current lines, in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of the product. Increments the existing line if present,
    /// otherwise pushes a new quantity-1 line snapshotting the product.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity += 1;
            return line.quantity;
        }
        self.lines.push(CartLine::first(product));
        1
    }

    /// Apply a single-step quantity adjustment to the product's line.
    ///
    /// Decrementing a quantity-1 line removes it. A missing line is a no-op
    /// reported as [`QuantityChange::Missing`].
    pub fn change_quantity(&mut self, id: ProductId, delta: QuantityDelta) -> QuantityChange {
        let Some(index) = self.lines.iter().position(|line| line.product_id == id) else {
            return QuantityChange::Missing;
        };

        match delta {
            QuantityDelta::Increment => {
                let line = &mut self.lines[index];
                line.quantity += 1;
                QuantityChange::Increased {
                    quantity: line.quantity,
                }
            }
            QuantityDelta::Decrement => {
                if self.lines[index].quantity > 1 {
                    let line = &mut self.lines[index];
                    line.quantity -= 1;
                    QuantityChange::Decreased {
                        quantity: line.quantity,
                    }
                } else {
                    QuantityChange::Removed {
                        line: self.lines.remove(index),
                    }
                }
            }
        }
    }

    /// Remove the product's line unconditionally. Returns the removed line,
    /// or `None` when no line existed (a no-op).
    pub fn remove(&mut self, id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.product_id == id)?;
        Some(self.lines.remove(index))
    }

    /// Sum of price times quantity across all lines. Recomputed fresh on
    /// every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across all lines (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Remove every line (checkout completion).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use shopstand_core::Price;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents),
            image_url: String::new(),
            category: "Electronics".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn test_add_deduplicates_by_product_id() {
        let mut cart = CartStore::new();
        let p = product(1, 7999);

        assert_eq!(cart.add(&p), 1);
        assert_eq!(cart.add(&p), 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 7999));
        cart.add(&product(1, 7999));
        cart.add(&product(2, 19999));

        assert_eq!(cart.total(), Decimal::new(35997, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = CartStore::new();
        let p = product(1, 7999);
        cart.add(&p);
        cart.add(&p);

        let change = cart.change_quantity(p.id, QuantityDelta::Decrement);
        assert_eq!(change, QuantityChange::Decreased { quantity: 1 });
        assert_eq!(cart.total(), Decimal::new(7999, 2));

        let change = cart.change_quantity(p.id, QuantityDelta::Decrement);
        assert!(matches!(change, QuantityChange::Removed { .. }));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_quantity_never_below_one_while_retained() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 100));
        cart.change_quantity(ProductId::new(1), QuantityDelta::Increment);
        cart.change_quantity(ProductId::new(1), QuantityDelta::Decrement);

        for line in cart.lines() {
            assert!(line.quantity >= 1);
        }
    }

    #[test]
    fn test_change_quantity_missing_line_is_noop() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 100));
        let before = cart.clone();

        let change = cart.change_quantity(ProductId::new(9), QuantityDelta::Increment);
        assert_eq!(change, QuantityChange::Missing);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 100));
        let before = cart.clone();

        assert!(cart.remove(ProductId::new(9)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_returns_line_with_quantity() {
        let mut cart = CartStore::new();
        let p = product(3, 4999);
        cart.add(&p);
        cart.add(&p);

        let removed = cart.remove(p.id).unwrap();
        assert_eq!(removed.quantity, 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 100));
        cart.add(&product(2, 200));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
