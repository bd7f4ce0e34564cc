//! Navigation contract and the rendering seam.
//!
//! Exactly one view is active at a time. Navigation is pure routing: it does
//! not enforce business rules (entering checkout with an empty cart is
//! allowed). Rendering itself is an external collaborator invoked after
//! every mutating operation and on every navigation.

use shopstand_core::ProductId;

use crate::cart::CartStore;

/// The storefront screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Products,
    Cart,
    Checkout,
    Success,
    Orders,
}

impl View {
    /// Stable name used in page-view analytics events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Success => "success",
            Self::Orders => "orders",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rendering collaborator. Assumed synchronous and always succeeding; the
/// engine never inspects an outcome.
pub trait Renderer {
    /// Redraw the given view from current store state.
    fn render(&self, view: View);
}

/// Renderer that draws nothing. The default for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _view: View) {}
}

/// Cart line display data for the rendering layer and page-view events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for the rendering layer and page-view events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// An empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    price: line.price.display(),
                    line_price: format!("${:.2}", line.line_total()),
                })
                .collect(),
            subtotal: format!("${:.2}", cart.total()),
            item_count: cart.item_count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use shopstand_core::{Price, Product};

    #[test]
    fn test_view_names() {
        assert_eq!(View::Products.name(), "products");
        assert_eq!(View::Orders.to_string(), "orders");
    }

    #[test]
    fn test_cart_view_from_store() {
        let mut cart = CartStore::new();
        let product = Product {
            id: ProductId::new(2),
            name: "Smart Watch".to_string(),
            price: Price::from_cents(19999),
            image_url: String::new(),
            category: "Electronics".to_string(),
            stock: 8,
        };
        cart.add(&product);
        cart.add(&product);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "$399.98");
        assert_eq!(view.items[0].price, "$199.99");
        assert_eq!(view.items[0].line_price, "$399.98");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert_eq!(view.subtotal, "$0.00");
        assert!(view.items.is_empty());
    }
}
