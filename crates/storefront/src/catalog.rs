//! The product catalog.
//!
//! Read-only input to the cart. Seeded once at startup; products are never
//! mutated or deleted afterward.

use shopstand_core::{Price, Product, ProductId};

/// Static, read-only list of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list (used by tests and
    /// embedders with their own inventory).
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn seed() -> Self {
        let seed = [
            (1, "Wireless Headphones", 79_99, "photo-1505740420928-5e560c06d30e", "Electronics", 15),
            (2, "Smart Watch", 199_99, "photo-1523275335684-37898b6baf30", "Electronics", 8),
            (3, "Laptop Backpack", 49_99, "photo-1553062407-98eeb64c6a62", "Accessories", 20),
            (4, "USB-C Hub", 34_99, "photo-1625948515291-69613efd103f", "Electronics", 12),
            (5, "Desk Lamp", 29_99, "photo-1507473885765-e6ed057f782c", "Home", 25),
            (6, "Bluetooth Speaker", 59_99, "photo-1608043152269-423dbba4e7e1", "Electronics", 10),
        ];

        Self::new(
            seed.into_iter()
                .map(|(id, name, cents, photo, category, stock)| Product {
                    id: ProductId::new(id),
                    name: name.to_string(),
                    price: Price::from_cents(cents),
                    image_url: format!("https://images.unsplash.com/{photo}?w=400"),
                    category: category.to_string(),
                    stock,
                })
                .collect(),
        )
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products, in seed order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_seed_catalog() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 6);

        let headphones = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(headphones.name, "Wireless Headphones");
        assert_eq!(headphones.price.amount, Decimal::new(7999, 2));
        assert_eq!(headphones.category, "Electronics");
        assert_eq!(headphones.stock, 15);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let catalog = Catalog::seed();
        for product in catalog.all() {
            assert_eq!(catalog.get(product.id).unwrap().id, product.id);
        }
    }

    #[test]
    fn test_get_unknown_id() {
        assert!(Catalog::seed().get(ProductId::new(99)).is_none());
    }
}
