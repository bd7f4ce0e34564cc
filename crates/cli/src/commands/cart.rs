//! Cart inspection and mutation.

#![allow(clippy::print_stdout)] // user-facing command output

use shopstand_core::{ProductId, QuantityDelta};
use shopstand_storefront::shop::Shop;
use shopstand_storefront::views::{CartView, View};

/// Print the cart with line totals and the subtotal.
pub fn show(shop: &mut Shop) {
    shop.navigate_to(View::Cart);

    let view = CartView::from(shop.cart());
    if view.items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in &view.items {
        println!(
            "{:<4} {:<22} {:>3} x {:>8} = {:>9}",
            item.product_id, item.name, item.quantity, item.price, item.line_price,
        );
    }
    println!("Total: {} ({} items)", view.subtotal, view.item_count);
}

/// Add one unit of a product.
///
/// # Errors
///
/// Fails when the product id is not in the catalog.
pub fn add(shop: &mut Shop, product_id: i32) -> Result<(), Box<dyn std::error::Error>> {
    shop.add_to_cart(ProductId::new(product_id))?;
    println!("Added product {product_id}. Cart now holds {} items.", shop.cart_badge());
    Ok(())
}

/// Increment a line's quantity. No-op when the line does not exist.
pub fn increment(shop: &mut Shop, product_id: i32) {
    shop.change_quantity(ProductId::new(product_id), QuantityDelta::Increment);
    println!("Cart now holds {} items.", shop.cart_badge());
}

/// Decrement a line's quantity; the line disappears at zero.
pub fn decrement(shop: &mut Shop, product_id: i32) {
    shop.change_quantity(ProductId::new(product_id), QuantityDelta::Decrement);
    println!("Cart now holds {} items.", shop.cart_badge());
}

/// Remove a line entirely. No-op when the line does not exist.
pub fn remove(shop: &mut Shop, product_id: i32) {
    shop.remove_from_cart(ProductId::new(product_id));
    println!("Cart now holds {} items.", shop.cart_badge());
}
