//! Catalog browsing.

#![allow(clippy::print_stdout)] // user-facing command output

use shopstand_storefront::shop::Shop;
use shopstand_storefront::views::View;

/// Print the product catalog in seed order.
pub fn list(shop: &mut Shop) {
    shop.navigate_to(View::Products);

    println!("{:<4} {:<22} {:>9} {:<13} {:>5}", "ID", "NAME", "PRICE", "CATEGORY", "STOCK");
    for product in shop.catalog().all() {
        println!(
            "{:<4} {:<22} {:>9} {:<13} {:>5}",
            product.id,
            product.name,
            product.price.display(),
            product.category,
            product.stock,
        );
    }
}
