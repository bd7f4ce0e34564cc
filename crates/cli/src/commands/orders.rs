//! Order browsing and administration.

#![allow(clippy::print_stdout)] // user-facing command output

use shopstand_admin::AdminGate;
use shopstand_core::{OrderId, OrderStatus};
use shopstand_storefront::config::StoreConfig;
use shopstand_storefront::error::StoreError;
use shopstand_storefront::shop::Shop;
use shopstand_storefront::views::View;

/// List all orders, oldest first.
pub fn list(shop: &mut Shop) {
    shop.navigate_to(View::Orders);

    if !shop.has_orders() {
        println!("No orders yet.");
        return;
    }

    for order in shop.orders().list() {
        println!(
            "{:<20} {:<12} {:>9}  {}",
            order.id,
            order.status,
            order.total_display(),
            order.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
}

/// Show one order with its line items.
///
/// # Errors
///
/// Fails when the order id is not in the log.
pub fn show(shop: &mut Shop, order_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = OrderId::from_token(order_id);
    let order = shop
        .orders()
        .get(&id)
        .ok_or(StoreError::UnknownOrder(id.clone()))?
        .clone();

    println!("{} ({})", order.id, order.status);
    println!("  Placed:   {}", order.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Customer: {} <{}>", order.customer.name, order.customer.email);
    for line in &order.line_items {
        println!(
            "  {:<22} {:>3} x {:>8} = ${:.2}",
            line.name,
            line.quantity,
            line.price.display(),
            line.line_total(),
        );
    }
    println!("  Total:    {}", order.total_display());
    Ok(())
}

/// Change an order's status after the admin gate grants the attempt.
///
/// # Errors
///
/// Fails when the secret is denied, the status string is not one of the
/// four lifecycle values, or the order id is not in the log.
pub fn set_status(
    shop: &mut Shop,
    config: &StoreConfig,
    order_id: &str,
    status: &str,
    secret: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let gate = AdminGate::new(config.admin_secret.clone());
    let _token = gate.authorize(secret)?;

    let status: OrderStatus = status.parse()?;
    let change = shop.set_order_status(&OrderId::from_token(order_id), status)?;

    println!("{}: {} -> {}", change.order_id, change.from, change.to);
    Ok(())
}
