//! Checkout command.

#![allow(clippy::print_stdout)] // user-facing command output

use clap::Args;

use shopstand_storefront::checkout::CheckoutForm;
use shopstand_storefront::shop::Shop;
use shopstand_storefront::views::View;

/// Checkout form fields. All nine are required by the engine; empty values
/// are reported together in the validation error.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub zip: String,
    #[arg(long, default_value = "")]
    pub card_number: String,
    #[arg(long, default_value = "")]
    pub card_name: String,
    #[arg(long, default_value = "")]
    pub expiry: String,
    #[arg(long, default_value = "")]
    pub cvv: String,
}

impl CheckoutArgs {
    fn to_form(&self) -> CheckoutForm {
        CheckoutForm {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
            card_number: self.card_number.clone(),
            card_name: self.card_name.clone(),
            expiry: self.expiry.clone(),
            cvv: self.cvv.clone(),
        }
    }
}

/// Validate the form and convert the cart into an order.
///
/// # Errors
///
/// Fails when validation rejects the form or the cart is empty; the cart
/// and order log are untouched in either case.
pub fn run(shop: &mut Shop, args: &CheckoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    shop.navigate_to(View::Checkout);

    let order = shop.checkout(&args.to_form())?;

    shop.navigate_to(View::Success);
    println!("Order placed!");
    println!("  Order ID: {}", order.id);
    println!("  Total:    {}", order.total_display());
    Ok(())
}
