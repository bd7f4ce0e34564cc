//! Plain data records shared across Shopstand components.
//!
//! These are serde-serializable value types with no behavior beyond small
//! derived accessors. All mutation lives in the storefront engine's stores.

pub mod cart;
pub mod customer;
pub mod order;
pub mod product;

pub use cart::CartLine;
pub use customer::CustomerRecord;
pub use order::Order;
pub use product::Product;
