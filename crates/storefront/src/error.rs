//! Engine-level error types.
//!
//! Lookup misses are typed errors rather than panics, and checkout failures
//! are guaranteed to leave every store untouched. Persistence and analytics
//! failures never appear here: both collaborators are best-effort and their
//! errors are logged and swallowed at the call site.

use thiserror::Error;

use shopstand_core::{OrderId, ProductId};

use crate::checkout::ValidationError;

/// Store operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The product id is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The order id is not in the order log.
    #[error("unknown order: {0}")]
    UnknownOrder(OrderId),
}

/// Checkout flow errors. Any of these aborts the checkout with no state
/// change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The form failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cart has no lines to convert into an order.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}
