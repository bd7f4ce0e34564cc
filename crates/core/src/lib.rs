//! Shopstand Core - Shared types library.
//!
//! This crate provides common types used across all Shopstand components:
//! - `storefront` - The catalog/cart/order engine
//! - `admin` - Shared-secret gate for order administration
//! - `cli` - Command-line surface driving the engine
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no
//! collaborator traits. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`models`] - Plain data records: products, cart lines, orders, customers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
