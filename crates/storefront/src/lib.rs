//! Shopstand Storefront - the catalog/cart/order engine.
//!
//! This crate implements the storefront behavior as a library: a seeded
//! product catalog, a mutable cart, an append-only order log, the validated
//! atomic checkout flow, and the navigation contract. Everything runs on the
//! caller's thread; there is no server, no database, and no async. State is
//! persisted through the [`storage::KvStore`] seam and user actions are
//! reported through the [`analytics::AnalyticsSink`] seam, both supplied once
//! when the [`shop::Shop`] is opened.
//!
//! # Architecture
//!
//! - [`catalog`] - Immutable seeded product list
//! - [`cart`] - Cart store: pure line-item collection operations
//! - [`orders`] - Order store: append-only log with admin-mutable status
//! - [`checkout`] - Checkout form validation
//! - [`shop`] - The orchestrating service: every operation with side effects
//! - [`storage`] - Key-value persistence seam (memory and JSON-file backed)
//! - [`analytics`] - Fire-and-forget event sink seam
//! - [`views`] - Navigation contract and the rendering seam
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod shop;
pub mod storage;
pub mod views;

pub use error::{CheckoutError, StoreError};
pub use shop::Shop;
