//! Shopstand Admin - shared-secret gate for order management.
//!
//! The admin surface of the storefront is a single privileged operation:
//! mutating an order's status. This crate provides the gate in front of it.
//! Callers authorize once per action against a configured shared secret and
//! receive an [`AdminToken`] witnessing the check, then invoke the
//! storefront's status mutation.
//!
//! This is a placeholder access-control mechanism, not a security boundary:
//! one plaintext secret, no sessions, no lockout, no hashing.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod gate;

pub use gate::{AdminError, AdminGate, AdminToken};
