//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Order IDs are
//! time-based string tokens and get their own dedicated type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use shopstand_core::define_id;
/// define_id!(ProductId);
///
/// let product_id = ProductId::new(1);
/// assert_eq!(product_id.as_i32(), 1);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);

/// An order identifier.
///
/// Generated as `ORD-<epoch-millis>` at checkout time. Generation from a
/// timestamp is deterministic, so the order log is responsible for
/// disambiguating when two checkouts land on the same millisecond (the
/// millisecond value is bumped until the token is unused). Orders are always
/// addressed by this ID, never by their position in the order log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Token prefix for generated order IDs.
    pub const PREFIX: &'static str = "ORD-";

    /// Generate an order ID from a creation timestamp.
    #[must_use]
    pub fn generate(at: DateTime<Utc>) -> Self {
        Self::from_millis(at.timestamp_millis())
    }

    /// Build the token for an explicit millisecond value.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{}{millis}", Self::PREFIX))
    }

    /// Wrap an existing token (e.g., read back from persistence or a CLI
    /// argument).
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_product_id_roundtrip() {
        let id = ProductId::new(4);
        assert_eq!(id.as_i32(), 4);
        assert_eq!(i32::from(id), 4);
        assert_eq!(ProductId::from(4), id);
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new(2);
        assert_eq!(serde_json::to_string(&id).unwrap(), "2");
    }

    #[test]
    fn test_order_id_format() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = OrderId::generate(at);
        assert_eq!(id.as_str(), "ORD-1700000000123");
    }

    #[test]
    fn test_generation_is_deterministic_per_millisecond() {
        let at = Utc.timestamp_millis_opt(42).unwrap();
        assert_eq!(OrderId::generate(at), OrderId::generate(at));
        assert_eq!(OrderId::generate(at), OrderId::from_millis(42));
    }

    #[test]
    fn test_order_id_display() {
        let id = OrderId::from_token("ORD-99");
        assert_eq!(format!("{id}"), "ORD-99");
    }
}
