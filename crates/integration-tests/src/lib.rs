//! Shared helpers for the Shopstand scenario tests.
//!
//! The tests exercise the engine end to end: seeded catalog, in-memory or
//! file-backed persistence, and a recording analytics sink whose clones
//! share one buffer so assertions can run after the shop consumed its copy.

#![cfg_attr(not(test), forbid(unsafe_code))]

use shopstand_storefront::analytics::RecordingSink;
use shopstand_storefront::catalog::Catalog;
use shopstand_storefront::checkout::CheckoutForm;
use shopstand_storefront::shop::Shop;
use shopstand_storefront::storage::MemoryStore;

/// A shop over a seeded catalog with shared-handle collaborators.
pub struct TestContext {
    pub shop: Shop,
    pub sink: RecordingSink,
    pub kv: MemoryStore,
}

impl TestContext {
    /// Fresh shop with empty in-memory persistence.
    #[must_use]
    pub fn new() -> Self {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let shop =
            Shop::open_headless(Catalog::seed(), Box::new(kv.clone()), Box::new(sink.clone()));
        Self { shop, sink, kv }
    }

    /// Reopen a shop over existing persistence, with a fresh sink.
    #[must_use]
    pub fn reopen(kv: &MemoryStore) -> Self {
        let sink = RecordingSink::new();
        let shop =
            Shop::open_headless(Catalog::seed(), Box::new(kv.clone()), Box::new(sink.clone()));
        Self {
            shop,
            sink,
            kv: kv.clone(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully filled checkout form.
#[must_use]
pub fn filled_form(email: &str) -> CheckoutForm {
    CheckoutForm {
        name: "Jane Doe".to_string(),
        email: email.to_string(),
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        zip: "12345".to_string(),
        card_number: "4242424242424242".to_string(),
        card_name: "Jane Doe".to_string(),
        expiry: "12/29".to_string(),
        cvv: "123".to_string(),
    }
}
