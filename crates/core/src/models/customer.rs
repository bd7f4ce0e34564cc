//! Customer record captured by the checkout form.

use serde::{Deserialize, Serialize};

use crate::types::Email;

/// The customer and payment details captured at checkout.
///
/// Known defect carried over from the source system: the raw card fields are
/// stored verbatim inside the order record. They are redacted from `Debug`
/// output so they never reach logs, but a production system must not persist
/// them at all.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub card_number: String,
    pub card_name: String,
    pub expiry: String,
    pub cvv: String,
}

impl std::fmt::Debug for CustomerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("zip", &self.zip)
            .field("card_number", &"[REDACTED]")
            .field("card_name", &self.card_name)
            .field("expiry", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}
