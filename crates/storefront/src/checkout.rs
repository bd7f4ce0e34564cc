//! Checkout form validation.
//!
//! The form carries the nine required customer/payment fields. Validation
//! collects every empty field rather than stopping at the first, then parses
//! the email, and only a fully valid form becomes a [`CustomerRecord`]. The
//! card fields are captured but never validated or transmitted.

use thiserror::Error;

use shopstand_core::{CustomerRecord, Email, EmailError};

/// The raw checkout form as collected by the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub card_number: String,
    pub card_name: String,
    pub expiry: String,
    pub cvv: String,
}

/// A required checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Address,
    City,
    Zip,
    CardNumber,
    CardName,
    Expiry,
    Cvv,
}

impl FormField {
    /// The field's name as shown to the user.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::City => "city",
            Self::Zip => "zip",
            Self::CardNumber => "card number",
            Self::CardName => "cardholder name",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Checkout form validation failure. The operation that surfaced it has
/// performed no state change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("required fields are empty: {}", format_fields(.0))]
    MissingFields(Vec<FormField>),

    /// The email field is non-empty but not a usable address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

fn format_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CheckoutForm {
    /// Validate the form into a [`CustomerRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming every empty
    /// required field, or [`ValidationError::InvalidEmail`] when all fields
    /// are present but the email does not parse.
    pub fn validate(&self) -> Result<CustomerRecord, ValidationError> {
        let required = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Address, &self.address),
            (FormField::City, &self.city),
            (FormField::Zip, &self.zip),
            (FormField::CardNumber, &self.card_number),
            (FormField::CardName, &self.card_name),
            (FormField::Expiry, &self.expiry),
            (FormField::Cvv, &self.cvv),
        ];

        let missing: Vec<FormField> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let email = Email::parse(self.email.trim())?;

        Ok(CustomerRecord {
            name: self.name.clone(),
            email,
            address: self.address.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
            card_number: self.card_number.clone(),
            card_name: self.card_name.clone(),
            expiry: self.expiry.clone(),
            cvv: self.cvv.clone(),
        })
    }
}
