//! The admin gate.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Admin authorization errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminError {
    /// The supplied secret does not match.
    #[error("admin access denied")]
    Denied,
}

/// Witness that an admin secret check succeeded.
///
/// Only [`AdminGate::authorize`] constructs one. There is no session
/// concept: each privileged action authorizes again.
#[derive(Debug)]
pub struct AdminToken(());

/// Single shared-secret check gating order-status mutation.
///
/// Implements `Debug` manually to redact the secret.
pub struct AdminGate {
    secret: SecretString,
}

impl AdminGate {
    /// Create a gate around the configured shared secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Compare an attempt against the shared secret.
    ///
    /// No rate limiting and no lockout; a denial is logged and the caller
    /// may simply try again.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Denied`] when the attempt does not match.
    pub fn authorize(&self, attempt: &str) -> Result<AdminToken, AdminError> {
        if attempt == self.secret.expose_secret() {
            Ok(AdminToken(()))
        } else {
            tracing::warn!("admin authorization denied");
            Err(AdminError::Denied)
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
