use crate::errors::{Error, Result};

/// Shared household PIN checked on every mutating request.
///
/// The secret is compared in plaintext. It keeps casual visitors from editing
/// the list; it is not an authentication boundary.
#[derive(Debug, Clone, Default)]
pub struct PinGuard {
    secret: Option<String>,
}

impl PinGuard {
    /// An empty or whitespace-only secret disables the guard.
    pub fn new(secret: Option<String>) -> Self {
        let secret = secret.filter(|s| !s.trim().is_empty());
        Self { secret }
    }

    pub fn disabled() -> Self {
        Self { secret: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Allows the request when the guard is disabled or the supplied PIN
    /// equals the configured secret exactly.
    pub fn check(&self, supplied: Option<&str>) -> Result<()> {
        match (&self.secret, supplied) {
            (None, _) => Ok(()),
            (Some(secret), Some(pin)) if pin == secret => Ok(()),
            _ => Err(Error::Unauthorized("PIN required".to_string())),
        }
    }
}
