//! Admin code check for posting and deleting

use tracing::warn;

use crate::error::AccessError;

/// Guards mutating announcement operations behind a shared code
#[derive(Debug, Clone)]
pub struct AdminGate {
    code: String,
}

impl AdminGate {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Check an entered code
    ///
    /// `None` means the prompt was dismissed. The comparison is exact.
    pub fn authorize(&self, entered: Option<&str>) -> Result<(), AccessError> {
        match entered {
            None => Err(AccessError::Cancelled),
            Some(code) if code == self.code => Ok(()),
            Some(_) => {
                warn!("Rejected admin code");
                Err(AccessError::Denied)
            }
        }
    }
}
