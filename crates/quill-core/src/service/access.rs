//! Shared-secret gate for write operations.

use crate::error::DomainError;

/// The configured admin API key.
///
/// An unset key rejects every caller.
#[derive(Clone, Default)]
pub struct AdminKey(Option<String>);

impl AdminKey {
    pub fn new(key: Option<String>) -> Self {
        Self(key)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Compare the caller-supplied key byte-for-byte with the configured one.
    pub fn verify(&self, provided: Option<&[u8]>) -> Result<(), DomainError> {
        match (&self.0, provided) {
            (Some(expected), Some(provided)) if expected.as_bytes() == provided => Ok(()),
            _ => Err(DomainError::Unauthorized),
        }
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AdminKey")
            .field(&self.0.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_key_passes() {
        let key = AdminKey::new(Some("s3cret".to_string()));
        assert!(key.verify(Some(b"s3cret")).is_ok());
    }

    #[test]
    fn test_mismatch_and_missing_are_rejected() {
        let key = AdminKey::new(Some("s3cret".to_string()));
        assert!(matches!(key.verify(Some(b"S3CRET")), Err(DomainError::Unauthorized)));
        assert!(matches!(key.verify(Some(b"s3cret ")), Err(DomainError::Unauthorized)));
        assert!(matches!(key.verify(None), Err(DomainError::Unauthorized)));
    }

    #[test]
    fn test_unconfigured_key_rejects_everything() {
        let key = AdminKey::new(None);
        assert!(!key.is_configured());
        assert!(matches!(key.verify(Some(b"")), Err(DomainError::Unauthorized)));
        assert!(matches!(key.verify(None), Err(DomainError::Unauthorized)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = AdminKey::new(Some("s3cret".to_string()));
        assert!(!format!("{key:?}").contains("s3cret"));
    }
}
