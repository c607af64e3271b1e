pub const MAX_IDENTITY_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Identity is empty")]
    EmptyIdentity,
    #[error("Identity exceeds maximum length of {MAX_IDENTITY_LENGTH}")]
    IdentityTooLong,
    #[error("Identity has surrounding whitespace")]
    UntrimmedIdentity,
}

/// Admin and voter identities are opaque, but the tables store at most
/// `MAX_IDENTITY_LENGTH` characters.
pub fn validate_identity(auth: &str) -> Result<(), ValidationError> {
    if auth.is_empty() { return Err(ValidationError::EmptyIdentity); }
    if auth.trim() != auth { return Err(ValidationError::UntrimmedIdentity); }
    if auth.chars().count() > MAX_IDENTITY_LENGTH { return Err(ValidationError::IdentityTooLong); }
    Ok(())
}
