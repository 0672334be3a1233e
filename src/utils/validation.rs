//! Validation of values that end up in file names.

/// Maximum length of a partition key embedded in an output file name
pub const MAX_KEY_LENGTH: usize = 200;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty partition key")]
    EmptyKey,
    #[error("Partition key too long: exceeds {MAX_KEY_LENGTH} characters")]
    KeyTooLong,
    #[error("Invalid partition key '{0}': contains path separators or control characters")]
    InvalidKey(String),
}

/// Check that a partition key can be embedded in a file name.
///
/// Chromosome names such as `HLA-A*01:01:01:01` are legal, but anything that
/// would escape the output directory (`/`, `\`, `..`) or that contains control
/// characters is rejected.
///
/// # Examples
///
/// ```
/// use varsift::utils::validation::validate_partition_key;
///
/// assert!(validate_partition_key("19").is_ok());
/// assert!(validate_partition_key("HLA-A*01:01").is_ok());
/// assert!(validate_partition_key("../etc").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyKey`, `ValidationError::KeyTooLong` or
/// `ValidationError::InvalidKey` accordingly.
pub fn validate_partition_key(key: &str) -> Result<(), ValidationError> {
    if key.trim().is_empty() {
        return Err(ValidationError::EmptyKey);
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(ValidationError::KeyTooLong);
    }

    if key.contains("..")
        || key.contains('/')
        || key.contains('\\')
        || key.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidKey(key.escape_debug().to_string()));
    }

    Ok(())
}
