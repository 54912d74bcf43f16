//! Error types for artifact emission.

/// Errors that prevent an artifact from being rendered.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Prefix contains characters that are not valid in a CSS custom property name.
    #[error("invalid CSS variable prefix '{prefix}': use ASCII letters, digits, '-' or '_'")]
    InvalidPrefix { prefix: String },

    #[error("CSS selector must not be empty")]
    EmptySelector,

    #[error("token '{path}' flattens to '{name}', which is not a valid CSS custom property name")]
    InvalidName { path: String, name: String },

    /// Two token paths flatten to the same variable name.
    #[error("tokens '{first}' and '{second}' both flatten to '{name}'")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    /// The composed tree could not be serialized for fingerprinting.
    #[error("failed to serialize composed tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for emit operations.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Check a variable-name prefix; the empty prefix is allowed.
pub(crate) fn check_prefix(prefix: &str) -> Result<()> {
    let valid = prefix.chars().all(tokc_core::path::is_name_char);
    if valid && !prefix.starts_with('-') {
        Ok(())
    } else {
        Err(EmitError::InvalidPrefix {
            prefix: prefix.to_string(),
        })
    }
}
