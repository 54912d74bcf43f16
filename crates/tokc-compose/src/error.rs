//! Compose pipeline errors.

use thiserror::Error;
use tokc_load::LoadError;

/// Errors that abort a compose run.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid namespace rule pattern '{pattern}': {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "strict mode: {errors} validation errors, {unvalidated} unvalidated sources, {references} reference problems"
    )]
    StrictViolation {
        errors: usize,
        /// Sources merged without schema validation.
        unvalidated: usize,
        references: usize,
    },
}
