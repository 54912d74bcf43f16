//! Artifact emitters for tokc.
//!
//! Consumes a composed token tree and renders:
//! - a stylesheet of CSS custom properties ([`emit_css`]),
//! - a TypeScript module with the closed set of token paths ([`emit_typescript`]),
//! - a provenance header fingerprinting the tree both were rendered from.

pub mod css;
pub mod error;
pub mod format;
pub mod header;
pub mod paths;

pub use css::{
    emit_css, flatten, render_value, CssOptions, Declaration, Flattened, SkipReason, Skipped,
};
pub use error::{EmitError, Result};
pub use format::format_number;
pub use header::Fingerprint;
pub use paths::{check_var_names, collect_token_paths, emit_typescript, TypeScriptOptions};
