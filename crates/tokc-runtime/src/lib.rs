//! Render-time counterpart of the tokc pipeline.
//!
//! Pure functions with no I/O and no logging: [`TokenResolver`] merges
//! default, document and inline sources into one custom-property table, and
//! the guards in [`guard`] keep untrusted values out of class and variable
//! names.

pub mod guard;
pub mod resolver;

pub use guard::{safe_enum_value, safe_token_value};
pub use resolver::{resolve_tokens, ResolvedTokens, TokenResolver, TokenTable};
