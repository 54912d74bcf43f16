//! Token source loading for tokc.
//!
//! Sources are parsed in two stages. A bare JSON parse must succeed; a
//! schema-aware parse into a [`TokenDocument`] is attempted next, and when it
//! fails the bare tree still flows downstream as a [`FallbackSource`].
//! Malformed individual values never abort loading: they are collected in a
//! [`ValidationReport`].

pub mod document;
pub mod error;
pub mod loader;
pub mod validate;

pub use document::{SchemaError, Token, TokenDocument, TokenGroup, TokenNode};
pub use error::{LoadError, Result};
pub use loader::{
    check_required, discover_overlays, load_source, parse_source, FallbackSource, LoadedSource,
    ValidatedSource,
};
pub use validate::{validate_document, validate_tree, Issue, Severity, ValidationReport};
