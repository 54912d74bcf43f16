//! Core data model for the tokc design-token compiler.
//!
//! A token source is a JSON tree of groups and tokens. A node is a token iff
//! it carries a `$value` key; every other object is a group. This crate owns:
//! - **Value model:** typed token values (`TokenValue`) with validated constructors
//! - **References:** the `{dot.separated.path}` alias syntax
//! - **Namespaces:** the `core` / `semantic` top-level layers
//! - **Traversal:** walking a tree to its token leaves with inherited `$type`

pub mod error;
pub mod namespace;
pub mod path;
pub mod reference;
pub mod tree;
pub mod value;

pub use error::ValueError;
pub use namespace::Namespace;
pub use reference::{collect_references, Reference};
pub use tree::{get_path, is_token, walk_tokens, TokenLeaf};
pub use value::{Aliasable, Parsed, TokenType, TokenValue};
