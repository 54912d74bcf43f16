//! Composition stage of the tokc compiler.
//!
//! Loads the layered sources, rewrites bare aliases into namespaced paths,
//! and deep-merges the layers into one [`ComposedTree`] rooted at `core` and
//! `semantic`.

pub mod compose;
pub mod error;
pub mod merge;
pub mod namespace;
pub mod pipeline;
pub mod references;
pub mod report;

pub use compose::{compose, ComposedTree, Layer, LayerRoot};
pub use error::ComposeError;
pub use merge::{deep_merge, merge_into};
pub use namespace::{namespace_references, NamespaceRule, NamespaceRules, DEFAULT_RULES};
pub use pipeline::{compose_sources, Overlay, PipelineConfig, PipelineOutput, SourceSet};
pub use references::{check_references, ReferenceIssue};
pub use report::{ComposeReport, SourceSummary};
