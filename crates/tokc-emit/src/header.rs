//! Provenance headers for generated artifacts.

use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// SHA-256 of the compact JSON serialization of a composed tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_tree(tree: &Value) -> Result<Self> {
        let bytes = serde_json::to_vec(tree)?;
        Ok(Self::compute(&bytes))
    }

    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Fingerprint(hex_encode(&hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Block comment valid in both CSS and TypeScript.
    pub fn header(&self) -> String {
        format!(
            "/*\n * Generated by tokc {}. Do not edit.\n * source: sha256:{}\n */\n\n",
            env!("CARGO_PKG_VERSION"),
            self.0
        )
    }

    /// Prepend the provenance header to a rendered artifact.
    pub fn stamp(&self, body: &str) -> String {
        let mut out = self.header();
        out.push_str(body);
        out
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
