//! Term vocabulary for Phenograph.
//!
//! Association shaping never hard-codes relation or class CURIEs. Every
//! predicate it writes is looked up by a human-readable name (for example
//! `"has phenotype"` or `"starts during"`) through a [`TermVocabulary`].
//!
//! - [`TermTable`] is the shipped implementation: a flat name → CURIE map with
//!   built-in defaults that can be overlaid from a JSON file.
//! - [`BiolinkCategory`] holds the fixed semantic type tags attached to
//!   subjects and objects of emitted statements.

pub mod category;

pub use category::BiolinkCategory;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Well-known term names
// ============================================================================

pub const HAS_PHENOTYPE: &str = "has phenotype";
pub const STARTS_DURING: &str = "starts during";
pub const ENDS_DURING: &str = "ends during";
pub const HAS_QUALIFIER: &str = "has_qualifier";
pub const DEVELOPMENTAL_PROCESS: &str = "developmental_process";
pub const HAS_EVIDENCE: &str = "has evidence";
pub const SOURCE: &str = "source";

/// Defaults shipped with the crate (name, CURIE).
const BUILTIN_TERMS: &[(&str, &str)] = &[
    (HAS_PHENOTYPE, "RO:0002200"),
    (STARTS_DURING, "RO:0002091"),
    (ENDS_DURING, "RO:0002093"),
    (HAS_QUALIFIER, "RO:0002573"),
    (DEVELOPMENTAL_PROCESS, "GO:0032502"),
    (HAS_EVIDENCE, "RO:0002558"),
    (SOURCE, "dc:source"),
];

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("unknown vocabulary term: {0}")]
    UnknownTerm(String),
    #[error("vocabulary term `{0}` maps to an empty identifier")]
    EmptyIdentifier(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only lookup from term names to canonical identifiers.
pub trait TermVocabulary {
    fn resolve(&self, name: &str) -> Result<&str, VocabError>;
}

/// Flat name → CURIE table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermTable {
    terms: BTreeMap<String, String>,
}

impl TermTable {
    /// Empty table (every lookup fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the built-in relation and class terms.
    pub fn builtin() -> Self {
        let terms = BUILTIN_TERMS
            .iter()
            .map(|(name, curie)| (name.to_string(), curie.to_string()))
            .collect();
        Self { terms }
    }

    /// Parse a JSON object of `{ "name": "CURIE" }` pairs.
    pub fn from_json_str(text: &str) -> Result<Self, VocabError> {
        let table: TermTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, VocabError> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            terms = table.len(),
            "loaded vocabulary table"
        );
        Ok(table)
    }

    /// Builtins overlaid with the entries of `path`.
    pub fn builtin_with_overrides(path: &Path) -> Result<Self, VocabError> {
        let mut table = Self::builtin();
        table.extend(Self::from_path(path)?);
        Ok(table)
    }

    pub fn insert(&mut self, name: impl Into<String>, curie: impl Into<String>) -> Option<String> {
        self.terms.insert(name.into(), curie.into())
    }

    /// Later entries win.
    pub fn extend(&mut self, other: TermTable) {
        self.terms.extend(other.terms);
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn validate(&self) -> Result<(), VocabError> {
        match self.terms.iter().find(|(_, curie)| curie.trim().is_empty()) {
            Some((name, _)) => Err(VocabError::EmptyIdentifier(name.clone())),
            None => Ok(()),
        }
    }
}

impl TermVocabulary for TermTable {
    fn resolve(&self, name: &str) -> Result<&str, VocabError> {
        self.terms
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| VocabError::UnknownTerm(name.to_string()))
    }
}

impl<V: TermVocabulary + ?Sized> TermVocabulary for &V {
    fn resolve(&self, name: &str) -> Result<&str, VocabError> {
        (**self).resolve(name)
    }
}
