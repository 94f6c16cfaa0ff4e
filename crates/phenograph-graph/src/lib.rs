//! Statement sink boundary for Phenograph.
//!
//! Association shaping only *writes* to a graph. This crate defines what a
//! write looks like and the trait a graph backend implements to accept them:
//!
//! - [`Triple`]: subject, predicate, object, plus optional Biolink categories
//!   for either end.
//! - [`Individual`]: declaration of a named (or anonymous) node with a type.
//! - [`StatementSink`]: the write-only boundary (`add_triple`, `add_individual`).
//!
//! [`MemoryGraph`] is the in-process sink used by the CLI and the tests: an
//! ordered log of every accepted statement. Persistence and RDF serialization
//! belong to whatever consumes that log.

use phenograph_vocab::BiolinkCategory;
use serde::{Deserialize, Serialize};

/// Prefix marking anonymous (blank) node identifiers.
pub const BLANK_NODE_PREFIX: &str = "_:";

pub fn is_blank_node(id: &str) -> bool {
    id.starts_with(BLANK_NODE_PREFIX)
}

// ============================================================================
// Statement model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    /// `None` when the caller had no value for the object position.
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_category: Option<BiolinkCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_category: Option<BiolinkCategory>,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: Option<impl Into<String>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.map(Into::into),
            subject_category: None,
            object_category: None,
        }
    }

    pub fn with_categories(
        mut self,
        subject_category: Option<BiolinkCategory>,
        object_category: Option<BiolinkCategory>,
    ) -> Self {
        self.subject_category = subject_category;
        self.object_category = object_category;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<BiolinkCategory>,
}

/// One accepted write, in the order the sink received it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Statement {
    Triple(Triple),
    Individual(Individual),
}

impl Statement {
    pub fn as_triple(&self) -> Option<&Triple> {
        match self {
            Statement::Triple(t) => Some(t),
            Statement::Individual(_) => None,
        }
    }

    pub fn as_individual(&self) -> Option<&Individual> {
        match self {
            Statement::Individual(i) => Some(i),
            Statement::Triple(_) => None,
        }
    }
}

// ============================================================================
// Sink boundary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("statement has an empty subject (predicate `{predicate}`)")]
    EmptySubject { predicate: String },
    #[error("statement about `{subject}` has an empty predicate")]
    EmptyPredicate { subject: String },
    #[error("individual of type `{type_id}` has an empty id")]
    EmptyIndividualId { type_id: String },
    #[error("individual `{id}` has an empty type")]
    EmptyType { id: String },
    #[error("sink rejected statement: {0}")]
    Rejected(String),
}

/// Write-only graph boundary.
pub trait StatementSink {
    fn add_triple(&mut self, triple: Triple) -> Result<(), GraphError>;

    fn add_individual(&mut self, individual: Individual) -> Result<(), GraphError>;
}

impl<S: StatementSink + ?Sized> StatementSink for &mut S {
    fn add_triple(&mut self, triple: Triple) -> Result<(), GraphError> {
        (**self).add_triple(triple)
    }

    fn add_individual(&mut self, individual: Individual) -> Result<(), GraphError> {
        (**self).add_individual(individual)
    }
}

// ============================================================================
// In-memory sink
// ============================================================================

/// Ordered, append-only statement log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryGraph {
    statements: Vec<Statement>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Move every statement of `other` to the end of this log.
    pub fn append(&mut self, other: MemoryGraph) {
        self.statements.extend(other.statements);
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.statements.iter().filter_map(Statement::as_triple)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.statements.iter().filter_map(Statement::as_individual)
    }

    /// Triples whose subject is `subject`, in insertion order.
    pub fn triples_about<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples().filter(move |t| t.subject == subject)
    }

    /// Serialize the log as JSON lines, one statement per line.
    pub fn write_json_lines<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        for statement in &self.statements {
            serde_json::to_writer(&mut out, statement)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl StatementSink for MemoryGraph {
    fn add_triple(&mut self, triple: Triple) -> Result<(), GraphError> {
        if triple.subject.trim().is_empty() {
            return Err(GraphError::EmptySubject {
                predicate: triple.predicate,
            });
        }
        if triple.predicate.trim().is_empty() {
            return Err(GraphError::EmptyPredicate {
                subject: triple.subject,
            });
        }
        if triple.object.is_none() {
            tracing::debug!(
                subject = %triple.subject,
                predicate = %triple.predicate,
                "accepted triple with no object"
            );
        }
        self.statements.push(Statement::Triple(triple));
        Ok(())
    }

    fn add_individual(&mut self, individual: Individual) -> Result<(), GraphError> {
        if individual.id.trim().is_empty() {
            return Err(GraphError::EmptyIndividualId {
                type_id: individual.type_id,
            });
        }
        if individual.type_id.trim().is_empty() {
            return Err(GraphError::EmptyType { id: individual.id });
        }
        self.statements.push(Statement::Individual(individual));
        Ok(())
    }
}
