use phenograph_graph::GraphError;
use phenograph_vocab::VocabError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an association is in its build → identify → materialize lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Qualifiers and provenance may still change.
    Building,
    /// An id is assigned; contents are frozen.
    Identified,
    /// Statements have been written to a sink.
    Materialized,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Building => "building",
            LifecycleState::Identified => "identified",
            LifecycleState::Materialized => "materialized",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssocError {
    #[error("association is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("association id must be assigned before materialization")]
    MissingAssociationId,
    #[error("association is {state}; qualifiers can only change while building")]
    Frozen { state: LifecycleState },
    #[error("cannot {operation} an association that is {from}")]
    InvalidTransition {
        from: LifecycleState,
        operation: &'static str,
    },
    #[error(transparent)]
    Vocab(#[from] VocabError),
    #[error(transparent)]
    Sink(#[from] GraphError),
}
