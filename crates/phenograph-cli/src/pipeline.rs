//! Record → statements driver.
//!
//! Each input record becomes one genotype-to-phenotype association. Records
//! are materialized into their own scratch graph and only appended to the
//! output once every write succeeded, so a failing record contributes nothing.

use phenograph_assoc::{AssocError, AssociationConfig, G2PAssociation, MaterializeReport};
use phenograph_graph::MemoryGraph;
use phenograph_vocab::{BiolinkCategory, TermVocabulary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub source: String,
    pub subject: String,
    pub object: String,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub start_stage: Option<String>,
    #[serde(default)]
    pub end_stage: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    /// Explicit association id; derived when absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub subject_category: Option<BiolinkCategory>,
    #[serde(default)]
    pub object_category: Option<BiolinkCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub materialized: usize,
    pub failed: usize,
    pub statements: usize,
}

pub fn build_association<V: TermVocabulary>(
    vocab: V,
    config: &AssociationConfig,
    record: &AssociationRecord,
) -> Result<G2PAssociation<V>, AssocError> {
    let mut assoc = G2PAssociation::with_config(
        vocab,
        config,
        &record.source,
        &record.subject,
        &record.object,
        record.relation.as_deref(),
    )?;
    assoc.set_stage(record.start_stage.as_deref(), record.end_stage.as_deref())?;
    assoc.set_environment(record.environment.as_deref())?;
    for evidence in &record.evidence {
        assoc.add_evidence(Some(evidence.as_str()))?;
    }
    for source in &record.sources {
        assoc.add_source(Some(source.as_str()))?;
    }
    Ok(assoc)
}

pub fn materialize_record(
    vocab: &dyn TermVocabulary,
    config: &AssociationConfig,
    record: &AssociationRecord,
    graph: &mut MemoryGraph,
) -> Result<MaterializeReport, AssocError> {
    let mut assoc = build_association(vocab, config, record)?;
    assoc.assign_id(record.id.as_deref())?;
    assoc.materialize(graph, record.subject_category, record.object_category)
}

pub fn run(
    vocab: &dyn TermVocabulary,
    config: &AssociationConfig,
    records: &[AssociationRecord],
    out: &mut MemoryGraph,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for (index, record) in records.iter().enumerate() {
        let mut scratch = MemoryGraph::new();
        match materialize_record(vocab, config, record, &mut scratch) {
            Ok(report) => {
                summary.materialized += 1;
                summary.statements += scratch.len();
                out.append(scratch);
                tracing::debug!(
                    index,
                    association_id = %report.association_id,
                    statements = report.statements_written,
                    "record materialized"
                );
            }
            Err(err) => {
                summary.failed += 1;
                tracing::error!(
                    index,
                    subject = %record.subject,
                    object = %record.object,
                    error = %err,
                    "failed to materialize record"
                );
            }
        }
    }

    summary
}
