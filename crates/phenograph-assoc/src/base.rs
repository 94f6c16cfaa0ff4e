//! Association base: the reified subject –relation→ object statement.
//!
//! Every association kind shares the same core slots (source, subject,
//! relation, object, id, provenance) and the same primary emission. Kinds
//! compose an [`AssociationCore`] and implement [`Association`]; they may
//! override [`Association::emit_primary`] but normally add their own
//! qualifier statements around the default.

use crate::digest::association_id_v1;
use crate::error::AssocError;
use phenograph_graph::{StatementSink, Triple};
use phenograph_vocab::{BiolinkCategory, TermVocabulary, HAS_EVIDENCE, SOURCE};

/// Trimmed-blank test used by every setter that ignores empty input.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationCore {
    source_id: String,
    subject_id: String,
    relation_id: String,
    object_id: String,
    association_id: Option<String>,
    evidence: Vec<String>,
    sources: Vec<String>,
}

impl AssociationCore {
    /// Subject, relation and object must be non-blank.
    pub fn new(
        source_id: &str,
        subject_id: &str,
        relation_id: &str,
        object_id: &str,
    ) -> Result<Self, AssocError> {
        let subject_id = non_blank(Some(subject_id)).ok_or(AssocError::MissingField("subject"))?;
        let object_id = non_blank(Some(object_id)).ok_or(AssocError::MissingField("object"))?;
        let relation_id =
            non_blank(Some(relation_id)).ok_or(AssocError::MissingField("relation"))?;

        Ok(Self {
            source_id: source_id.to_string(),
            subject_id: subject_id.to_string(),
            relation_id: relation_id.to_string(),
            object_id: object_id.to_string(),
            association_id: None,
            evidence: Vec::new(),
            sources: Vec::new(),
        })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn relation_id(&self) -> &str {
        &self.relation_id
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn association_id(&self) -> Option<&str> {
        self.association_id.as_deref()
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub(crate) fn set_association_id(&mut self, id: String) {
        self.association_id = Some(id);
    }

    /// Derive an id from the core tuple followed by `extras`.
    pub fn derive_id(&self, namespace: &str, extras: &[Option<&str>]) -> String {
        association_id_v1(
            namespace,
            &self.source_id,
            &self.subject_id,
            &self.relation_id,
            &self.object_id,
            extras,
        )
    }

    /// Returns `true` if the evidence id was recorded.
    pub(crate) fn add_evidence(&mut self, evidence_id: Option<&str>) -> bool {
        push_unique(&mut self.evidence, evidence_id)
    }

    /// Returns `true` if the source id was recorded.
    pub(crate) fn add_source(&mut self, source: Option<&str>) -> bool {
        push_unique(&mut self.sources, source)
    }

    /// Write the primary triple, then any provenance attached to the
    /// association id. Returns the number of writes.
    pub fn emit_primary(
        &self,
        vocab: &dyn TermVocabulary,
        sink: &mut dyn StatementSink,
        subject_category: BiolinkCategory,
        object_category: BiolinkCategory,
    ) -> Result<usize, AssocError> {
        let has_provenance = !self.evidence.is_empty() || !self.sources.is_empty();

        // Resolve everything up front so a lookup failure writes nothing.
        let provenance = if has_provenance {
            let id = self
                .association_id
                .as_deref()
                .ok_or(AssocError::MissingAssociationId)?;
            Some((id, vocab.resolve(HAS_EVIDENCE)?, vocab.resolve(SOURCE)?))
        } else {
            None
        };

        sink.add_triple(
            Triple::new(
                self.subject_id.as_str(),
                self.relation_id.as_str(),
                Some(self.object_id.as_str()),
            )
            .with_categories(Some(subject_category), Some(object_category)),
        )?;
        let mut written = 1;

        if let Some((id, has_evidence, source)) = provenance {
            for evidence_id in &self.evidence {
                sink.add_triple(
                    Triple::new(id, has_evidence, Some(evidence_id.as_str()))
                        .with_categories(None, Some(BiolinkCategory::EvidenceType)),
                )?;
                written += 1;
            }
            for source_id in &self.sources {
                sink.add_triple(
                    Triple::new(id, source, Some(source_id.as_str()))
                        .with_categories(None, Some(BiolinkCategory::Publication)),
                )?;
                written += 1;
            }
        }

        Ok(written)
    }
}

fn push_unique(list: &mut Vec<String>, value: Option<&str>) -> bool {
    match non_blank(value) {
        Some(v) if !list.iter().any(|existing| existing == v) => {
            list.push(v.to_string());
            true
        }
        _ => false,
    }
}

/// Shared capability of every association kind.
pub trait Association {
    fn core(&self) -> &AssociationCore;

    /// Emit the reified primary statement. The default writes the core triple
    /// and its provenance.
    fn emit_primary(
        &self,
        vocab: &dyn TermVocabulary,
        sink: &mut dyn StatementSink,
        subject_category: BiolinkCategory,
        object_category: BiolinkCategory,
    ) -> Result<usize, AssocError> {
        self.core()
            .emit_primary(vocab, sink, subject_category, object_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenograph_graph::MemoryGraph;
    use phenograph_vocab::TermTable;

    #[test]
    fn rejects_blank_subject_and_object() {
        let err = AssociationCore::new("src", "  ", "RO:1", "HP:1").unwrap_err();
        assert!(matches!(err, AssocError::MissingField("subject")));
        let err = AssociationCore::new("src", "MGI:1", "RO:1", "").unwrap_err();
        assert!(matches!(err, AssocError::MissingField("object")));
    }

    #[test]
    fn provenance_is_deduplicated_and_blank_tolerant() {
        let mut core = AssociationCore::new("src", "MGI:1", "RO:1", "HP:1").expect("core");
        assert!(core.add_evidence(Some("ECO:0000059")));
        assert!(!core.add_evidence(Some("ECO:0000059")));
        assert!(!core.add_evidence(Some("   ")));
        assert!(!core.add_source(None));
        assert!(core.add_source(Some("PMID:1")));
        assert_eq!(core.evidence(), ["ECO:0000059".to_string()]);
        assert_eq!(core.sources(), ["PMID:1".to_string()]);
    }

    #[test]
    fn provenance_requires_an_id() {
        let vocab = TermTable::builtin();
        let mut graph = MemoryGraph::new();
        let mut core = AssociationCore::new("src", "MGI:1", "RO:1", "HP:1").expect("core");
        core.add_source(Some("PMID:1"));

        let err = core
            .emit_primary(
                &vocab,
                &mut graph,
                BiolinkCategory::Genotype,
                BiolinkCategory::PhenotypicFeature,
            )
            .unwrap_err();
        assert!(matches!(err, AssocError::MissingAssociationId));
        assert!(graph.is_empty());
    }

    #[test]
    fn emits_provenance_after_primary_triple() {
        let vocab = TermTable::builtin();
        let mut graph = MemoryGraph::new();
        let mut core = AssociationCore::new("src", "MGI:1", "RO:1", "HP:1").expect("core");
        core.add_evidence(Some("ECO:0000059"));
        core.add_source(Some("PMID:1"));
        core.set_association_id("MONARCH:b1".to_string());

        let written = core
            .emit_primary(
                &vocab,
                &mut graph,
                BiolinkCategory::Genotype,
                BiolinkCategory::PhenotypicFeature,
            )
            .expect("emit");
        assert_eq!(written, 3);

        let triples: Vec<&Triple> = graph.triples().collect();
        assert_eq!(triples[0].subject, "MGI:1");
        assert_eq!(triples[1].predicate, "RO:0002558");
        assert_eq!(triples[1].object_category, Some(BiolinkCategory::EvidenceType));
        assert_eq!(triples[2].predicate, "dc:source");
        assert_eq!(triples[2].subject, "MONARCH:b1");
    }
}
