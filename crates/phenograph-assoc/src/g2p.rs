//! Genotype-to-phenotype associations.
//!
//! A [`G2PAssociation`] links a genotype (or any genotype part) to a phenotype
//! via "has phenotype" unless another relation is given, and can be narrowed by
//! a developmental stage range and an environment.
//!
//! ```text
//!   new ──► set_stage / set_environment / add_* ──► assign_id ──► materialize
//!  Building ─────────────────────────────────────► Identified ──► Materialized
//! ```
//!
//! Materialization writes, in order:
//!
//! 1. the primary triple `subject –relation→ object` (plus provenance),
//! 2. if a stage bound is set: an anonymous developmental-process node, its
//!    `starts during` / `ends during` triples, and
//!    `association –has_qualifier→ node`,
//! 3. if an environment is set: `association –has_qualifier→ environment`.

use crate::base::{non_blank, Association, AssociationCore};
use crate::config::AssociationConfig;
use crate::error::{AssocError, LifecycleState};
use phenograph_graph::{is_blank_node, Individual, StatementSink, Triple, BLANK_NODE_PREFIX};
use phenograph_vocab::{
    BiolinkCategory, TermVocabulary, DEVELOPMENTAL_PROCESS, ENDS_DURING, HAS_PHENOTYPE,
    HAS_QUALIFIER, STARTS_DURING,
};
use serde::Serialize;

/// Text used for an unset stage bound inside stage-process node ids.
pub const UNSET_STAGE_TOKEN: &str = "None";

/// Outcome of a successful [`G2PAssociation::materialize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    pub association_id: String,
    pub statements_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_process_id: Option<String>,
}

/// Anonymous developmental-process node id for a stage range.
///
/// `_:` followed by `<start>-<end>` with every `:` removed; an unset bound is
/// rendered as [`UNSET_STAGE_TOKEN`].
pub fn stage_process_node_id(start: Option<&str>, end: Option<&str>) -> String {
    let joined = format!(
        "{}-{}",
        start.unwrap_or(UNSET_STAGE_TOKEN),
        end.unwrap_or(UNSET_STAGE_TOKEN)
    );
    format!("{BLANK_NODE_PREFIX}{}", joined.replace(':', ""))
}

#[derive(Debug, Clone)]
pub struct G2PAssociation<V> {
    vocab: V,
    id_namespace: String,
    core: AssociationCore,
    subject_category: BiolinkCategory,
    object_category: BiolinkCategory,
    start_stage_id: Option<String>,
    end_stage_id: Option<String>,
    environment_id: Option<String>,
    stage_process_id: Option<String>,
    state: LifecycleState,
}

impl<V: TermVocabulary> G2PAssociation<V> {
    /// New association with the default [`AssociationConfig`].
    ///
    /// A missing or blank `relation_id` is replaced by the vocabulary's
    /// "has phenotype" relation.
    pub fn new(
        vocab: V,
        source_id: &str,
        subject_id: &str,
        object_id: &str,
        relation_id: Option<&str>,
    ) -> Result<Self, AssocError> {
        Self::with_config(
            vocab,
            &AssociationConfig::default(),
            source_id,
            subject_id,
            object_id,
            relation_id,
        )
    }

    pub fn with_config(
        vocab: V,
        config: &AssociationConfig,
        source_id: &str,
        subject_id: &str,
        object_id: &str,
        relation_id: Option<&str>,
    ) -> Result<Self, AssocError> {
        let relation_id = match non_blank(relation_id) {
            Some(rel) => rel.to_string(),
            None => vocab.resolve(HAS_PHENOTYPE)?.to_string(),
        };
        let core = AssociationCore::new(source_id, subject_id, &relation_id, object_id)?;

        Ok(Self {
            vocab,
            id_namespace: config.id_namespace.clone(),
            core,
            subject_category: config.subject_category,
            object_category: config.object_category,
            start_stage_id: None,
            end_stage_id: None,
            environment_id: None,
            stage_process_id: None,
            state: LifecycleState::Building,
        })
    }

    /// Override the instance categories (used when `materialize` gets none).
    pub fn with_categories(
        mut self,
        subject_category: BiolinkCategory,
        object_category: BiolinkCategory,
    ) -> Self {
        self.subject_category = subject_category;
        self.object_category = object_category;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn source_id(&self) -> &str {
        self.core.source_id()
    }

    pub fn subject_id(&self) -> &str {
        self.core.subject_id()
    }

    pub fn object_id(&self) -> &str {
        self.core.object_id()
    }

    pub fn relation_id(&self) -> &str {
        self.core.relation_id()
    }

    pub fn subject_category(&self) -> BiolinkCategory {
        self.subject_category
    }

    pub fn object_category(&self) -> BiolinkCategory {
        self.object_category
    }

    pub fn start_stage_id(&self) -> Option<&str> {
        self.start_stage_id.as_deref()
    }

    pub fn end_stage_id(&self) -> Option<&str> {
        self.end_stage_id.as_deref()
    }

    pub fn environment_id(&self) -> Option<&str> {
        self.environment_id.as_deref()
    }

    pub fn association_id(&self) -> Option<&str> {
        self.core.association_id()
    }

    /// Set only once a stage range has been materialized.
    pub fn stage_process_id(&self) -> Option<&str> {
        self.stage_process_id.as_deref()
    }

    // ------------------------------------------------------------------------
    // Qualifiers
    // ------------------------------------------------------------------------

    fn ensure_building(&self) -> Result<(), AssocError> {
        match self.state {
            LifecycleState::Building => Ok(()),
            state => Err(AssocError::Frozen { state }),
        }
    }

    /// Set either stage bound. Blank or missing values leave the current bound
    /// untouched; there is no way to clear a bound once set.
    pub fn set_stage(&mut self, start: Option<&str>, end: Option<&str>) -> Result<(), AssocError> {
        self.ensure_building()?;
        if let Some(start) = non_blank(start) {
            self.start_stage_id = Some(start.to_string());
        }
        if let Some(end) = non_blank(end) {
            self.end_stage_id = Some(end.to_string());
        }
        Ok(())
    }

    pub fn set_environment(&mut self, environment_id: Option<&str>) -> Result<(), AssocError> {
        self.ensure_building()?;
        if let Some(env) = non_blank(environment_id) {
            self.environment_id = Some(env.to_string());
        }
        Ok(())
    }

    pub fn add_evidence(&mut self, evidence_id: Option<&str>) -> Result<(), AssocError> {
        self.ensure_building()?;
        self.core.add_evidence(evidence_id);
        Ok(())
    }

    pub fn add_source(&mut self, source: Option<&str>) -> Result<(), AssocError> {
        self.ensure_building()?;
        self.core.add_source(source);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    /// Id derived from `(source, subject, relation, object, environment,
    /// start stage, end stage)`.
    pub fn make_g2p_id(&self) -> String {
        self.core.derive_id(
            &self.id_namespace,
            &[
                self.environment_id.as_deref(),
                self.start_stage_id.as_deref(),
                self.end_stage_id.as_deref(),
            ],
        )
    }

    /// Assign the association id, freezing qualifiers. An explicit id is
    /// stored verbatim; a blank one is rejected and leaves the association
    /// `Building`.
    pub fn assign_id(&mut self, explicit: Option<&str>) -> Result<&str, AssocError> {
        if self.state != LifecycleState::Building {
            return Err(AssocError::InvalidTransition {
                from: self.state,
                operation: "assign an id to",
            });
        }

        let id = match explicit {
            Some(id) if id.trim().is_empty() => {
                return Err(AssocError::MissingField("association_id"))
            }
            Some(id) => id.to_string(),
            None => self.make_g2p_id(),
        };
        tracing::debug!(
            association_id = %id,
            explicit = explicit.is_some(),
            subject = %self.core.subject_id(),
            object = %self.core.object_id(),
            "assigned association id"
        );

        self.core.set_association_id(id);
        self.state = LifecycleState::Identified;
        Ok(self.core.association_id().unwrap_or_default())
    }

    // ------------------------------------------------------------------------
    // Materialization
    // ------------------------------------------------------------------------

    /// Write this association into `sink`.
    ///
    /// Category overrides take precedence over the instance categories. A sink
    /// error aborts at the failing write and leaves the association
    /// `Identified`; statements already written stay written.
    pub fn materialize(
        &mut self,
        sink: &mut dyn StatementSink,
        subject_category: Option<BiolinkCategory>,
        object_category: Option<BiolinkCategory>,
    ) -> Result<MaterializeReport, AssocError> {
        let association_id = match self.state {
            LifecycleState::Identified => self
                .core
                .association_id()
                .ok_or(AssocError::MissingAssociationId)?
                .to_string(),
            LifecycleState::Building => return Err(AssocError::MissingAssociationId),
            LifecycleState::Materialized => {
                return Err(AssocError::InvalidTransition {
                    from: self.state,
                    operation: "materialize",
                })
            }
        };

        let subject_category = subject_category.unwrap_or(self.subject_category);
        let object_category = object_category.unwrap_or(self.object_category);

        let expand_stage = self.start_stage_id.is_some() || self.end_stage_id.is_some();
        let has_qualifier = if expand_stage || self.environment_id.is_some() {
            Some(self.vocab.resolve(HAS_QUALIFIER)?)
        } else {
            None
        };
        let stage_terms = if expand_stage {
            Some((
                self.vocab.resolve(DEVELOPMENTAL_PROCESS)?,
                self.vocab.resolve(STARTS_DURING)?,
                self.vocab.resolve(ENDS_DURING)?,
            ))
        } else {
            None
        };

        let mut written = self.emit_primary(&self.vocab, sink, subject_category, object_category)?;

        let mut stage_process_id = None;
        if let (Some((process_type, starts_during, ends_during)), Some(has_qualifier)) =
            (stage_terms, has_qualifier)
        {
            let start = self.start_stage_id.as_deref();
            let end = self.end_stage_id.as_deref();
            let node = stage_process_node_id(start, end);
            debug_assert!(is_blank_node(&node));

            if start.is_none() || end.is_none() {
                tracing::warn!(
                    association_id = %association_id,
                    stage_process = %node,
                    start = ?start,
                    end = ?end,
                    "stage range has an open bound; writing a stage triple with no object"
                );
            }

            sink.add_individual(Individual {
                id: node.clone(),
                label: None,
                type_id: process_type.to_string(),
                category: Some(BiolinkCategory::BiologicalProcess),
            })?;
            sink.add_triple(
                Triple::new(node.as_str(), starts_during, start).with_categories(
                    Some(BiolinkCategory::BiologicalProcess),
                    Some(BiolinkCategory::LifeStage),
                ),
            )?;
            sink.add_triple(
                Triple::new(node.as_str(), ends_during, end).with_categories(
                    Some(BiolinkCategory::BiologicalProcess),
                    Some(BiolinkCategory::LifeStage),
                ),
            )?;
            sink.add_triple(
                Triple::new(association_id.as_str(), has_qualifier, Some(node.as_str()))
                    .with_categories(None, Some(BiolinkCategory::BiologicalProcess)),
            )?;
            written += 4;
            stage_process_id = Some(node);
        }

        if let (Some(env), Some(has_qualifier)) = (self.environment_id.as_deref(), has_qualifier) {
            sink.add_triple(
                Triple::new(association_id.as_str(), has_qualifier, Some(env))
                    .with_categories(None, Some(BiolinkCategory::Environment)),
            )?;
            written += 1;
        }

        tracing::debug!(
            association_id = %association_id,
            statements = written,
            "materialized genotype-to-phenotype association"
        );

        self.stage_process_id = stage_process_id.clone();
        self.state = LifecycleState::Materialized;

        Ok(MaterializeReport {
            association_id,
            statements_written: written,
            stage_process_id,
        })
    }
}

impl<V: TermVocabulary> Association for G2PAssociation<V> {
    fn core(&self) -> &AssociationCore {
        &self.core
    }
}
