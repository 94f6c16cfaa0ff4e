//! Integration tests for the complete Phenograph pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - Vocabulary → Association → Statement sink
//! - Vocabulary overrides loaded from disk
//!
//! Run with: cargo test --test integration_tests

use phenograph_assoc::{G2PAssociation, LifecycleState};
use phenograph_graph::{Individual, MemoryGraph, Statement, Triple};
use phenograph_vocab::{BiolinkCategory, TermTable};

fn genotype_phenotype(vocab: &TermTable) -> G2PAssociation<&TermTable> {
    G2PAssociation::new(vocab, "MGI:test", "MGI:1", "HP:0001250", None).expect("association")
}

// ============================================================================
// Primary statement only
// ============================================================================

#[test]
fn test_plain_association_emits_only_the_primary_statement() {
    let vocab = TermTable::builtin();
    let mut graph = MemoryGraph::new();

    let mut assoc = genotype_phenotype(&vocab);
    let id = assoc.assign_id(None).expect("id").to_string();
    assert!(id.starts_with("MONARCH:b"));

    assoc.materialize(&mut graph, None, None).expect("materialize");

    assert_eq!(
        graph.statements(),
        [Statement::Triple(
            Triple::new("MGI:1", "RO:0002200", Some("HP:0001250")).with_categories(
                Some(BiolinkCategory::Genotype),
                Some(BiolinkCategory::PhenotypicFeature),
            )
        )]
    );
    assert_eq!(assoc.state(), LifecycleState::Materialized);
}

// ============================================================================
// Stage range expansion
// ============================================================================

#[test]
fn test_stage_range_adds_process_node_and_qualifier() {
    let vocab = TermTable::builtin();
    let mut graph = MemoryGraph::new();

    let mut assoc = genotype_phenotype(&vocab);
    assoc
        .set_stage(Some("UBERON:0001"), Some("UBERON:0002"))
        .expect("stage");
    let id = assoc.assign_id(None).expect("id").to_string();
    let report = assoc.materialize(&mut graph, None, None).expect("materialize");

    let node = "_:UBERON0001-UBERON0002";
    assert_eq!(report.stage_process_id.as_deref(), Some(node));
    assert_eq!(assoc.stage_process_id(), Some(node));

    let expected = vec![
        Statement::Triple(
            Triple::new("MGI:1", "RO:0002200", Some("HP:0001250")).with_categories(
                Some(BiolinkCategory::Genotype),
                Some(BiolinkCategory::PhenotypicFeature),
            ),
        ),
        Statement::Individual(Individual {
            id: node.to_string(),
            label: None,
            type_id: "GO:0032502".to_string(),
            category: Some(BiolinkCategory::BiologicalProcess),
        }),
        Statement::Triple(Triple::new(node, "RO:0002091", Some("UBERON:0001")).with_categories(
            Some(BiolinkCategory::BiologicalProcess),
            Some(BiolinkCategory::LifeStage),
        )),
        Statement::Triple(Triple::new(node, "RO:0002093", Some("UBERON:0002")).with_categories(
            Some(BiolinkCategory::BiologicalProcess),
            Some(BiolinkCategory::LifeStage),
        )),
        Statement::Triple(
            Triple::new(id.as_str(), "RO:0002573", Some(node))
                .with_categories(None, Some(BiolinkCategory::BiologicalProcess)),
        ),
    ];
    assert_eq!(graph.statements(), expected.as_slice());
}

#[test]
fn test_stage_and_environment_change_the_id() {
    let vocab = TermTable::builtin();

    let mut plain = genotype_phenotype(&vocab);
    let mut staged = genotype_phenotype(&vocab);
    staged
        .set_stage(Some("UBERON:0001"), Some("UBERON:0002"))
        .expect("stage");
    let mut env = genotype_phenotype(&vocab);
    env.set_environment(Some("ZECO:0000103")).expect("environment");

    let plain_id = plain.assign_id(None).expect("id").to_string();
    let staged_id = staged.assign_id(None).expect("id").to_string();
    let env_id = env.assign_id(None).expect("id").to_string();

    assert_ne!(plain_id, staged_id);
    assert_ne!(plain_id, env_id);
    assert_ne!(staged_id, env_id);
    assert_eq!(plain_id, genotype_phenotype(&vocab).make_g2p_id());
}

// ============================================================================
// Provenance and overrides
// ============================================================================

#[test]
fn test_full_association_statement_order() {
    let vocab = TermTable::builtin();
    let mut graph = MemoryGraph::new();

    let mut assoc = genotype_phenotype(&vocab);
    assoc.add_evidence(Some("ECO:0000059")).expect("evidence");
    assoc.add_source(Some("PMID:12345")).expect("source");
    assoc.set_stage(Some("UBERON:0001"), None).expect("stage");
    assoc.set_environment(Some("ZECO:0000103")).expect("environment");
    assoc.assign_id(Some("MONARCH:fixed")).expect("id");
    let report = assoc.materialize(&mut graph, None, None).expect("materialize");

    // primary + evidence + source + stage (4) + environment
    assert_eq!(report.statements_written, 8);
    assert_eq!(graph.len(), 8);

    let predicates: Vec<&str> = graph
        .triples_about("MONARCH:fixed")
        .map(|t| t.predicate.as_str())
        .collect();
    assert_eq!(
        predicates,
        ["RO:0002558", "dc:source", "RO:0002573", "RO:0002573"]
    );
}

#[test]
fn test_vocabulary_overrides_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("terms.json");
    std::fs::write(
        &path,
        serde_json::json!({ "has phenotype": "RO:0009999", "has_qualifier": "RO:0000001" })
            .to_string(),
    )
    .expect("write vocab");

    let vocab = TermTable::builtin_with_overrides(&path).expect("vocab");
    let mut graph = MemoryGraph::new();
    let mut assoc = genotype_phenotype(&vocab);
    assoc.set_environment(Some("ZECO:1")).expect("environment");
    assoc.assign_id(None).expect("id");
    assoc.materialize(&mut graph, None, None).expect("materialize");

    let predicates: Vec<&str> = graph.triples().map(|t| t.predicate.as_str()).collect();
    assert_eq!(predicates, ["RO:0009999", "RO:0000001"]);
}
