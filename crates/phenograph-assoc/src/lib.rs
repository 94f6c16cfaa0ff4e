//! Reified association shaping for Phenograph.
//!
//! This crate turns already-resolved identifiers into the statement set of one
//! association and a stable, content-derived id for it:
//!
//! - [`base`]: the association base ([`AssociationCore`], [`Association`]).
//! - [`digest`]: versioned association-id derivation.
//! - [`g2p`]: genotype-to-phenotype associations with stage and environment
//!   qualifiers.
//!
//! It does not resolve identifiers, check biological correctness, or persist
//! anything: statements go to a caller-supplied
//! [`StatementSink`](phenograph_graph::StatementSink).

pub mod base;
pub mod config;
pub mod digest;
pub mod error;
pub mod g2p;

pub use base::{Association, AssociationCore};
pub use config::AssociationConfig;
pub use error::{AssocError, LifecycleState};
pub use g2p::{stage_process_node_id, G2PAssociation, MaterializeReport};
