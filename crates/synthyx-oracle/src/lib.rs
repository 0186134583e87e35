//! Synthyx Oracle - desirability scoring for generated molecules.
//!
//! This crate implements the scoring layer of the Synthyx pipeline:
//! 1. Score-transformation algebra (`modifier`)
//! 2. Multi-property objective evaluation (`mpo`) and the named
//!    benchmark catalog (`catalog`)
//! 3. Fragment-based synthetic accessibility (`sa`)
//! 4. Classifier-backed activity oracles (`activity`)
//! 5. Single-property oracles (`properties`)
//! 6. Retrosynthesis tree interpretation (`retro`)
//!
//! Every public scoring entry point is total over arbitrary candidate
//! strings: unparseable input maps to a documented fallback value, never an
//! error, because downstream optimizers feed these functions unvetted
//! generated structures.

pub mod activity;
pub mod catalog;
pub mod formula;
pub mod modifier;
pub mod mpo;
pub mod properties;
pub mod retro;
pub mod sa;

pub use activity::{ActivityOracle, FeatureFolding};
pub use modifier::ScoreModifier;
pub use mpo::{MeanKind, Measurement, MpoSpec, SimilarityTarget, SubTerm};
pub use retro::{analyze_tree, RetroNode, RetroResult, TreeAnalysis};
pub use sa::{FragmentScoreTable, SaScorer};

pub type Result<T> = synthyx_common::Result<T>;
