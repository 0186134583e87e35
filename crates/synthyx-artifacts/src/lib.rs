//! Synthyx Artifacts - versioned model and table artifacts.
//!
//! Pretrained classifier weights and fragment-frequency tables ship as
//! versioned artifacts resolved by stable name: a local content cache is
//! checked first, and the remote store is hit once on first use. Nothing
//! here trains anything; artifacts are consumed read-only.

pub mod classifier;
pub mod store;

pub use classifier::{LogisticModel, ModelCache, ProbabilityModel};
pub use store::{
    abort_on_load_failure, sha256_file, ArtifactStore, DRD2_MODEL, FRAGMENT_SCORES, GSK3B_MODEL,
    JNK3_MODEL,
};
