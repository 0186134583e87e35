//! Synthyx Chem - the chemistry toolkit boundary.
//!
//! The oracle crates never parse, fingerprint, or profile structures
//! themselves; everything goes through the [`ChemProvider`] trait. A
//! production deployment wires in a toolkit-backed implementation (RDKit
//! over FFI, or an in-house engine); unit tests use the deterministic
//! [`MockChem`] provider.

pub mod descriptor;
pub mod fingerprint;
pub mod provider;

pub use descriptor::Descriptor;
pub use fingerprint::{Fingerprint, FingerprintKind};
pub use provider::{ChemProvider, MockChem};
