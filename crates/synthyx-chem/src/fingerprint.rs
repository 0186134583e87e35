//! Sparse count fingerprints and Tanimoto similarity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use synthyx_common::{Result, SynthyxError};

/// Supported fingerprint families. Comparing two fingerprints requires the
/// same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FingerprintKind {
    /// Circular hashed fingerprint, radius 2.
    Ecfp4,
    /// Circular hashed fingerprint, radius 2, feature-abstracted atoms.
    Fcfp4,
    /// Circular hashed fingerprint, radius 3.
    Ecfp6,
    /// Atom-pair fingerprint.
    AtomPair,
}

impl FingerprintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerprintKind::Ecfp4 => "ECFP4",
            FingerprintKind::Fcfp4 => "FCFP4",
            FingerprintKind::Ecfp6 => "ECFP6",
            FingerprintKind::AtomPair => "AP",
        }
    }
}

/// A sparse count fingerprint produced by a chemistry provider: fragment
/// identifiers (integer hashes of local substructure patterns) mapped to
/// occurrence counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    kind: FingerprintKind,
    counts: BTreeMap<u64, u32>,
}

impl Fingerprint {
    pub fn new(kind: FingerprintKind, counts: BTreeMap<u64, u32>) -> Self {
        Self { kind, counts }
    }

    pub fn kind(&self) -> FingerprintKind {
        self.kind
    }

    /// Fragment id -> occurrence count, sorted by id.
    pub fn counts(&self) -> &BTreeMap<u64, u32> {
        &self.counts
    }

    /// Total fragment occurrences (sum of counts).
    pub fn total_count(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Number of distinct fragments.
    pub fn unique_count(&self) -> usize {
        self.counts.len()
    }

    /// Tanimoto coefficient over count vectors:
    /// Σ min(a_i, b_i) / (Σ a_i + Σ b_i − Σ min(a_i, b_i)).
    /// Fails when the families differ; two empty fingerprints score 0.0.
    pub fn tanimoto(&self, other: &Fingerprint) -> Result<f64> {
        if self.kind != other.kind {
            return Err(SynthyxError::FamilyMismatch(
                self.kind.as_str().to_string(),
                other.kind.as_str().to_string(),
            ));
        }
        let common: u64 = self
            .counts
            .iter()
            .filter_map(|(id, &a)| other.counts.get(id).map(|&b| a.min(b) as u64))
            .sum();
        let denominator = self.total_count() + other.total_count() - common;
        if denominator == 0 {
            return Ok(0.0);
        }
        Ok(common as f64 / denominator as f64)
    }

    /// Fold the sparse counts into a fixed-width dense feature vector by
    /// `id % width`, summing counts that collide.
    pub fn fold_counts(&self, width: usize) -> Vec<f64> {
        let mut features = vec![0.0; width];
        for (&id, &count) in &self.counts {
            features[(id % width as u64) as usize] += count as f64;
        }
        features
    }

    /// Fold into a binarized feature vector: 1.0 where any fragment lands.
    pub fn fold_bits(&self, width: usize) -> Vec<f64> {
        let mut features = vec![0.0; width];
        for &id in self.counts.keys() {
            features[(id % width as u64) as usize] = 1.0;
        }
        features
    }
}
