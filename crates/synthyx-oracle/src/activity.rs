//! Classifier-backed activity oracles.
//!
//! Each oracle fingerprints the candidate, folds the sparse counts into the
//! classifier's fixed-width feature vector, and asks the pretrained model
//! for a probability. The model itself is an opaque artifact; see
//! `synthyx_artifacts::classifier`.

use std::sync::Arc;

use tracing::debug;

use synthyx_artifacts::{ModelCache, ProbabilityModel, DRD2_MODEL, GSK3B_MODEL, JNK3_MODEL};
use synthyx_chem::{ChemProvider, FingerprintKind};

/// How sparse fingerprint counts become model features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFolding {
    /// Sum occurrence counts per folded slot.
    Counts,
    /// Binarize: 1.0 where any fragment lands.
    Bits,
}

/// A named activity oracle backed by a pretrained classifier.
pub struct ActivityOracle {
    name: String,
    kind: FingerprintKind,
    folding: FeatureFolding,
    width: usize,
    model: Arc<dyn ProbabilityModel>,
}

impl ActivityOracle {
    pub fn new(
        name: &str,
        kind: FingerprintKind,
        folding: FeatureFolding,
        width: usize,
        model: Arc<dyn ProbabilityModel>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            folding,
            width,
            model,
        }
    }

    /// DRD2 bioactivity (radius-3 count features).
    pub async fn drd2(models: &ModelCache) -> Self {
        let model = models.get_or_load(DRD2_MODEL).await;
        Self::new("drd2", FingerprintKind::Ecfp6, FeatureFolding::Counts, 2048, model)
    }

    /// GSK3B bioactivity (radius-2 binary features).
    pub async fn gsk3b(models: &ModelCache) -> Self {
        let model = models.get_or_load(GSK3B_MODEL).await;
        Self::new("gsk3b", FingerprintKind::Ecfp4, FeatureFolding::Bits, 2048, model)
    }

    /// JNK3 bioactivity (radius-2 binary features).
    pub async fn jnk3(models: &ModelCache) -> Self {
        let model = models.get_or_load(JNK3_MODEL).await;
        Self::new("jnk3", FingerprintKind::Ecfp4, FeatureFolding::Bits, 2048, model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probability the candidate is active, in [0, 1]; 0.0 for unparseable
    /// input.
    pub fn score(&self, chem: &dyn ChemProvider, smiles: &str) -> f64 {
        let fp = match chem.fingerprint(smiles, self.kind) {
            Ok(fp) => fp,
            Err(_) => {
                debug!(oracle = %self.name, "unparseable candidate, scoring 0.0");
                return 0.0;
            }
        };
        let features = match self.folding {
            FeatureFolding::Counts => fp.fold_counts(self.width),
            FeatureFolding::Bits => fp.fold_bits(self.width),
        };
        self.model.predict_probability(&features).clamp(0.0, 1.0)
    }

    /// Score a batch of candidates; results line up with the input slice.
    pub fn score_batch(&self, chem: &dyn ChemProvider, candidates: &[&str]) -> Vec<f64> {
        candidates
            .iter()
            .map(|smiles| self.score(chem, smiles))
            .collect()
    }
}
