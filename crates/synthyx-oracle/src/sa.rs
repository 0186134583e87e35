//! Fragment-based synthetic accessibility estimation.
//!
//! Fragment-contribution difficulty score rescaled to [1, 10], higher =
//! harder to synthesize. Fragment log-frequency contributions come from a
//! versioned table artifact fitted on literature compound collections;
//! structural penalties cover stereo centers, spiro and bridgehead atoms,
//! and macrocycles.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use synthyx_artifacts::{abort_on_load_failure, ArtifactStore, FRAGMENT_SCORES};
use synthyx_chem::{ChemProvider, Descriptor, FingerprintKind};
use synthyx_common::{Result, SynthyxError};

/// Contribution used for fragments absent from the table.
const UNSEEN_FRAGMENT_SCORE: f64 = -4.0;
/// Sentinel for unparseable input; deliberately outside the nominal [1, 10]
/// range so optimizers can recognize "unscorable".
pub const UNSCORABLE: f64 = 100.0;
// Rescaling constants fitted on the reference compound collection.
const RAW_MIN: f64 = -4.0;
const RAW_MAX: f64 = 2.5;

/// Read-only fragment log-frequency table keyed by radius-2 fragment id.
#[derive(Debug, Clone, Default)]
pub struct FragmentScoreTable {
    scores: HashMap<u64, f64>,
}

#[derive(Debug, Deserialize)]
struct FragmentRow {
    fragment: u64,
    score: f64,
}

impl FragmentScoreTable {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u64, f64)>) -> Self {
        Self {
            scores: pairs.into_iter().collect(),
        }
    }

    /// Load from the versioned CSV artifact (header `fragment,score`).
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut scores = HashMap::new();
        for row in reader.deserialize() {
            let row: FragmentRow = row?;
            scores.insert(row.fragment, row.score);
        }
        if scores.is_empty() {
            return Err(SynthyxError::ArtifactLoad(format!(
                "{}: empty fragment score table",
                path.display()
            )));
        }
        Ok(Self { scores })
    }

    /// Log-frequency contribution of one fragment; unseen fragments get the
    /// rare-fragment default.
    pub fn contribution(&self, fragment: u64) -> f64 {
        self.scores
            .get(&fragment)
            .copied()
            .unwrap_or(UNSEEN_FRAGMENT_SCORE)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

static SHARED_TABLE: OnceCell<Arc<FragmentScoreTable>> = OnceCell::const_new();

/// Synthetic accessibility estimator.
///
/// Stateless after construction; callable concurrently from worker threads.
pub struct SaScorer {
    chem: Arc<dyn ChemProvider>,
    table: Arc<FragmentScoreTable>,
}

impl SaScorer {
    pub fn new(chem: Arc<dyn ChemProvider>, table: Arc<FragmentScoreTable>) -> Self {
        Self { chem, table }
    }

    /// Construct against the process-wide fragment table, fetching the
    /// versioned artifact on first use. Concurrent first callers race to a
    /// single load. A load failure aborts the process with the maintenance
    /// message: no scoring is possible without the table.
    pub async fn shared(chem: Arc<dyn ChemProvider>, store: &ArtifactStore) -> Self {
        let table = SHARED_TABLE
            .get_or_init(|| async {
                match Self::load_table(store).await {
                    Ok(table) => Arc::new(table),
                    Err(err) => abort_on_load_failure(FRAGMENT_SCORES, &err),
                }
            })
            .await
            .clone();
        Self::new(chem, table)
    }

    async fn load_table(store: &ArtifactStore) -> Result<FragmentScoreTable> {
        let path = store.ensure(FRAGMENT_SCORES).await?;
        let table = FragmentScoreTable::load(&path)?;
        info!(
            "Loaded fragment score table ({} fragments) from {:?}",
            table.len(),
            path
        );
        Ok(table)
    }

    /// Difficulty score in [1, 10]; 100.0 for unparseable input.
    pub fn score(&self, smiles: &str) -> f64 {
        match self.score_parsed(smiles) {
            Ok(value) => value,
            Err(_) => {
                debug!("unparseable candidate, returning unscorable sentinel");
                UNSCORABLE
            }
        }
    }

    /// Score a batch of candidates; results line up with the input slice.
    pub fn score_batch(&self, candidates: &[&str]) -> Vec<f64> {
        candidates.iter().map(|smiles| self.score(smiles)).collect()
    }

    fn score_parsed(&self, smiles: &str) -> Result<f64> {
        let canonical = self.chem.canonicalize(smiles)?;
        let fp = self
            .chem
            .fingerprint(&canonical, FingerprintKind::Ecfp4)?;
        let total_fragments = fp.total_count();
        if total_fragments == 0 {
            return Err(SynthyxError::Parse(canonical));
        }

        // fragment score: occurrence-weighted mean of table contributions
        let mut fragment_score = 0.0;
        for (&fragment, &count) in fp.counts() {
            fragment_score += self.table.contribution(fragment) * count as f64;
        }
        fragment_score /= total_fragments as f64;

        let atoms = self.chem.descriptor(&canonical, Descriptor::HeavyAtomCount)?;
        let chiral_centers = self
            .chem
            .descriptor(&canonical, Descriptor::ChiralCenterCount)?;
        let spiro_atoms = self.chem.descriptor(&canonical, Descriptor::SpiroAtomCount)?;
        let bridgeheads = self
            .chem
            .descriptor(&canonical, Descriptor::BridgeheadAtomCount)?;
        let macrocycles = self
            .chem
            .descriptor(&canonical, Descriptor::MacrocycleCount)?;

        let size_penalty = atoms.powf(1.005) - atoms;
        let stereo_penalty = (chiral_centers + 1.0).log10();
        let spiro_penalty = (spiro_atoms + 1.0).log10();
        let bridge_penalty = (bridgeheads + 1.0).log10();
        // flat log10(2) for any macrocycle rather than log10(count + 1),
        // which misbehaves once two or more macrocycles are present
        let macrocycle_penalty = if macrocycles > 0.0 { 2.0f64.log10() } else { 0.0 };
        let complexity_penalty = -size_penalty
            - stereo_penalty
            - spiro_penalty
            - bridge_penalty
            - macrocycle_penalty;

        // symmetry reward: repeated fragments make a molecule easier than
        // its atom count suggests
        let unique_fragments = fp.unique_count() as f64;
        let density_correction = if atoms > unique_fragments {
            0.5 * (atoms / unique_fragments).ln()
        } else {
            0.0
        };

        let raw = fragment_score + complexity_penalty + density_correction;
        let mut score = 11.0 - (raw - RAW_MIN + 1.0) / (RAW_MAX - RAW_MIN) * 9.0;
        if score > 8.0 {
            score = 8.0 + (score - 8.0 + 1.0).ln();
        }
        Ok(score.clamp(1.0, 10.0))
    }
}
