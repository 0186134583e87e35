//! Single-property oracles.

use synthyx_chem::{ChemProvider, Descriptor};

use crate::sa::SaScorer;

// Normalization constants for penalized logP, fitted on the reference
// training collection.
const LOGP_MEAN: f64 = 2.457_095_339_619_012_3;
const LOGP_STD: f64 = 1.434_324_401_111_988;
const SA_MEAN: f64 = -3.052_581_129_316_613_4;
const SA_STD: f64 = 0.833_520_702_451_309_5;
const CYCLE_MEAN: f64 = -0.048_569_687_640_305_3;
const CYCLE_STD: f64 = 0.286_021_211_024_545_5;

/// Drug-likeness (QED) of a candidate; 0.0 for unparseable input.
pub fn qed(chem: &dyn ChemProvider, smiles: &str) -> f64 {
    chem.descriptor(smiles, Descriptor::Qed).unwrap_or(0.0)
}

/// Octanol-water partition coefficient; 0.0 for unparseable input.
pub fn logp(chem: &dyn ChemProvider, smiles: &str) -> f64 {
    chem.descriptor(smiles, Descriptor::LogP).unwrap_or(0.0)
}

/// Penalized logP: normalized logP plus normalized negated synthetic
/// accessibility plus normalized cycle score. Rings up to six atoms incur
/// no cycle penalty; each extra atom in the largest ring counts against.
/// Returns −100.0 for unparseable input.
pub fn penalized_logp(chem: &dyn ChemProvider, sa: &SaScorer, smiles: &str) -> f64 {
    let Ok(log_p) = chem.descriptor(smiles, Descriptor::LogP) else {
        return -100.0;
    };
    let Ok(largest_ring) = chem.descriptor(smiles, Descriptor::LargestRingSize) else {
        return -100.0;
    };
    let sa_score = -sa.score(smiles);
    let cycle_score = -(largest_ring - 6.0).max(0.0);

    (log_p - LOGP_MEAN) / LOGP_STD
        + (sa_score - SA_MEAN) / SA_STD
        + (cycle_score - CYCLE_MEAN) / CYCLE_STD
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use synthyx_chem::{FingerprintKind, MockChem};

    use crate::sa::FragmentScoreTable;

    fn scorer(chem: &Arc<MockChem>) -> SaScorer {
        SaScorer::new(
            chem.clone(),
            Arc::new(FragmentScoreTable::from_pairs([(1, 0.0)])),
        )
    }

    #[test]
    fn test_qed_and_logp_passthrough() {
        let chem = MockChem::new()
            .with_descriptor("CCO", Descriptor::Qed, 0.41)
            .with_descriptor("CCO", Descriptor::LogP, -0.3)
            .with_invalid("bad");
        assert_eq!(qed(&chem, "CCO"), 0.41);
        assert_eq!(logp(&chem, "CCO"), -0.3);
        assert_eq!(qed(&chem, "bad"), 0.0);
        assert_eq!(logp(&chem, "bad"), 0.0);
    }

    #[test]
    fn test_penalized_logp_matches_hand_computation() {
        let chem = Arc::new(
            MockChem::new()
                .with_descriptor("CCO", Descriptor::LogP, 2.0)
                .with_descriptor("CCO", Descriptor::LargestRingSize, 8.0)
                .with_fingerprint("CCO", FingerprintKind::Ecfp4, &[(1, 1)])
                .with_descriptor("CCO", Descriptor::HeavyAtomCount, 1.0),
        );
        let sa = scorer(&chem);

        let sa_value = -sa.score("CCO");
        let expected = (2.0 - LOGP_MEAN) / LOGP_STD
            + (sa_value - SA_MEAN) / SA_STD
            + (-2.0 - CYCLE_MEAN) / CYCLE_STD;
        let actual = penalized_logp(chem.as_ref(), &sa, "CCO");
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn test_small_rings_incur_no_cycle_penalty() {
        let chem = Arc::new(
            MockChem::new()
                .with_descriptor("C1CCCCC1", Descriptor::LogP, 2.0)
                .with_descriptor("C1CCCCC1", Descriptor::LargestRingSize, 6.0)
                .with_fingerprint("C1CCCCC1", FingerprintKind::Ecfp4, &[(1, 1)])
                .with_descriptor("C1CCCCC1", Descriptor::HeavyAtomCount, 1.0),
        );
        let sa = scorer(&chem);

        let sa_value = -sa.score("C1CCCCC1");
        let expected = (2.0 - LOGP_MEAN) / LOGP_STD
            + (sa_value - SA_MEAN) / SA_STD
            + (0.0 - CYCLE_MEAN) / CYCLE_STD;
        let actual = penalized_logp(chem.as_ref(), &sa, "C1CCCCC1");
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_floor() {
        let chem = Arc::new(MockChem::new().with_invalid("x(x(x"));
        let sa = scorer(&chem);
        assert_eq!(penalized_logp(chem.as_ref(), &sa, "x(x(x"), -100.0);
    }
}
