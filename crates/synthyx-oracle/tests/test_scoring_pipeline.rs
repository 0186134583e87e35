//! End-to-end scoring pipeline: objectives, synthetic accessibility, and
//! retrosynthesis interpretation working over one candidate pool.

use std::sync::Arc;

use synthyx_chem::{Descriptor, FingerprintKind, MockChem};
use synthyx_oracle::catalog;
use synthyx_oracle::{
    analyze_tree, FragmentScoreTable, MeanKind, Measurement, MpoSpec, RetroResult, SaScorer,
    ScoreModifier, SimilarityTarget, SubTerm,
};

fn pool_chem() -> MockChem {
    MockChem::new()
        .with_invalid("C1CC(")
        .with_alias("OCC", "CCO")
        .with_descriptor("CCO", Descriptor::Tpsa, 20.2)
        .with_descriptor("CCO", Descriptor::LogP, -0.3)
        .with_descriptor("CCO", Descriptor::HeavyAtomCount, 3.0)
        .with_fingerprint("CCO", FingerprintKind::Ecfp4, &[(10, 1), (11, 2)])
        .with_descriptor("CCCCO", Descriptor::Tpsa, 20.2)
        .with_descriptor("CCCCO", Descriptor::LogP, 0.9)
        .with_descriptor("CCCCO", Descriptor::HeavyAtomCount, 5.0)
        .with_fingerprint("CCCCO", FingerprintKind::Ecfp4, &[(10, 1), (11, 2), (12, 2)])
}

#[test]
fn test_objective_ranks_a_candidate_pool() {
    let chem = pool_chem();
    let objective = MpoSpec::new(
        "alcohol-likeness",
        MeanKind::Geometric,
        vec![
            SubTerm::new(Measurement::Similarity(SimilarityTarget::new(
                "CCO",
                FingerprintKind::Ecfp4,
            ))),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::LogP),
                ScoreModifier::min_gaussian(0.0, 1.0).unwrap(),
            ),
        ],
    );

    let scores = objective.evaluate_batch(&chem, &["CCO", "CCCCO", "C1CC("]);
    // the reference itself wins, the longer homolog trails, garbage floors
    assert!((scores[0] - 1.0).abs() < 1e-12);
    assert!(scores[1] > 0.0 && scores[1] < scores[0]);
    assert_eq!(scores[2], 0.0);
}

#[test]
fn test_alias_encodings_score_identically_everywhere() {
    let chem = Arc::new(pool_chem());
    let sa = SaScorer::new(
        chem.clone(),
        Arc::new(FragmentScoreTable::from_pairs([(10, 0.8), (11, -1.2)])),
    );
    let rediscovery = catalog::rediscovery("ethanol", "CCO", FingerprintKind::Ecfp4).unwrap();

    assert_eq!(sa.score("CCO"), sa.score("OCC"));
    assert_eq!(
        rediscovery.evaluate(chem.as_ref(), "CCO"),
        rediscovery.evaluate(chem.as_ref(), "OCC")
    );
    assert_eq!(sa.score("C1CC("), 100.0);
}

#[test]
fn test_sa_scores_stay_in_range_across_the_pool() {
    let chem = Arc::new(pool_chem());
    let sa = SaScorer::new(
        chem.clone(),
        Arc::new(FragmentScoreTable::from_pairs([(10, 0.8), (11, -1.2)])),
    );
    for score in sa.score_batch(&["CCO", "CCCCO"]) {
        assert!((1.0..=10.0).contains(&score), "got {}", score);
    }
}

#[test]
fn test_full_catalog_evaluates_the_pool() {
    let chem = pool_chem();
    for spec in catalog::standard_catalog(&chem).unwrap() {
        for candidate in ["CCO", "CCCCO"] {
            let score = spec.evaluate(&chem, candidate);
            assert!(
                score.is_finite() && score >= 0.0,
                "{} scored {} for {}",
                spec.name(),
                score,
                candidate
            );
        }
    }
}

#[test]
fn test_retro_interpretation_of_planner_responses() {
    let purchasable: RetroResult = serde_json::from_value(serde_json::json!({
        "price": 2.5
    }))
    .unwrap();
    assert_eq!(analyze_tree(&purchasable).num_steps, 0);

    let routed: RetroResult = serde_json::from_value(serde_json::json!({
        "trees": [
            {"ppg": 0, "children": [
                {"plausibility": 0.85, "children": [
                    {"ppg": 4.0, "children": []},
                    {"ppg": 6.0, "children": []}
                ]}
            ]}
        ]
    }))
    .unwrap();
    let analysis = analyze_tree(&routed);
    assert_eq!(analysis.num_steps, 1);
    assert_eq!(analysis.synthesizability, 1);
    assert!((analysis.plausibility - 0.85).abs() < 1e-12);
    assert_eq!(analysis.price, 10.0);

    let failed: RetroResult = serde_json::from_value(serde_json::json!({
        "error": {"type": "worker-lost"}
    }))
    .unwrap();
    let sentinel = analyze_tree(&failed);
    assert_eq!(sentinel.num_paths, -1);
    assert_eq!(sentinel.num_steps, 11);
    assert_eq!(sentinel.synthesizability, -1);
}
