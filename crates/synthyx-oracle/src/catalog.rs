//! Named benchmark objectives.
//!
//! Each profile is configuration, not algorithm: literal reference
//! structures, fixed fingerprint families, and fixed modifier constants
//! assembled into an [`MpoSpec`]. Profiles whose Gaussian centers are
//! properties of a reference compound measure that reference through the
//! provider at construction instead of hardcoding toolkit output.

use synthyx_chem::{ChemProvider, Descriptor, FingerprintKind};
use synthyx_common::Result;

use crate::modifier::ScoreModifier;
use crate::mpo::{MeanKind, Measurement, MpoSpec, SimilarityTarget, SubTerm};

// Reference structures (canonical literature encodings).
const CELECOXIB: &str = "CC1=CC=C(C=C1)C1=CC(=NN1C1=CC=C(C=C1)S(N)(=O)=O)C(F)(F)F";
const TROGLITAZONE: &str = "Cc1c(C)c2OC(C)(COc3ccc(CC4SC(=O)NC4=O)cc3)CCc2c(C)c1O";
const THIOTHIXENE: &str = "CN(C)S(=O)(=O)c1ccc2Sc3ccccc3C(=CCCN4CCN(C)CC4)c2c1";
const ARIPIPRAZOLE: &str = "Clc4cccc(N3CCN(CCCCOc2ccc1c(NC(=O)CC1)c2)CC3)c4Cl";
const ALBUTEROL: &str = "CC(C)(C)NCC(O)c1ccc(O)c(CO)c1";
const MESTRANOL: &str = "COc1ccc2[C@H]3CC[C@@]4(C)[C@@H](CC[C@@]4(O)C#C)[C@@H]3CCc2c1";
const CAMPHOR: &str = "CC1(C)C2CCC1(C)C(=O)C2";
const MENTHOL: &str = "CC(C)C1CCC(C)CC1O";
const TADALAFIL: &str = "O=C1N(CC(N2C1CC3=C(C2C4=CC5=C(OCO5)C=C4)NC6=CC=CC=C36)=O)C";
const SILDENAFIL: &str = "CCCC1=NN(C)C2=C1NC(=NC2=O)C1=CC(=CC=C1OCC)S(=O)(=O)N1CCN(C)CC1";
const OSIMERTINIB: &str = "COc1cc(N(C)CCN(C)C)c(NC(=O)C=C)cc1Nc2nccc(n2)c3cn(C)c4ccccc34";
const FEXOFENADINE: &str = "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4";
const RANOLAZINE: &str = "COc1ccccc1OCC(O)CN2CCN(CC(=O)Nc3c(C)cccc3C)CC2";
const PERINDOPRIL: &str = "O=C(OCC)C(NC(C(=O)N1C(C(=O)O)CC2CCCCC12)C)CCC";
const AMLODIPINE: &str = r"Clc1ccccc1C2C(=C(/N/C(=C2/C(=O)OCC)COCCN)C)\C(=O)OC";
const ZALEPLON: &str = "O=C(C)N(CC)C1=CC=CC(C2=CC=NC3=C(C=NN23)C#N)=C1";
const SITAGLIPTIN: &str = "Fc1cc(c(F)cc1F)CC(N)CC(=O)N3Cc2nnc(n2CC3)C(F)(F)F";
const SITAGLIPTIN_ALT: &str = "NC(CC(=O)N1CCn2c(nnc2C(F)(F)F)C1)Cc1cc(F)c(F)cc1F";
const QUINAZOLINE_PHARMACOPHORE: &str = "CCCOc1cc2ncnc(Nc3ccc4ncsc4c3)c2cc1S(=O)(=O)C(C)(C)C";

// SMARTS patterns for the hopping and valsartan objectives.
const VALSARTAN_SMARTS: &str = "CN(C=O)Cc1ccc(c2ccccc2)cc1";
const SULFONE_DECORATION: &str = "CS([#6])(=O)=O";
const BENZOTHIAZOLE_DECORATION: &str = "[#7]-c1ccc2ncsc2c1";
const QUINAZOLINE_SCAFFOLD: &str = "[#7]-c1n[c;h1]nc2[c;h1]c(-[#8])[c;h0][c;h1]c12";
const EXTENDED_LINKER: &str =
    "[#6]-[#6]-[#6]-[#8]-[#6]~[#6]~[#6]~[#6]~[#6]-[#7]-c1ccc2ncsc2c1";

fn similarity_term(target: &str, kind: FingerprintKind) -> SubTerm {
    SubTerm::new(Measurement::Similarity(SimilarityTarget::new(target, kind)))
}

fn modified_similarity_term(
    target: &str,
    kind: FingerprintKind,
    modifier: ScoreModifier,
) -> SubTerm {
    SubTerm::modified(
        Measurement::Similarity(SimilarityTarget::new(target, kind)),
        modifier,
    )
}

// ── Rediscovery and similarity ───────────────────────────────────────────────

/// Plain Tanimoto similarity to one reference drug.
pub fn rediscovery(name: &str, target: &str, kind: FingerprintKind) -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        name,
        MeanKind::Arithmetic,
        vec![similarity_term(target, kind)],
    ))
}

pub fn celecoxib_rediscovery() -> Result<MpoSpec> {
    rediscovery("celecoxib-rediscovery", CELECOXIB, FingerprintKind::Ecfp4)
}

pub fn troglitazone_rediscovery() -> Result<MpoSpec> {
    rediscovery(
        "troglitazone-rediscovery",
        TROGLITAZONE,
        FingerprintKind::Ecfp4,
    )
}

pub fn thiothixene_rediscovery() -> Result<MpoSpec> {
    rediscovery("thiothixene-rediscovery", THIOTHIXENE, FingerprintKind::Ecfp4)
}

/// Threshold-clipped similarity to one reference drug.
pub fn similarity_objective(
    name: &str,
    target: &str,
    kind: FingerprintKind,
    clip_upper: f64,
) -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        name,
        MeanKind::Arithmetic,
        vec![modified_similarity_term(
            target,
            kind,
            ScoreModifier::clipped_upper(clip_upper)?,
        )],
    ))
}

pub fn aripiprazole_similarity() -> Result<MpoSpec> {
    similarity_objective(
        "aripiprazole-similarity",
        ARIPIPRAZOLE,
        FingerprintKind::Fcfp4,
        0.75,
    )
}

pub fn albuterol_similarity() -> Result<MpoSpec> {
    similarity_objective(
        "albuterol-similarity",
        ALBUTEROL,
        FingerprintKind::Fcfp4,
        0.75,
    )
}

pub fn mestranol_similarity() -> Result<MpoSpec> {
    similarity_objective(
        "mestranol-similarity",
        MESTRANOL,
        FingerprintKind::AtomPair,
        0.75,
    )
}

// ── Median objectives ────────────────────────────────────────────────────────

/// Geometric mean of similarities to two reference structures. When both
/// targets use the same family, the candidate fingerprint is computed once.
pub fn median_objective(
    name: &str,
    target_1: &str,
    target_2: &str,
    kind_1: FingerprintKind,
    kind_2: FingerprintKind,
) -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        name,
        MeanKind::Geometric,
        vec![
            similarity_term(target_1, kind_1),
            similarity_term(target_2, kind_2),
        ],
    ))
}

pub fn median_camphor_menthol() -> Result<MpoSpec> {
    median_objective(
        "median-camphor-menthol",
        CAMPHOR,
        MENTHOL,
        FingerprintKind::Ecfp4,
        FingerprintKind::Ecfp4,
    )
}

pub fn median_tadalafil_sildenafil() -> Result<MpoSpec> {
    median_objective(
        "median-tadalafil-sildenafil",
        TADALAFIL,
        SILDENAFIL,
        FingerprintKind::Ecfp6,
        FingerprintKind::Ecfp6,
    )
}

// ── Multi-property profiles ──────────────────────────────────────────────────

pub fn osimertinib_mpo() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "osimertinib-mpo",
        MeanKind::Geometric,
        vec![
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::Tpsa),
                ScoreModifier::max_gaussian(100.0, 10.0)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::LogP),
                ScoreModifier::min_gaussian(1.0, 1.0)?,
            ),
            modified_similarity_term(
                OSIMERTINIB,
                FingerprintKind::Fcfp4,
                ScoreModifier::clipped_upper(0.8)?,
            ),
            modified_similarity_term(
                OSIMERTINIB,
                FingerprintKind::Ecfp6,
                ScoreModifier::min_gaussian(0.85, 0.1)?,
            ),
        ],
    ))
}

pub fn fexofenadine_mpo() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "fexofenadine-mpo",
        MeanKind::Geometric,
        vec![
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::Tpsa),
                ScoreModifier::max_gaussian(90.0, 10.0)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::LogP),
                ScoreModifier::min_gaussian(4.0, 1.0)?,
            ),
            modified_similarity_term(
                FEXOFENADINE,
                FingerprintKind::AtomPair,
                ScoreModifier::clipped_upper(0.8)?,
            ),
        ],
    ))
}

pub fn ranolazine_mpo() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "ranolazine-mpo",
        MeanKind::Geometric,
        vec![
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::Tpsa),
                ScoreModifier::max_gaussian(95.0, 20.0)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::LogP),
                ScoreModifier::max_gaussian(7.0, 1.0)?,
            ),
            modified_similarity_term(
                RANOLAZINE,
                FingerprintKind::AtomPair,
                ScoreModifier::clipped_upper(0.7)?,
            ),
            SubTerm::modified(
                Measurement::ElementCount("F".to_string()),
                ScoreModifier::gaussian(1.0, 1.0)?,
            ),
        ],
    ))
}

pub fn perindopril_mpo() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "perindopril-mpo",
        MeanKind::Geometric,
        vec![
            similarity_term(PERINDOPRIL, FingerprintKind::Ecfp4),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::AromaticRingCount),
                ScoreModifier::gaussian(2.0, 0.5)?,
            ),
        ],
    ))
}

pub fn amlodipine_mpo() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "amlodipine-mpo",
        MeanKind::Geometric,
        vec![
            similarity_term(AMLODIPINE, FingerprintKind::Ecfp4),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::RingCount),
                ScoreModifier::gaussian(3.0, 0.5)?,
            ),
        ],
    ))
}

pub fn zaleplon_mpo() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "zaleplon-mpo",
        MeanKind::Geometric,
        vec![
            similarity_term(ZALEPLON, FingerprintKind::Ecfp4),
            SubTerm::new(Measurement::Nested(Box::new(MpoSpec::isomer(
                "isomers_c19h17n3o2",
                "C19H17N3O2",
                MeanKind::Geometric,
            )?))),
        ],
    ))
}

/// Sitagliptin MPO. The logP and TPSA windows are centered on the reference
/// compound's own values, measured through the provider at construction.
pub fn sitagliptin_mpo(chem: &dyn ChemProvider) -> Result<MpoSpec> {
    let target_logp = chem.descriptor(SITAGLIPTIN, Descriptor::LogP)?;
    let target_tpsa = chem.descriptor(SITAGLIPTIN, Descriptor::Tpsa)?;
    Ok(MpoSpec::new(
        "sitagliptin-mpo",
        MeanKind::Geometric,
        vec![
            modified_similarity_term(
                SITAGLIPTIN,
                FingerprintKind::Ecfp4,
                ScoreModifier::gaussian(0.0, 0.1)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::LogP),
                ScoreModifier::gaussian(target_logp, 0.2)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::Tpsa),
                ScoreModifier::gaussian(target_tpsa, 5.0)?,
            ),
            SubTerm::new(Measurement::Nested(Box::new(MpoSpec::isomer(
                "isomers_c16h15f6n5o",
                "C16H15F6N5O",
                MeanKind::Geometric,
            )?))),
        ],
    ))
}

/// Valsartan SMARTS objective: require the valsartan core while matching
/// sitagliptin's physicochemical profile (measured at construction).
pub fn valsartan_smarts(chem: &dyn ChemProvider) -> Result<MpoSpec> {
    let target_logp = chem.descriptor(SITAGLIPTIN_ALT, Descriptor::LogP)?;
    let target_tpsa = chem.descriptor(SITAGLIPTIN_ALT, Descriptor::Tpsa)?;
    let target_bertz = chem.descriptor(SITAGLIPTIN_ALT, Descriptor::BertzComplexity)?;
    Ok(MpoSpec::new(
        "valsartan-smarts",
        MeanKind::Geometric,
        vec![
            SubTerm::new(Measurement::Smarts {
                pattern: VALSARTAN_SMARTS.to_string(),
                inverse: false,
            }),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::Tpsa),
                ScoreModifier::gaussian(target_tpsa, 5.0)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::LogP),
                ScoreModifier::gaussian(target_logp, 0.2)?,
            ),
            SubTerm::modified(
                Measurement::Descriptor(Descriptor::BertzComplexity),
                ScoreModifier::gaussian(target_bertz, 30.0)?,
            ),
        ],
    ))
}

// ── Hopping objectives ───────────────────────────────────────────────────────

/// Keep the quinazoline scaffold, replace both decorations.
pub fn deco_hop() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "deco-hop",
        MeanKind::Arithmetic,
        vec![
            modified_similarity_term(
                QUINAZOLINE_PHARMACOPHORE,
                FingerprintKind::Ecfp4,
                ScoreModifier::clipped_upper(0.85)?,
            ),
            SubTerm::new(Measurement::Smarts {
                pattern: SULFONE_DECORATION.to_string(),
                inverse: true,
            }),
            SubTerm::new(Measurement::Smarts {
                pattern: BENZOTHIAZOLE_DECORATION.to_string(),
                inverse: true,
            }),
            SubTerm::new(Measurement::Smarts {
                pattern: QUINAZOLINE_SCAFFOLD.to_string(),
                inverse: false,
            }),
        ],
    ))
}

/// Keep the decorated linker, replace the quinazoline scaffold.
pub fn scaffold_hop() -> Result<MpoSpec> {
    Ok(MpoSpec::new(
        "scaffold-hop",
        MeanKind::Arithmetic,
        vec![
            modified_similarity_term(
                QUINAZOLINE_PHARMACOPHORE,
                FingerprintKind::Ecfp4,
                ScoreModifier::clipped_upper(0.75)?,
            ),
            SubTerm::new(Measurement::Smarts {
                pattern: EXTENDED_LINKER.to_string(),
                inverse: false,
            }),
            SubTerm::new(Measurement::Smarts {
                pattern: QUINAZOLINE_SCAFFOLD.to_string(),
                inverse: true,
            }),
        ],
    ))
}

// ── Isomer profiles ──────────────────────────────────────────────────────────

pub fn isomers_c7h8n2o2() -> Result<MpoSpec> {
    MpoSpec::isomer("isomers_c7h8n2o2", "C7H8N2O2", MeanKind::Geometric)
}

pub fn isomers_c9h10n2o2pf2cl() -> Result<MpoSpec> {
    MpoSpec::isomer(
        "isomers_c9h10n2o2pf2cl",
        "C9H10N2O2PF2Cl",
        MeanKind::Geometric,
    )
}

pub fn isomers_c11h24() -> Result<MpoSpec> {
    MpoSpec::isomer("isomers_c11h24", "C11H24", MeanKind::Geometric)
}

/// Every named objective, constructed against one provider.
pub fn standard_catalog(chem: &dyn ChemProvider) -> Result<Vec<MpoSpec>> {
    Ok(vec![
        celecoxib_rediscovery()?,
        troglitazone_rediscovery()?,
        thiothixene_rediscovery()?,
        aripiprazole_similarity()?,
        albuterol_similarity()?,
        mestranol_similarity()?,
        median_camphor_menthol()?,
        median_tadalafil_sildenafil()?,
        osimertinib_mpo()?,
        fexofenadine_mpo()?,
        ranolazine_mpo()?,
        perindopril_mpo()?,
        amlodipine_mpo()?,
        zaleplon_mpo()?,
        sitagliptin_mpo(chem)?,
        valsartan_smarts(chem)?,
        deco_hop()?,
        scaffold_hop()?,
        isomers_c7h8n2o2()?,
        isomers_c9h10n2o2pf2cl()?,
        isomers_c11h24()?,
    ])
}
