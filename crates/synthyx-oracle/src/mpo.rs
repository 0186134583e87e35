//! Multi-property objective evaluation.
//!
//! An objective is an ordered list of sub-terms, each pairing a raw
//! measurement with an optional score modifier, combined with a geometric
//! or arithmetic mean. Sub-term order is fixed at construction and
//! preserved during evaluation so floating-point summation order is
//! reproducible.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use synthyx_chem::{ChemProvider, Descriptor, Fingerprint, FingerprintKind};
use synthyx_common::Result;

use crate::formula::{parse_molecular_formula, total_atoms};
use crate::modifier::ScoreModifier;

/// Aggregation mode over sub-term outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeanKind {
    Geometric,
    Arithmetic,
}

impl MeanKind {
    /// Combine sub-scores into the final objective value.
    ///
    /// An empty list is a defined no-op returning NaN rather than a crash.
    /// The geometric mean requires non-negative inputs: a zero yields 0.0,
    /// a negative input yields NaN. Bounded [0, 1] modifiers on every
    /// sub-term keep both means well-behaved.
    pub fn combine(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return f64::NAN;
        }
        match self {
            MeanKind::Arithmetic => scores.iter().sum::<f64>() / scores.len() as f64,
            MeanKind::Geometric => {
                let log_mean = scores.iter().map(|s| s.ln()).sum::<f64>() / scores.len() as f64;
                log_mean.exp()
            }
        }
    }
}

/// An immutable reference fingerprint derived from a literal reference
/// structure. The fingerprint is computed once on first use and cached for
/// the process lifetime.
#[derive(Debug)]
pub struct SimilarityTarget {
    smiles: String,
    kind: FingerprintKind,
    fingerprint: OnceLock<Fingerprint>,
}

impl SimilarityTarget {
    pub fn new(smiles: &str, kind: FingerprintKind) -> Self {
        Self {
            smiles: smiles.to_string(),
            kind,
            fingerprint: OnceLock::new(),
        }
    }

    pub fn kind(&self) -> FingerprintKind {
        self.kind
    }

    pub fn smiles(&self) -> &str {
        &self.smiles
    }

    /// The cached reference fingerprint. References are catalog literals,
    /// so a parse failure here is a provider defect, not a candidate
    /// problem, and propagates as an error.
    pub fn fingerprint(&self, chem: &dyn ChemProvider) -> Result<&Fingerprint> {
        if let Some(fp) = self.fingerprint.get() {
            return Ok(fp);
        }
        let fp = chem.fingerprint(&self.smiles, self.kind)?;
        Ok(self.fingerprint.get_or_init(|| fp))
    }
}

/// The raw quantity a sub-term measures before modification.
#[derive(Debug)]
pub enum Measurement {
    /// Tanimoto similarity against a cached reference fingerprint.
    Similarity(SimilarityTarget),
    /// A named scalar descriptor.
    Descriptor(Descriptor),
    /// Atom count for one element, hydrogens included.
    ElementCount(String),
    /// Substructure match mapped to {0, 1}; `inverse` flips the mapping.
    Smarts { pattern: String, inverse: bool },
    /// Total atom count of the candidate, hydrogens included.
    TotalAtoms,
    /// A nested objective evaluated as one sub-term (isomer terms inside a
    /// larger objective).
    Nested(Box<MpoSpec>),
}

/// One sub-term of an objective: a measurement plus an optional modifier.
#[derive(Debug)]
pub struct SubTerm {
    measurement: Measurement,
    modifier: Option<ScoreModifier>,
}

impl SubTerm {
    pub fn new(measurement: Measurement) -> Self {
        Self {
            measurement,
            modifier: None,
        }
    }

    pub fn modified(measurement: Measurement, modifier: ScoreModifier) -> Self {
        Self {
            measurement,
            modifier: Some(modifier),
        }
    }

    /// Score substituted when the candidate fails to parse or measure: the
    /// worst value of the bounded [0, 1] modifiers used as sub-terms.
    fn fallback(&self) -> f64 {
        0.0
    }
}

/// A named multi-property objective.
#[derive(Debug)]
pub struct MpoSpec {
    name: String,
    mean: MeanKind,
    terms: Vec<SubTerm>,
}

impl MpoSpec {
    pub fn new(name: &str, mean: MeanKind, terms: Vec<SubTerm>) -> Self {
        Self {
            name: name.to_string(),
            mean,
            terms,
        }
    }

    /// Isomer objective for a molecular formula: one Gaussian term per
    /// element count (sigma 1.0) plus one for the total atom count
    /// (sigma 2.0). A malformed formula fails at construction.
    pub fn isomer(name: &str, formula: &str, mean: MeanKind) -> Result<Self> {
        let parts = parse_molecular_formula(formula)?;
        let total = total_atoms(&parts);
        let mut terms = Vec::with_capacity(parts.len() + 1);
        for (element, count) in parts {
            terms.push(SubTerm::modified(
                Measurement::ElementCount(element),
                ScoreModifier::gaussian(count as f64, 1.0)?,
            ));
        }
        terms.push(SubTerm::modified(
            Measurement::TotalAtoms,
            ScoreModifier::gaussian(total as f64, 2.0)?,
        ));
        Ok(Self::new(name, mean, terms))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mean(&self) -> MeanKind {
        self.mean
    }

    pub fn terms(&self) -> &[SubTerm] {
        &self.terms
    }

    /// Evaluate one candidate. Total over arbitrary input: an unparseable
    /// candidate scores the fallback on every sub-term.
    pub fn evaluate(&self, chem: &dyn ChemProvider, smiles: &str) -> f64 {
        if chem.canonicalize(smiles).is_err() {
            debug!(objective = %self.name, "unparseable candidate, scoring fallback");
            let scores: Vec<f64> = self.terms.iter().map(|t| t.fallback()).collect();
            return self.mean.combine(&scores);
        }

        // Candidate fingerprints are shared across sub-terms of the same
        // family within one evaluation.
        let mut fingerprints: HashMap<FingerprintKind, Fingerprint> = HashMap::new();
        let mut scores = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            let raw = match measure(&term.measurement, chem, smiles, &mut fingerprints) {
                Ok(value) => value,
                Err(_) => {
                    scores.push(term.fallback());
                    continue;
                }
            };
            scores.push(match &term.modifier {
                Some(modifier) => modifier.apply(raw),
                None => raw,
            });
        }
        self.mean.combine(&scores)
    }

    /// Score a batch of candidates. No ordering requirement exists across
    /// candidates; results line up with the input slice.
    pub fn evaluate_batch(&self, chem: &dyn ChemProvider, candidates: &[&str]) -> Vec<f64> {
        candidates
            .iter()
            .map(|smiles| self.evaluate(chem, smiles))
            .collect()
    }
}

fn measure(
    measurement: &Measurement,
    chem: &dyn ChemProvider,
    smiles: &str,
    fingerprints: &mut HashMap<FingerprintKind, Fingerprint>,
) -> Result<f64> {
    match measurement {
        Measurement::Similarity(target) => {
            let kind = target.kind();
            if !fingerprints.contains_key(&kind) {
                let fp = chem.fingerprint(smiles, kind)?;
                fingerprints.insert(kind, fp);
            }
            let candidate_fp = &fingerprints[&kind];
            chem.similarity(candidate_fp, target.fingerprint(chem)?)
        }
        Measurement::Descriptor(descriptor) => chem.descriptor(smiles, *descriptor),
        Measurement::ElementCount(element) => chem.element_count(smiles, element),
        Measurement::Smarts { pattern, inverse } => {
            let hit = chem.substructure_match(smiles, pattern)?;
            Ok(if hit != *inverse { 1.0 } else { 0.0 })
        }
        Measurement::TotalAtoms => chem.descriptor(smiles, Descriptor::TotalAtomCount),
        Measurement::Nested(spec) => Ok(spec.evaluate(chem, smiles)),
    }
}
