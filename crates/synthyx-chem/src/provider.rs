//! Trait for chemistry toolkit access.
//!
//! Provides an abstraction over the structure-handling toolkit, allowing
//! the oracles to fingerprint and profile candidates without being tightly
//! coupled to any particular backend.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::{Hash, Hasher};

use synthyx_common::{Result, SynthyxError};

use crate::descriptor::Descriptor;
use crate::fingerprint::{Fingerprint, FingerprintKind};

/// Access to structure parsing, fingerprinting, and descriptor computation.
///
/// Implementations can use:
/// - RDKit over FFI (production)
/// - A remote chemistry service
/// - Deterministic in-memory data (testing)
pub trait ChemProvider: Send + Sync {
    /// Parse a structure string and return its canonical form.
    ///
    /// Returns `SynthyxError::Parse` for invalid input. Callers never
    /// propagate that error to the optimizer loop; every public scoring
    /// entry point substitutes its documented fallback value instead.
    fn canonicalize(&self, smiles: &str) -> Result<String>;

    /// Compute a sparse count fingerprint of the given family.
    fn fingerprint(&self, smiles: &str, kind: FingerprintKind) -> Result<Fingerprint>;

    /// Tanimoto similarity between two same-family fingerprints, in [0, 1].
    fn similarity(&self, a: &Fingerprint, b: &Fingerprint) -> Result<f64> {
        a.tanimoto(b)
    }

    /// Compute a named scalar descriptor.
    fn descriptor(&self, smiles: &str, descriptor: Descriptor) -> Result<f64>;

    /// Count atoms of one element, hydrogens included.
    fn element_count(&self, smiles: &str, element: &str) -> Result<f64>;

    /// Evaluate a substructure pattern match.
    fn substructure_match(&self, smiles: &str, smarts: &str) -> Result<bool>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Deterministic in-memory provider for unit tests.
///
/// Canonicalization goes through an alias table, so two textual encodings of
/// the same structure can be registered as one molecule. Fingerprints fall
/// back to hashed character bigrams of the canonical form when none is
/// registered, so similarity is exercisable without wiring every value by
/// hand. Unregistered descriptors, element counts, and pattern matches
/// default to zero / no-match.
#[derive(Debug, Default)]
pub struct MockChem {
    aliases: HashMap<String, String>,
    invalid: HashSet<String>,
    descriptors: HashMap<(String, Descriptor), f64>,
    elements: HashMap<(String, String), f64>,
    fingerprints: HashMap<(String, FingerprintKind), Fingerprint>,
    matches: HashMap<(String, String), bool>,
}

impl MockChem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a non-canonical encoding of an existing structure.
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.insert(alias.to_string(), canonical.to_string());
        self
    }

    /// Register a string that fails to parse.
    pub fn with_invalid(mut self, smiles: &str) -> Self {
        self.invalid.insert(smiles.to_string());
        self
    }

    pub fn with_descriptor(mut self, smiles: &str, descriptor: Descriptor, value: f64) -> Self {
        self.descriptors.insert((smiles.to_string(), descriptor), value);
        self
    }

    pub fn with_element(mut self, smiles: &str, element: &str, count: f64) -> Self {
        self.elements
            .insert((smiles.to_string(), element.to_string()), count);
        self
    }

    pub fn with_fingerprint(
        mut self,
        smiles: &str,
        kind: FingerprintKind,
        pairs: &[(u64, u32)],
    ) -> Self {
        let counts: BTreeMap<u64, u32> = pairs.iter().copied().collect();
        self.fingerprints
            .insert((smiles.to_string(), kind), Fingerprint::new(kind, counts));
        self
    }

    pub fn with_match(mut self, smiles: &str, smarts: &str, hit: bool) -> Self {
        self.matches
            .insert((smiles.to_string(), smarts.to_string()), hit);
        self
    }

    /// Hashed-bigram fallback fingerprint of the canonical form. Stable
    /// across calls, distinct per family.
    fn bigram_fingerprint(canonical: &str, kind: FingerprintKind) -> Fingerprint {
        let mut counts: BTreeMap<u64, u32> = BTreeMap::new();
        let chars: Vec<char> = canonical.chars().collect();
        if chars.len() < 2 {
            *counts.entry(hash_fragment(canonical, kind)).or_insert(0) += 1;
        } else {
            for window in chars.windows(2) {
                let bigram: String = window.iter().collect();
                *counts.entry(hash_fragment(&bigram, kind)).or_insert(0) += 1;
            }
        }
        Fingerprint::new(kind, counts)
    }
}

fn hash_fragment(fragment: &str, kind: FingerprintKind) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    kind.as_str().hash(&mut hasher);
    fragment.hash(&mut hasher);
    hasher.finish()
}

impl ChemProvider for MockChem {
    fn canonicalize(&self, smiles: &str) -> Result<String> {
        if smiles.is_empty() || self.invalid.contains(smiles) {
            return Err(SynthyxError::Parse(smiles.to_string()));
        }
        Ok(self
            .aliases
            .get(smiles)
            .cloned()
            .unwrap_or_else(|| smiles.to_string()))
    }

    fn fingerprint(&self, smiles: &str, kind: FingerprintKind) -> Result<Fingerprint> {
        let canonical = self.canonicalize(smiles)?;
        if let Some(fp) = self.fingerprints.get(&(canonical.clone(), kind)) {
            return Ok(fp.clone());
        }
        Ok(Self::bigram_fingerprint(&canonical, kind))
    }

    fn descriptor(&self, smiles: &str, descriptor: Descriptor) -> Result<f64> {
        let canonical = self.canonicalize(smiles)?;
        Ok(self
            .descriptors
            .get(&(canonical, descriptor))
            .copied()
            .unwrap_or(0.0))
    }

    fn element_count(&self, smiles: &str, element: &str) -> Result<f64> {
        let canonical = self.canonicalize(smiles)?;
        Ok(self
            .elements
            .get(&(canonical, element.to_string()))
            .copied()
            .unwrap_or(0.0))
    }

    fn substructure_match(&self, smiles: &str, smarts: &str) -> Result<bool> {
        let canonical = self.canonicalize(smiles)?;
        Ok(self
            .matches
            .get(&(canonical, smarts.to_string()))
            .copied()
            .unwrap_or(false))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_resolves_aliases() {
        let chem = MockChem::new().with_alias("OCC", "CCO");
        assert_eq!(chem.canonicalize("OCC").unwrap(), "CCO");
        assert_eq!(chem.canonicalize("CCO").unwrap(), "CCO");
    }

    #[test]
    fn test_invalid_input_is_parse_error() {
        let chem = MockChem::new().with_invalid("not-a-molecule");
        assert!(matches!(
            chem.canonicalize("not-a-molecule"),
            Err(SynthyxError::Parse(_))
        ));
        assert!(chem.canonicalize("").is_err());
        assert!(chem.fingerprint("", FingerprintKind::Ecfp4).is_err());
        assert!(chem.descriptor("", Descriptor::LogP).is_err());
    }

    #[test]
    fn test_alias_shares_fingerprint() {
        let chem = MockChem::new().with_alias("OCC", "CCO");
        let a = chem.fingerprint("OCC", FingerprintKind::Ecfp4).unwrap();
        let b = chem.fingerprint("CCO", FingerprintKind::Ecfp4).unwrap();
        assert_eq!(a, b);
        assert!((chem.similarity(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_families_do_not_collide() {
        let chem = MockChem::new();
        let a = chem.fingerprint("CCO", FingerprintKind::Ecfp4).unwrap();
        let b = chem.fingerprint("CCO", FingerprintKind::AtomPair).unwrap();
        assert!(chem.similarity(&a, &b).is_err());
    }

    #[test]
    fn test_registered_fingerprint_wins_over_fallback() {
        let chem = MockChem::new().with_fingerprint("CCO", FingerprintKind::Ecfp4, &[(5, 2)]);
        let fp = chem.fingerprint("CCO", FingerprintKind::Ecfp4).unwrap();
        assert_eq!(fp.counts().get(&5), Some(&2));
        assert_eq!(fp.unique_count(), 1);
    }

    #[test]
    fn test_unregistered_lookups_default_to_zero() {
        let chem = MockChem::new().with_descriptor("CCO", Descriptor::LogP, -0.3);
        assert_eq!(chem.descriptor("CCO", Descriptor::LogP).unwrap(), -0.3);
        assert_eq!(chem.descriptor("CCO", Descriptor::Tpsa).unwrap(), 0.0);
        assert_eq!(chem.element_count("CCO", "N").unwrap(), 0.0);
        assert!(!chem.substructure_match("CCO", "[OH]").unwrap());
    }
}
