//! Molecular formula parsing for isomer objectives.

use std::sync::OnceLock;

use regex::Regex;
use synthyx_common::{Result, SynthyxError};

fn formula_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // One uppercase letter, optional lowercase tail, optional count
        Regex::new(r"([A-Z][a-z]*)(\d*)").unwrap()
    })
}

/// Parse a molecular formula such as "C8H3F3Br" into (element, count)
/// pairs. A missing count means 1. Input with characters left over after
/// tokenization (a leading lowercase letter, stray punctuation) is a
/// `Formula` error.
pub fn parse_molecular_formula(formula: &str) -> Result<Vec<(String, u32)>> {
    let mut parts = Vec::new();
    let mut consumed = 0usize;
    for captures in formula_token_regex().captures_iter(formula) {
        let (Some(token), Some(element)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if token.start() != consumed {
            return Err(SynthyxError::Formula(formula.to_string()));
        }
        consumed = token.end();
        let count = match captures.get(2).map(|m| m.as_str()) {
            Some("") | None => 1,
            Some(digits) => digits
                .parse()
                .map_err(|_| SynthyxError::Formula(formula.to_string()))?,
        };
        parts.push((element.as_str().to_string(), count));
    }
    if parts.is_empty() || consumed != formula.len() {
        return Err(SynthyxError::Formula(formula.to_string()));
    }
    Ok(parts)
}

/// Total atom count of a parsed formula.
pub fn total_atoms(parts: &[(String, u32)]) -> u32 {
    parts.iter().map(|(_, count)| count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_formula() {
        let parts = parse_molecular_formula("C2H6").unwrap();
        assert_eq!(
            parts,
            vec![("C".to_string(), 2), ("H".to_string(), 6)]
        );
        assert_eq!(total_atoms(&parts), 8);
    }

    #[test]
    fn test_missing_count_defaults_to_one() {
        let parts = parse_molecular_formula("C8H3F3Br").unwrap();
        assert_eq!(
            parts,
            vec![
                ("C".to_string(), 8),
                ("H".to_string(), 3),
                ("F".to_string(), 3),
                ("Br".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_two_letter_elements() {
        let parts = parse_molecular_formula("C16H15F6N5O").unwrap();
        assert_eq!(total_atoms(&parts), 43);
        let parts = parse_molecular_formula("Cl2").unwrap();
        assert_eq!(parts, vec![("Cl".to_string(), 2)]);
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        assert!(matches!(
            parse_molecular_formula(""),
            Err(SynthyxError::Formula(_))
        ));
        // leading lowercase never matches a token
        assert!(parse_molecular_formula("c2").is_err());
        // trailing garbage after valid tokens
        assert!(parse_molecular_formula("C2h").is_err());
        assert!(parse_molecular_formula("C2 H6").is_err());
    }
}
