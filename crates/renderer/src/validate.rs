//! Structural comparison of section-name sequences
//!
//! Pure comparison of a generated sequence against a reference grammar.
//! Never raises; an empty report means exact match.

use serde::{Deserialize, Serialize};

/// Differences between a generated section sequence and the reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDiff {
    /// Reference sections absent from the generated sequence
    pub missing: Vec<String>,
    /// Generated sections absent from the reference
    pub extra: Vec<String>,
    /// Sections present in both but out of relative order
    pub out_of_order: Vec<String>,
}

impl SectionDiff {
    /// True when the sequences match exactly
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.out_of_order.is_empty()
    }
}

/// Compare a generated section sequence against a reference grammar
#[must_use]
pub fn diff_sections(generated: &[String], reference: &[&str]) -> SectionDiff {
    let missing = reference
        .iter()
        .filter(|name| !generated.iter().any(|g| g == *name))
        .map(|name| (*name).to_string())
        .collect();

    let extra = generated
        .iter()
        .filter(|name| !reference.contains(&name.as_str()))
        .cloned()
        .collect();

    // Walk the common sections in generated order; any section whose
    // reference position steps backwards is out of order
    let mut out_of_order = Vec::new();
    let mut last_index = None;
    for name in generated {
        let Some(index) = reference.iter().position(|r| r == name) else {
            continue;
        };
        if let Some(last) = last_index {
            if index < last {
                out_of_order.push(name.clone());
                continue; // keep the previous high-water mark
            }
        }
        last_index = Some(index);
    }

    SectionDiff {
        missing,
        extra,
        out_of_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SECTION_GRAMMAR;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_empty_report() {
        let generated = names(&SECTION_GRAMMAR);
        let diff = diff_sections(&generated, &SECTION_GRAMMAR);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_missing_section_reported() {
        let generated = names(&["Brand Identity", "Color"]);
        let diff = diff_sections(&generated, &["Brand Identity", "Tone of Voice", "Color"]);
        assert_eq!(diff.missing, vec!["Tone of Voice"]);
        assert!(diff.extra.is_empty());
        assert!(diff.out_of_order.is_empty());
    }

    #[test]
    fn test_extra_section_reported() {
        let generated = names(&["Brand Identity", "Appendix", "Color"]);
        let diff = diff_sections(&generated, &["Brand Identity", "Color"]);
        assert_eq!(diff.extra, vec!["Appendix"]);
        assert!(diff.missing.is_empty());
    }

    #[test]
    fn test_out_of_order_reported() {
        let generated = names(&["Color", "Brand Identity", "Typography"]);
        let diff = diff_sections(&generated, &["Brand Identity", "Color", "Typography"]);
        assert_eq!(diff.out_of_order, vec!["Brand Identity"]);
        assert!(diff.missing.is_empty());
        assert!(diff.extra.is_empty());
    }

    #[test]
    fn test_never_raises_on_empty_inputs() {
        let diff = diff_sections(&[], &[]);
        assert!(diff.is_empty());
        let diff = diff_sections(&[], &SECTION_GRAMMAR);
        assert_eq!(diff.missing.len(), SECTION_GRAMMAR.len());
    }
}
