//! Confidence scoring
//!
//! Pure functions mapping raw signal strength to the totally-ordered
//! confidence tag. These are the only sources of the levels consumed by
//! the normalizer's tie-breaks, so the thresholds live in one place.

use brand_extract_common::ConfidenceLevel;

/// Score a palette extraction from the dominant cluster's pixel share.
///
/// A degenerate image (single populated cluster) is capped at low: one
/// cluster says nothing about a palette.
#[must_use]
pub fn palette_confidence(dominant_share: f32, cluster_count: usize) -> ConfidenceLevel {
    if cluster_count == 0 {
        return ConfidenceLevel::Gap;
    }
    if cluster_count == 1 {
        return ConfidenceLevel::Low;
    }
    if dominant_share >= 0.40 {
        ConfidenceLevel::High
    } else if dominant_share >= 0.18 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Score a text extraction from recognized volume and the optional
/// recognizer-reported score.
#[must_use]
pub fn text_confidence(char_count: usize, recognizer_score: Option<f32>) -> ConfidenceLevel {
    if char_count == 0 {
        return ConfidenceLevel::Gap;
    }
    let volume = if char_count >= 40 {
        ConfidenceLevel::High
    } else if char_count >= 12 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };
    match recognizer_score {
        // A weak recognizer score caps the volume-based level
        Some(score) if score < 0.5 => volume.min(ConfidenceLevel::Low),
        Some(score) if score < 0.75 => volume.min(ConfidenceLevel::Medium),
        _ => volume,
    }
}

/// Score a layout analysis from the fraction of pixels carrying strong
/// edges. Below the floor there is no structure to describe.
#[must_use]
pub fn layout_confidence(edge_coverage: f32) -> ConfidenceLevel {
    if edge_coverage < 0.002 {
        ConfidenceLevel::Gap
    } else if edge_coverage >= 0.05 {
        ConfidenceLevel::High
    } else if edge_coverage >= 0.01 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
