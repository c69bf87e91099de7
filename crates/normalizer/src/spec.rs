//! Canonical specification types
//!
//! Field names and nesting of these types are a committed interface: the
//! structured output is consumed by the validator and downstream tooling.

use brand_extract_common::ConfidenceLevel;
use serde::{Deserialize, Serialize};

/// One deduplicated value with aggregate confidence and provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecValue {
    pub value: String,
    pub confidence: ConfidenceLevel,
    /// Contributing asset paths in encounter order
    pub sources: Vec<String>,
}

/// One deduplicated palette entry, keyed by normalized uppercase hex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub hex: String,
    pub name: String,
    pub usage: String,
    pub finish: String,
    pub confidence: ConfidenceLevel,
    pub sources: Vec<String>,
}

/// One deduplicated typography entry, keyed by
/// classification:weight:casing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyEntry {
    pub sample: String,
    pub casing: String,
    pub weight: String,
    pub classification: String,
    pub confidence: ConfidenceLevel,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub brand_name: Option<SpecValue>,
    pub tagline: Option<SpecValue>,
    pub design_context: Vec<SpecValue>,
    pub core_attributes: Vec<SpecValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageryStyle {
    pub photography: Vec<SpecValue>,
    pub illustration: Vec<SpecValue>,
    pub iconography: Vec<SpecValue>,
    pub textures_and_patterns: Vec<SpecValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualIdentity {
    pub color_palette: Vec<PaletteEntry>,
    pub typography: Vec<TypographyEntry>,
    pub logo_usage: Vec<SpecValue>,
    pub imagery_style: ImageryStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutAndComponents {
    pub grid_and_spacing: Vec<SpecValue>,
    pub key_components: Vec<SpecValue>,
    pub call_to_action_treatment: Vec<SpecValue>,
    pub interaction_notes: Vec<SpecValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceAndCopy {
    pub tone_descriptors: Vec<SpecValue>,
    pub messaging_pillars: Vec<SpecValue>,
    pub dos: Vec<SpecValue>,
    pub donts: Vec<SpecValue>,
    pub copy_observations: Vec<SpecValue>,
}

/// One per-asset follow-up note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceNote {
    pub asset: String,
    pub note: String,
    pub level: ConfidenceLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    /// Strongest aggregate confidence observed across all merged values
    pub overall: ConfidenceLevel,
    pub notes: Vec<ConfidenceNote>,
}

/// Cross-asset aggregate: the canonical specification of one run.
///
/// Invariant: every value traces to at least one detection from a real
/// asset record of the run (its `sources` list is never empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSpec {
    pub brand_identity: BrandIdentity,
    pub visual_identity: VisualIdentity,
    pub layout_and_components: LayoutAndComponents,
    pub voice_and_copy: VoiceAndCopy,
    pub production_notes: Vec<SpecValue>,
    pub confidence: ConfidenceSummary,
}

impl CanonicalSpec {
    /// True when no field group carries any value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand_identity.brand_name.is_none()
            && self.brand_identity.tagline.is_none()
            && self.brand_identity.design_context.is_empty()
            && self.brand_identity.core_attributes.is_empty()
            && self.visual_identity.color_palette.is_empty()
            && self.visual_identity.typography.is_empty()
            && self.visual_identity.logo_usage.is_empty()
            && self.visual_identity.imagery_style.photography.is_empty()
            && self.visual_identity.imagery_style.illustration.is_empty()
            && self.visual_identity.imagery_style.iconography.is_empty()
            && self
                .visual_identity
                .imagery_style
                .textures_and_patterns
                .is_empty()
            && self.layout_and_components.grid_and_spacing.is_empty()
            && self.layout_and_components.key_components.is_empty()
            && self
                .layout_and_components
                .call_to_action_treatment
                .is_empty()
            && self.layout_and_components.interaction_notes.is_empty()
            && self.voice_and_copy.tone_descriptors.is_empty()
            && self.voice_and_copy.messaging_pillars.is_empty()
            && self.voice_and_copy.dos.is_empty()
            && self.voice_and_copy.donts.is_empty()
            && self.voice_and_copy.copy_observations.is_empty()
            && self.production_notes.is_empty()
    }
}
