/// Common types and utilities for brand guideline extraction
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Processing errors
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Unreadable asset: {0}")]
    UnreadableAsset(String),

    #[error("Text recognizer unavailable: {0}")]
    RecognizerUnavailable(String),

    #[error("Processing timeout after {0}s")]
    Timeout(u64),

    #[error("Schema violation at {field_path}: {reason}")]
    SchemaViolation { field_path: String, reason: String },

    #[error("Render invariant violation: {0}")]
    RenderInvariantViolation(String),

    #[error("Run cancelled before completion")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<image::ImageError> for ProcessingError {
    fn from(err: image::ImageError) -> Self {
        ProcessingError::ImageError(err.to_string())
    }
}

/// Result type for processing operations
pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Ordered uncertainty tag attached to every detection.
///
/// The ordering `Gap < Low < Medium < High` is relied on by the
/// cross-asset normalizer's tie-breaks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    #[default]
    Gap,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Stable lowercase label used in rendered output
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gap => "gap",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level groups of the canonical schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecSection {
    BrandIdentity,
    VisualIdentity,
    LayoutAndComponents,
    VoiceAndCopy,
    ProductionNotes,
}

impl SpecSection {
    /// All sections in canonical order
    pub const ALL: [SpecSection; 5] = [
        SpecSection::BrandIdentity,
        SpecSection::VisualIdentity,
        SpecSection::LayoutAndComponents,
        SpecSection::VoiceAndCopy,
        SpecSection::ProductionNotes,
    ];

    /// Field-path prefix for this section
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BrandIdentity => "brand_identity",
            Self::VisualIdentity => "visual_identity",
            Self::LayoutAndComponents => "layout_and_components",
            Self::VoiceAndCopy => "voice_and_copy",
            Self::ProductionNotes => "production_notes",
        }
    }

    /// Resolve the owning section from a dotted field path.
    ///
    /// Per-asset confidence statements (`confidence.*`) travel with the
    /// production-notes group; the normalizer separates them by field path.
    #[must_use]
    pub fn for_field_path(field_path: &str) -> Option<SpecSection> {
        let prefix = field_path.split('.').next().unwrap_or(field_path);
        match prefix {
            "brand_identity" => Some(Self::BrandIdentity),
            "visual_identity" => Some(Self::VisualIdentity),
            "layout_and_components" => Some(Self::LayoutAndComponents),
            "voice_and_copy" => Some(Self::VoiceAndCopy),
            "production_notes" | "confidence" => Some(Self::ProductionNotes),
            _ => None,
        }
    }
}

/// Field paths of the canonical schema.
///
/// These strings are a committed interface: they appear in `Detection`
/// records and in the structured output consumed by downstream tooling.
pub mod fields {
    pub const BRAND_NAME: &str = "brand_identity.brand_name";
    pub const TAGLINE: &str = "brand_identity.tagline";
    pub const DESIGN_CONTEXT: &str = "brand_identity.design_context";
    pub const CORE_ATTRIBUTES: &str = "brand_identity.core_attributes";

    pub const COLOR_PALETTE: &str = "visual_identity.color_palette";
    pub const TYPOGRAPHY: &str = "visual_identity.typography";
    pub const LOGO_USAGE: &str = "visual_identity.logo_usage";
    pub const IMAGERY_PHOTOGRAPHY: &str = "visual_identity.imagery_style.photography";
    pub const IMAGERY_ILLUSTRATION: &str = "visual_identity.imagery_style.illustration";
    pub const IMAGERY_ICONOGRAPHY: &str = "visual_identity.imagery_style.iconography";
    pub const IMAGERY_TEXTURES: &str = "visual_identity.imagery_style.textures_and_patterns";

    pub const GRID_AND_SPACING: &str = "layout_and_components.grid_and_spacing";
    pub const KEY_COMPONENTS: &str = "layout_and_components.key_components";
    pub const CALL_TO_ACTION: &str = "layout_and_components.call_to_action_treatment";
    pub const INTERACTION_NOTES: &str = "layout_and_components.interaction_notes";

    pub const TONE_DESCRIPTORS: &str = "voice_and_copy.tone_descriptors";
    pub const MESSAGING_PILLARS: &str = "voice_and_copy.messaging_pillars";
    pub const DOS: &str = "voice_and_copy.dos";
    pub const DONTS: &str = "voice_and_copy.donts";
    pub const COPY_OBSERVATIONS: &str = "voice_and_copy.copy_observations";

    pub const PRODUCTION_NOTES: &str = "production_notes";
    pub const CONFIDENCE_NOTE: &str = "confidence.note";
}

/// Identity of one input image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Source path as supplied by the asset loader
    pub path: PathBuf,
    /// Format hint (e.g. "png", "jpeg")
    pub format: String,
    /// Stable input position; every encounter-order tie-break uses this
    pub ordinal: usize,
}

impl AssetRecord {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: impl Into<String>, ordinal: usize) -> Self {
        Self {
            path: path.into(),
            format: format.into(),
            ordinal,
        }
    }

    /// Short display label (file name, falling back to the full path)
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Pixel payload delivered by the external asset loader
#[derive(Debug, Clone)]
pub enum AssetPayload {
    /// Successfully decoded raster
    Decoded(image::DynamicImage),
    /// Decoding failed; the reason is carried into a gap-confidence extract
    Unreadable(String),
}

/// One input asset: identity plus decoded pixels (or the decode failure)
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub record: AssetRecord,
    pub payload: AssetPayload,
}

impl LoadedAsset {
    #[must_use]
    pub fn decoded(record: AssetRecord, image: image::DynamicImage) -> Self {
        Self {
            record,
            payload: AssetPayload::Decoded(image),
        }
    }

    #[must_use]
    pub fn unreadable(record: AssetRecord, reason: impl Into<String>) -> Self {
        Self {
            record,
            payload: AssetPayload::Unreadable(reason.into()),
        }
    }
}

/// One extracted, confidence-tagged fact. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Dotted path into the canonical schema (see [`fields`])
    pub field_path: String,
    /// Payload; shape depends on the field (string, or structured object)
    pub value: serde_json::Value,
    /// Path of the asset this fact was extracted from
    pub source_asset: PathBuf,
    /// Uncertainty tag
    pub confidence: ConfidenceLevel,
    /// Optional annotation ("insufficient structure", ...)
    pub note: Option<String>,
}

impl Detection {
    #[must_use]
    pub fn new(
        field_path: impl Into<String>,
        value: serde_json::Value,
        source_asset: impl Into<PathBuf>,
        confidence: ConfidenceLevel,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            value,
            source_asset: source_asset.into(),
            confidence,
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Owning section of this detection's field path
    #[must_use]
    pub fn section(&self) -> Option<SpecSection> {
        SpecSection::for_field_path(&self.field_path)
    }
}

/// All detections for one asset, grouped by section. Produced exactly once
/// per [`AssetRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerAssetExtract {
    pub asset: AssetRecord,
    pub sections: BTreeMap<SpecSection, Vec<Detection>>,
}

impl PerAssetExtract {
    #[must_use]
    pub fn new(asset: AssetRecord) -> Self {
        Self {
            asset,
            sections: BTreeMap::new(),
        }
    }

    /// All-gap extract used when an asset times out or cannot be read.
    /// Carries one gap detection per section so downstream consumers see
    /// the asset accounted for in every group.
    #[must_use]
    pub fn gap(asset: AssetRecord, note: impl Into<String>) -> Self {
        let note = note.into();
        let mut extract = Self::new(asset);
        for section in SpecSection::ALL {
            let field_path = match section {
                SpecSection::ProductionNotes => fields::PRODUCTION_NOTES.to_string(),
                _ => format!("{}.gap", section.name()),
            };
            let value = match section {
                SpecSection::ProductionNotes => serde_json::Value::String(format!(
                    "{}: {note}",
                    extract.asset.display_name()
                )),
                _ => serde_json::Value::Null,
            };
            let detection = Detection::new(
                field_path,
                value,
                extract.asset.path.clone(),
                ConfidenceLevel::Gap,
            )
            .with_note(note.clone());
            extract.push(detection);
        }
        extract
    }

    /// Route a detection into its section group. Detections with an
    /// unknown field path are rejected by the producers, not here.
    pub fn push(&mut self, detection: Detection) {
        if let Some(section) = detection.section() {
            self.sections.entry(section).or_default().push(detection);
        }
    }

    pub fn extend(&mut self, detections: impl IntoIterator<Item = Detection>) {
        for detection in detections {
            self.push(detection);
        }
    }

    /// Iterate all detections in section order
    pub fn all_detections(&self) -> impl Iterator<Item = &Detection> {
        self.sections.values().flatten()
    }

    #[must_use]
    pub fn detection_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// True when the extract carries detections and every one is gap
    #[must_use]
    pub fn is_all_gap(&self) -> bool {
        let mut any = false;
        for detection in self.all_detections() {
            any = true;
            if !detection.confidence.is_gap() {
                return false;
            }
        }
        any
    }
}
