//! Cross-asset normalization
//!
//! Folds all per-asset extracts, in stable input order, into one
//! [`CanonicalSpec`]. For each schema field the fold collects
//! (value, confidence, source) triples across assets, deduplicates them
//! under case/whitespace-normalized equality (hex colors in normalized
//! uppercase form), and records provenance as the encounter-ordered set
//! of contributing assets.
//!
//! Ordering rules:
//! - scalar picks keep the highest-confidence non-placeholder value,
//!   ties broken by first-encountered order;
//! - list fields keep all distinct values, ordered by descending
//!   aggregate confidence then first-encountered order.
//!
//! The fold is idempotent: identical input yields identical output, with
//! no randomness or wall-clock dependence. It runs single-threaded after
//! the per-asset reduction barrier.

pub mod spec;

pub use spec::{
    BrandIdentity, CanonicalSpec, ConfidenceNote, ConfidenceSummary, ImageryStyle,
    LayoutAndComponents, PaletteEntry, SpecValue, TypographyEntry, VisualIdentity, VoiceAndCopy,
};

use brand_extract_common::{fields, ConfidenceLevel, Detection, PerAssetExtract};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Configuration for cross-asset normalization
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Normalized values a scalar pick refuses to adopt
    pub placeholders: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            placeholders: ["unknown", "n/a", "unspecified", "none"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Case/whitespace-normalized equality key
fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalize a hex color to uppercase "#RRGGBB"; None when malformed
fn normalize_hex(raw: &str) -> Option<String> {
    let clean = raw.trim().trim_start_matches('#');
    if clean.len() != 6 || !clean.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", clean.to_ascii_uppercase()))
}

fn level_score(level: ConfidenceLevel) -> u64 {
    match level {
        ConfidenceLevel::Gap => 0,
        ConfidenceLevel::Low => 1,
        ConfidenceLevel::Medium => 2,
        ConfidenceLevel::High => 3,
    }
}

/// Aggregate-confidence ordering weight of a merged value.
///
/// The reported level of a merged value is its strongest contribution,
/// but the ordering weight is the mean contribution: a value seen at
/// high+medium ranks below one seen only at high. Compared by
/// cross-multiplication so no floats enter the fold.
#[derive(Debug, Clone, Copy)]
struct AggregateWeight {
    score_sum: u64,
    contributions: u64,
}

impl AggregateWeight {
    fn new(level: ConfidenceLevel) -> Self {
        Self {
            score_sum: level_score(level),
            contributions: 1,
        }
    }

    fn absorb(&mut self, level: ConfidenceLevel) {
        self.score_sum += level_score(level);
        self.contributions += 1;
    }

    fn cmp_desc(&self, other: &Self) -> std::cmp::Ordering {
        (other.score_sum * self.contributions).cmp(&(self.score_sum * other.contributions))
    }
}

/// One merged value accumulated during the fold
struct Merged {
    surface: String,
    surface_confidence: ConfidenceLevel,
    confidence: ConfidenceLevel,
    weight: AggregateWeight,
    first_seen: usize,
    sources: Vec<String>,
}

impl Merged {
    fn new(surface: String, confidence: ConfidenceLevel, first_seen: usize, source: String) -> Self {
        Self {
            surface,
            surface_confidence: confidence,
            confidence,
            weight: AggregateWeight::new(confidence),
            first_seen,
            sources: vec![source],
        }
    }

    fn absorb(&mut self, surface: &str, confidence: ConfidenceLevel, source: String) {
        // Reported confidence is the strongest contribution
        self.confidence = self.confidence.max(confidence);
        self.weight.absorb(confidence);
        // Surface form follows the highest-confidence contribution; a tie
        // keeps the first-encountered form
        if confidence > self.surface_confidence {
            self.surface = surface.to_string();
            self.surface_confidence = confidence;
        }
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

/// Deduplicating fold over one list field
#[derive(Default)]
struct ValueFold {
    merged: HashMap<String, Merged>,
}

impl ValueFold {
    fn add(&mut self, raw: &str, confidence: ConfidenceLevel, source: String, counter: usize) {
        let trimmed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if trimmed.is_empty() {
            return;
        }
        let key = normalize_key(&trimmed);
        match self.merged.get_mut(&key) {
            Some(existing) => existing.absorb(&trimmed, confidence, source),
            None => {
                self.merged
                    .insert(key, Merged::new(trimmed, confidence, counter, source));
            }
        }
    }

    /// Finish the fold: descending aggregate confidence, then encounter
    fn into_values(self) -> Vec<SpecValue> {
        let mut values: Vec<Merged> = self.merged.into_values().collect();
        values.sort_by(|a, b| {
            a.weight
                .cmp_desc(&b.weight)
                .then(a.first_seen.cmp(&b.first_seen))
        });
        values
            .into_iter()
            .map(|m| SpecValue {
                value: m.surface,
                confidence: m.confidence,
                sources: m.sources,
            })
            .collect()
    }

    /// Finish as a scalar: highest-confidence non-placeholder value,
    /// ties broken by first-encountered order
    fn into_scalar(self, placeholders: &[String]) -> Option<SpecValue> {
        self.into_values()
            .into_iter()
            .find(|v| !placeholders.contains(&normalize_key(&v.value)))
    }
}

/// String field of a structured detection value, tolerating absence
fn text_of(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

struct PaletteMerged {
    entry: PaletteEntry,
    detail_confidence: ConfidenceLevel,
    weight: AggregateWeight,
    first_seen: usize,
}

struct TypographyMerged {
    entry: TypographyEntry,
    detail_confidence: ConfidenceLevel,
    weight: AggregateWeight,
    first_seen: usize,
}

/// Fold all per-asset extracts into the canonical specification
#[must_use]
pub fn normalize(config: &NormalizerConfig, extracts: &[PerAssetExtract]) -> CanonicalSpec {
    info!("Normalizing {} per-asset extracts", extracts.len());

    // The executor already orders by ordinal; re-assert it so the fold
    // never depends on caller discipline
    let mut ordered: Vec<&PerAssetExtract> = extracts.iter().collect();
    ordered.sort_by_key(|e| e.asset.ordinal);

    let mut counter = 0usize;
    let mut folds: HashMap<&'static str, ValueFold> = HashMap::new();
    let mut palette: HashMap<String, PaletteMerged> = HashMap::new();
    let mut typography: HashMap<String, TypographyMerged> = HashMap::new();
    let mut confidence_notes: Vec<ConfidenceNote> = Vec::new();
    let mut seen_notes: Vec<(String, String)> = Vec::new();

    for extract in &ordered {
        for detection in extract.all_detections() {
            counter += 1;
            let source = detection.source_asset.display().to_string();

            // Gap annotations surface as follow-up notes, whatever field
            // they were recorded against
            if detection.confidence.is_gap() {
                if let Some(note) = &detection.note {
                    let dedup_key = (source.clone(), note.clone());
                    if !seen_notes.contains(&dedup_key) {
                        seen_notes.push(dedup_key);
                        confidence_notes.push(ConfidenceNote {
                            asset: source.clone(),
                            note: note.clone(),
                            level: ConfidenceLevel::Gap,
                        });
                    }
                }
            }
            if detection.value.is_null() {
                continue;
            }

            match detection.field_path.as_str() {
                fields::COLOR_PALETTE => {
                    fold_palette(&mut palette, detection, &source, counter);
                }
                fields::TYPOGRAPHY => {
                    fold_typography(&mut typography, detection, &source, counter);
                }
                fields::CONFIDENCE_NOTE => {
                    if let Some(note) = detection.value.as_str() {
                        let dedup_key = (source.clone(), note.to_string());
                        if !seen_notes.contains(&dedup_key) {
                            seen_notes.push(dedup_key);
                            confidence_notes.push(ConfidenceNote {
                                asset: source.clone(),
                                note: note.to_string(),
                                level: detection.confidence,
                            });
                        }
                    }
                }
                path => {
                    let Some(text) = detection.value.as_str() else {
                        warn!("Skipping non-string value at {path}");
                        continue;
                    };
                    if let Some(field) = known_text_field(path) {
                        folds.entry(field).or_default().add(
                            text,
                            detection.confidence,
                            source.clone(),
                            counter,
                        );
                    } else {
                        warn!("Skipping detection with unknown field path {path}");
                    }
                }
            }
        }
    }

    let mut take = |field: &'static str| -> ValueFold { folds.remove(field).unwrap_or_default() };

    let color_palette = finish_palette(palette);
    let typography_entries = finish_typography(typography);

    let mut spec = CanonicalSpec {
        brand_identity: BrandIdentity {
            brand_name: take(fields::BRAND_NAME).into_scalar(&config.placeholders),
            tagline: take(fields::TAGLINE).into_scalar(&config.placeholders),
            design_context: take(fields::DESIGN_CONTEXT).into_values(),
            core_attributes: take(fields::CORE_ATTRIBUTES).into_values(),
        },
        visual_identity: VisualIdentity {
            color_palette,
            typography: typography_entries,
            logo_usage: take(fields::LOGO_USAGE).into_values(),
            imagery_style: ImageryStyle {
                photography: take(fields::IMAGERY_PHOTOGRAPHY).into_values(),
                illustration: take(fields::IMAGERY_ILLUSTRATION).into_values(),
                iconography: take(fields::IMAGERY_ICONOGRAPHY).into_values(),
                textures_and_patterns: take(fields::IMAGERY_TEXTURES).into_values(),
            },
        },
        layout_and_components: LayoutAndComponents {
            grid_and_spacing: take(fields::GRID_AND_SPACING).into_values(),
            key_components: take(fields::KEY_COMPONENTS).into_values(),
            call_to_action_treatment: take(fields::CALL_TO_ACTION).into_values(),
            interaction_notes: take(fields::INTERACTION_NOTES).into_values(),
        },
        voice_and_copy: VoiceAndCopy {
            tone_descriptors: take(fields::TONE_DESCRIPTORS).into_values(),
            messaging_pillars: take(fields::MESSAGING_PILLARS).into_values(),
            dos: take(fields::DOS).into_values(),
            donts: take(fields::DONTS).into_values(),
            copy_observations: take(fields::COPY_OBSERVATIONS).into_values(),
        },
        production_notes: take(fields::PRODUCTION_NOTES).into_values(),
        confidence: ConfidenceSummary {
            overall: ConfidenceLevel::Gap,
            notes: confidence_notes,
        },
    };

    spec.confidence.overall = overall_confidence(&spec);
    debug!(
        "Normalization complete: {} palette entries, overall confidence {}",
        spec.visual_identity.color_palette.len(),
        spec.confidence.overall
    );
    spec
}

fn fold_palette(
    palette: &mut HashMap<String, PaletteMerged>,
    detection: &Detection,
    source: &str,
    counter: usize,
) {
    let raw_hex = text_of(&detection.value, "hex");
    let Some(hex) = normalize_hex(&raw_hex) else {
        warn!("Skipping palette detection with malformed hex '{raw_hex}'");
        return;
    };
    let name = text_of(&detection.value, "name");
    let usage = text_of(&detection.value, "usage");
    let finish = text_of(&detection.value, "finish");

    match palette.get_mut(&hex) {
        Some(existing) => {
            existing.entry.confidence = existing.entry.confidence.max(detection.confidence);
            existing.weight.absorb(detection.confidence);
            // Descriptive fields follow the strongest contribution
            if detection.confidence > existing.detail_confidence {
                existing.entry.name = name;
                existing.entry.usage = usage;
                existing.entry.finish = finish;
                existing.detail_confidence = detection.confidence;
            }
            let source = source.to_string();
            if !existing.entry.sources.contains(&source) {
                existing.entry.sources.push(source);
            }
        }
        None => {
            palette.insert(
                hex.clone(),
                PaletteMerged {
                    entry: PaletteEntry {
                        hex,
                        name,
                        usage,
                        finish,
                        confidence: detection.confidence,
                        sources: vec![source.to_string()],
                    },
                    detail_confidence: detection.confidence,
                    weight: AggregateWeight::new(detection.confidence),
                    first_seen: counter,
                },
            );
        }
    }
}

fn finish_palette(palette: HashMap<String, PaletteMerged>) -> Vec<PaletteEntry> {
    let mut merged: Vec<PaletteMerged> = palette.into_values().collect();
    merged.sort_by(|a, b| {
        a.weight
            .cmp_desc(&b.weight)
            .then(a.first_seen.cmp(&b.first_seen))
    });
    merged.into_iter().map(|m| m.entry).collect()
}

fn fold_typography(
    typography: &mut HashMap<String, TypographyMerged>,
    detection: &Detection,
    source: &str,
    counter: usize,
) {
    let sample = text_of(&detection.value, "sample");
    let casing = text_of(&detection.value, "casing");
    let weight = text_of(&detection.value, "weight");
    let classification = text_of(&detection.value, "classification");
    if sample.is_empty() {
        warn!("Skipping typography detection without a sample");
        return;
    }

    let key = format!(
        "{}:{}:{}",
        normalize_key(&classification),
        normalize_key(&weight),
        normalize_key(&casing)
    );
    match typography.get_mut(&key) {
        Some(existing) => {
            existing.entry.confidence = existing.entry.confidence.max(detection.confidence);
            existing.weight.absorb(detection.confidence);
            if detection.confidence > existing.detail_confidence {
                existing.entry.sample = sample;
                existing.detail_confidence = detection.confidence;
            }
            let source = source.to_string();
            if !existing.entry.sources.contains(&source) {
                existing.entry.sources.push(source);
            }
        }
        None => {
            typography.insert(
                key,
                TypographyMerged {
                    entry: TypographyEntry {
                        sample,
                        casing,
                        weight,
                        classification,
                        confidence: detection.confidence,
                        sources: vec![source.to_string()],
                    },
                    detail_confidence: detection.confidence,
                    weight: AggregateWeight::new(detection.confidence),
                    first_seen: counter,
                },
            );
        }
    }
}

fn finish_typography(typography: HashMap<String, TypographyMerged>) -> Vec<TypographyEntry> {
    let mut merged: Vec<TypographyMerged> = typography.into_values().collect();
    merged.sort_by(|a, b| {
        a.weight
            .cmp_desc(&b.weight)
            .then(a.first_seen.cmp(&b.first_seen))
    });
    merged.into_iter().map(|m| m.entry).collect()
}

fn known_text_field(path: &str) -> Option<&'static str> {
    const TEXT_FIELDS: [&str; 19] = [
        fields::BRAND_NAME,
        fields::TAGLINE,
        fields::DESIGN_CONTEXT,
        fields::CORE_ATTRIBUTES,
        fields::LOGO_USAGE,
        fields::IMAGERY_PHOTOGRAPHY,
        fields::IMAGERY_ILLUSTRATION,
        fields::IMAGERY_ICONOGRAPHY,
        fields::IMAGERY_TEXTURES,
        fields::GRID_AND_SPACING,
        fields::KEY_COMPONENTS,
        fields::CALL_TO_ACTION,
        fields::INTERACTION_NOTES,
        fields::TONE_DESCRIPTORS,
        fields::MESSAGING_PILLARS,
        fields::DOS,
        fields::DONTS,
        fields::COPY_OBSERVATIONS,
        fields::PRODUCTION_NOTES,
    ];
    TEXT_FIELDS.into_iter().find(|f| *f == path)
}

/// Strongest aggregate confidence across all merged values
fn overall_confidence(spec: &CanonicalSpec) -> ConfidenceLevel {
    let mut overall = ConfidenceLevel::Gap;
    let mut bump = |level: ConfidenceLevel| {
        overall = overall.max(level);
    };

    for value in spec
        .brand_identity
        .brand_name
        .iter()
        .chain(spec.brand_identity.tagline.iter())
        .chain(&spec.brand_identity.design_context)
        .chain(&spec.brand_identity.core_attributes)
        .chain(&spec.visual_identity.logo_usage)
        .chain(&spec.visual_identity.imagery_style.photography)
        .chain(&spec.visual_identity.imagery_style.illustration)
        .chain(&spec.visual_identity.imagery_style.iconography)
        .chain(&spec.visual_identity.imagery_style.textures_and_patterns)
        .chain(&spec.layout_and_components.grid_and_spacing)
        .chain(&spec.layout_and_components.key_components)
        .chain(&spec.layout_and_components.call_to_action_treatment)
        .chain(&spec.layout_and_components.interaction_notes)
        .chain(&spec.voice_and_copy.tone_descriptors)
        .chain(&spec.voice_and_copy.messaging_pillars)
        .chain(&spec.voice_and_copy.dos)
        .chain(&spec.voice_and_copy.donts)
        .chain(&spec.voice_and_copy.copy_observations)
        .chain(&spec.production_notes)
    {
        bump(value.confidence);
    }
    for entry in &spec.visual_identity.color_palette {
        bump(entry.confidence);
    }
    for entry in &spec.visual_identity.typography {
        bump(entry.confidence);
    }
    overall
}

#[cfg(test)]
mod tests {
    use super::*;
    use brand_extract_common::AssetRecord;
    use serde_json::json;

    fn extract_with(
        path: &str,
        ordinal: usize,
        detections: Vec<Detection>,
    ) -> PerAssetExtract {
        let mut extract = PerAssetExtract::new(AssetRecord::new(path, "png", ordinal));
        extract.extend(detections);
        extract
    }

    fn palette_detection(source: &str, hex: &str, name: &str, level: ConfidenceLevel) -> Detection {
        Detection::new(
            fields::COLOR_PALETTE,
            json!({"hex": hex, "name": name, "usage": "", "finish": ""}),
            source,
            level,
        )
    }

    #[test]
    fn test_case_variant_hex_merges() {
        let extracts = vec![
            extract_with(
                "a.png",
                0,
                vec![palette_detection("a.png", "#b03030", "Bold Red", ConfidenceLevel::High)],
            ),
            extract_with(
                "b.png",
                1,
                vec![palette_detection("b.png", "#B03030", "Bold Red", ConfidenceLevel::Medium)],
            ),
        ];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        assert_eq!(spec.visual_identity.color_palette.len(), 1);
        let entry = &spec.visual_identity.color_palette[0];
        assert_eq!(entry.hex, "#B03030");
        assert_eq!(entry.confidence, ConfidenceLevel::High);
        assert_eq!(entry.sources, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_distinct_hexes_never_collapse() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            vec![
                palette_detection("a.png", "#B03030", "Bold Red", ConfidenceLevel::High),
                palette_detection("a.png", "#B03031", "Bold Red", ConfidenceLevel::High),
            ],
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        assert_eq!(spec.visual_identity.color_palette.len(), 2);
    }

    #[test]
    fn test_list_ordering_confidence_then_encounter() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            vec![
                Detection::new(fields::DOS, json!("first low"), "a.png", ConfidenceLevel::Low),
                Detection::new(fields::DOS, json!("then high"), "a.png", ConfidenceLevel::High),
                Detection::new(fields::DOS, json!("second low"), "a.png", ConfidenceLevel::Low),
            ],
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        let values: Vec<&str> = spec
            .voice_and_copy
            .dos
            .iter()
            .map(|v| v.value.as_str())
            .collect();
        assert_eq!(values, vec!["then high", "first low", "second low"]);
    }

    #[test]
    fn test_whitespace_case_dedup_keeps_strongest_surface() {
        let extracts = vec![
            extract_with(
                "a.png",
                0,
                vec![Detection::new(
                    fields::TONE_DESCRIPTORS,
                    json!("  bold,   declarative  "),
                    "a.png",
                    ConfidenceLevel::Low,
                )],
            ),
            extract_with(
                "b.png",
                1,
                vec![Detection::new(
                    fields::TONE_DESCRIPTORS,
                    json!("Bold, Declarative"),
                    "b.png",
                    ConfidenceLevel::High,
                )],
            ),
        ];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        assert_eq!(spec.voice_and_copy.tone_descriptors.len(), 1);
        let value = &spec.voice_and_copy.tone_descriptors[0];
        assert_eq!(value.value, "Bold, Declarative");
        assert_eq!(value.confidence, ConfidenceLevel::High);
        assert_eq!(value.sources, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_scalar_skips_placeholder() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            vec![
                Detection::new(
                    fields::BRAND_NAME,
                    json!("Unknown"),
                    "a.png",
                    ConfidenceLevel::High,
                ),
                Detection::new(
                    fields::BRAND_NAME,
                    json!("Northwind"),
                    "a.png",
                    ConfidenceLevel::Medium,
                ),
            ],
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        let brand = spec.brand_identity.brand_name.expect("brand name");
        assert_eq!(brand.value, "Northwind");
    }

    #[test]
    fn test_scalar_tie_keeps_first_encountered() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            vec![
                Detection::new(
                    fields::TAGLINE,
                    json!("BUILD FASTER"),
                    "a.png",
                    ConfidenceLevel::Medium,
                ),
                Detection::new(
                    fields::TAGLINE,
                    json!("SHIP SOONER"),
                    "a.png",
                    ConfidenceLevel::Medium,
                ),
            ],
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        assert_eq!(spec.brand_identity.tagline.unwrap().value, "BUILD FASTER");
    }

    #[test]
    fn test_gap_notes_deduplicated_per_asset() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            PerAssetExtract::gap(AssetRecord::new("a.png", "png", 0), "processing timeout after 30s")
                .all_detections()
                .cloned()
                .collect(),
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        let timeout_notes = spec
            .confidence
            .notes
            .iter()
            .filter(|n| n.note.contains("processing timeout"))
            .count();
        assert_eq!(timeout_notes, 1);
    }

    #[test]
    fn test_idempotence() {
        let extracts = vec![
            extract_with(
                "a.png",
                0,
                vec![
                    palette_detection("a.png", "#B03030", "Bold Red", ConfidenceLevel::High),
                    Detection::new(
                        fields::TONE_DESCRIPTORS,
                        json!("assured and balanced"),
                        "a.png",
                        ConfidenceLevel::Medium,
                    ),
                ],
            ),
            extract_with(
                "b.png",
                1,
                vec![palette_detection("b.png", "#204060", "Deep Blue", ConfidenceLevel::High)],
            ),
        ];

        let first = serde_json::to_string(&normalize(&NormalizerConfig::default(), &extracts))
            .unwrap();
        let second = serde_json::to_string(&normalize(&NormalizerConfig::default(), &extracts))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_provenance_closure() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            vec![
                palette_detection("a.png", "#B03030", "Bold Red", ConfidenceLevel::High),
                Detection::new(fields::DOS, json!("keep it simple"), "a.png", ConfidenceLevel::Low),
            ],
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        for entry in &spec.visual_identity.color_palette {
            assert!(!entry.sources.is_empty());
        }
        for value in &spec.voice_and_copy.dos {
            assert!(!value.sources.is_empty());
        }
    }

    #[test]
    fn test_overall_confidence_is_strongest() {
        let extracts = vec![extract_with(
            "a.png",
            0,
            vec![
                Detection::new(fields::DOS, json!("low one"), "a.png", ConfidenceLevel::Low),
                palette_detection("a.png", "#B03030", "Bold Red", ConfidenceLevel::High),
            ],
        )];

        let spec = normalize(&NormalizerConfig::default(), &extracts);
        assert_eq!(spec.confidence.overall, ConfidenceLevel::High);
    }

    #[test]
    fn test_empty_input_yields_empty_spec() {
        let spec = normalize(&NormalizerConfig::default(), &[]);
        assert!(spec.is_empty());
        assert_eq!(spec.confidence.overall, ConfidenceLevel::Gap);
    }
}
