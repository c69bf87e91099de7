//! Detection emission for the text/typography extractor

use crate::{extract_text, uppercase_ratio, Classification, TextRecognizer, TypographyConfig};
use brand_extract_common::{fields, AssetRecord, ConfidenceLevel, Detection};
use brand_extract_core::scoring;
use image::DynamicImage;
use serde_json::json;
use tracing::debug;

/// Run text extraction for one asset and convert the result into schema
/// detections.
#[must_use]
pub fn emit_detections(
    record: &AssetRecord,
    image: &DynamicImage,
    recognizer: Option<&dyn TextRecognizer>,
    config: &TypographyConfig,
) -> Vec<Detection> {
    let extraction = extract_text(image, recognizer, config);
    let confidence =
        scoring::text_confidence(extraction.char_count, extraction.mean_recognizer_score);
    let mut detections = Vec::with_capacity(extraction.samples.len() + 4);

    if extraction.samples.is_empty() {
        let note = extraction
            .degraded
            .unwrap_or_else(|| "no legible text detected".to_string());
        detections.push(
            Detection::new(
                fields::TYPOGRAPHY,
                serde_json::Value::Null,
                &record.path,
                ConfidenceLevel::Gap,
            )
            .with_note(note),
        );
        return detections;
    }

    for sample in &extraction.samples {
        detections.push(Detection::new(
            fields::TYPOGRAPHY,
            json!({
                "sample": sample.text,
                "casing": sample.casing.label(),
                "weight": sample.weight.label(),
                "classification": sample.classification.label(),
            }),
            &record.path,
            confidence,
        ));
    }

    // The most prominent display-class span doubles as a tagline candidate
    if let Some(display) = extraction
        .samples
        .iter()
        .find(|s| s.classification == Classification::Display)
    {
        detections.push(Detection::new(
            fields::TAGLINE,
            json!(display.text),
            &record.path,
            confidence,
        ));
    }

    let lines: Vec<String> = extraction.spans.iter().map(|s| s.text.clone()).collect();
    for line in &lines {
        detections.push(Detection::new(
            fields::COPY_OBSERVATIONS,
            json!(line),
            &record.path,
            confidence,
        ));
    }

    let ratio = uppercase_ratio(&lines);
    let tone = if ratio > 0.55 {
        "bold, declarative headlines"
    } else if ratio < 0.25 {
        "conversational sentence case"
    } else {
        "adaptive mixed casing"
    };
    detections.push(Detection::new(
        fields::TONE_DESCRIPTORS,
        json!(tone),
        &record.path,
        confidence.min(ConfidenceLevel::Medium),
    ));

    debug!(
        "Typography producer: {} detections for {}",
        detections.len(),
        record.display_name()
    );
    detections
}
