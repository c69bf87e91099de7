//! Detection emission for the layout analyzer

use crate::{analyze_layout, LayoutConfig};
use brand_extract_common::{fields, AssetRecord, ConfidenceLevel, Detection};
use brand_extract_core::scoring;
use image::DynamicImage;
use serde_json::json;
use tracing::debug;

/// Run layout analysis for one asset and convert the result into schema
/// detections.
#[must_use]
pub fn emit_detections(
    record: &AssetRecord,
    image: &DynamicImage,
    config: &LayoutConfig,
) -> Vec<Detection> {
    let summary = analyze_layout(image, config);
    let structural_confidence = scoring::layout_confidence(summary.edge_coverage);
    let mut detections = Vec::with_capacity(6);

    // Orientation and whitespace need no edge evidence
    detections.push(Detection::new(
        fields::GRID_AND_SPACING,
        json!(format!(
            "{} composition, {} whitespace ({:.0}%)",
            summary.orientation.label(),
            summary.whitespace_bucket.label(),
            summary.whitespace_ratio * 100.0
        )),
        &record.path,
        ConfidenceLevel::Medium,
    ));

    if !summary.focal_regions.is_empty() {
        detections.push(Detection::new(
            fields::GRID_AND_SPACING,
            json!(format!(
                "visual weight concentrated at {}",
                summary.focal_regions.join(", ")
            )),
            &record.path,
            ConfidenceLevel::Medium,
        ));
    }

    match &summary.structure {
        Some(structure) => {
            detections.push(Detection::new(
                fields::KEY_COMPONENTS,
                json!(format!(
                    "~{} rectilinear block{}",
                    structure.component_estimate,
                    if structure.component_estimate == 1 { "" } else { "s" }
                )),
                &record.path,
                structural_confidence,
            ));
            detections.push(Detection::new(
                fields::KEY_COMPONENTS,
                json!(format!("{} symmetry", structure.symmetry.label())),
                &record.path,
                structural_confidence,
            ));
        }
        None => {
            detections.push(
                Detection::new(
                    fields::KEY_COMPONENTS,
                    serde_json::Value::Null,
                    &record.path,
                    ConfidenceLevel::Gap,
                )
                .with_note("insufficient structure"),
            );
        }
    }

    if summary.whitespace_ratio < 0.25 {
        detections.push(Detection::new(
            fields::PRODUCTION_NOTES,
            json!(format!(
                "Consider reviewing dense composition in {}; whitespace under 25%.",
                record.display_name()
            )),
            &record.path,
            ConfidenceLevel::Medium,
        ));
    }

    debug!(
        "Layout producer: {} detections for {}",
        detections.len(),
        record.display_name()
    );
    detections
}
