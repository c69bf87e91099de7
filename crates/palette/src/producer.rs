//! Detection emission for the palette extractor

use crate::{extract_palette, tone_descriptor, PaletteConfig};
use brand_extract_common::{fields, AssetRecord, ConfidenceLevel, Detection};
use brand_extract_core::scoring;
use image::DynamicImage;
use serde_json::json;
use tracing::debug;

/// Run palette extraction for one asset and convert the result into
/// schema detections.
#[must_use]
pub fn emit_detections(
    record: &AssetRecord,
    image: &DynamicImage,
    config: &PaletteConfig,
) -> Vec<Detection> {
    let result = extract_palette(image, config);
    let mut detections = Vec::with_capacity(result.swatches.len() + 1);

    for swatch in &result.swatches {
        let confidence = scoring::palette_confidence(swatch.prominence, result.cluster_count);
        let mut detection = Detection::new(
            fields::COLOR_PALETTE,
            json!({
                "hex": swatch.hex,
                "name": swatch.name,
                "usage": swatch.usage,
                "finish": swatch.finish,
                "prominence": swatch.prominence,
            }),
            &record.path,
            confidence,
        );
        if result.degenerate {
            detection = detection.with_note("degenerate image: single dominant cluster");
        }
        detections.push(detection);
    }

    if let Some(dominant) = result.swatches.first() {
        let confidence = scoring::palette_confidence(result.dominant_share, result.cluster_count)
            .min(ConfidenceLevel::Medium);
        detections.push(Detection::new(
            fields::TONE_DESCRIPTORS,
            json!(tone_descriptor(&dominant.hex)),
            &record.path,
            confidence,
        ));
    }

    debug!(
        "Palette producer: {} detections for {}",
        detections.len(),
        record.display_name()
    );
    detections
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    #[test]
    fn test_emits_palette_and_tone() {
        let record = AssetRecord::new("hero.png", "png", 0);
        let img = RgbImage::from_fn(120, 120, |_, y| {
            if y < 60 {
                Rgb([0, 161, 222])
            } else {
                Rgb([200, 48, 48])
            }
        });

        let detections = emit_detections(
            &record,
            &DynamicImage::ImageRgb8(img),
            &PaletteConfig::default(),
        );

        let palette_count = detections
            .iter()
            .filter(|d| d.field_path == fields::COLOR_PALETTE)
            .count();
        assert!(palette_count >= 2);
        assert!(detections
            .iter()
            .any(|d| d.field_path == fields::TONE_DESCRIPTORS));
        assert!(detections.iter().all(|d| !d.confidence.is_gap()));
    }

    #[test]
    fn test_degenerate_image_single_low_entry() {
        let record = AssetRecord::new("solid.png", "png", 1);
        let img = RgbImage::from_pixel(48, 48, Rgb([17, 34, 68]));

        let detections = emit_detections(
            &record,
            &DynamicImage::ImageRgb8(img),
            &PaletteConfig::default(),
        );

        let palette: Vec<&Detection> = detections
            .iter()
            .filter(|d| d.field_path == fields::COLOR_PALETTE)
            .collect();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].confidence, ConfidenceLevel::Low);
        assert!(palette[0]
            .note
            .as_deref()
            .is_some_and(|n| n.contains("degenerate")));
    }
}
