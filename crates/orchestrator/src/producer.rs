//! Local heuristic detection producer
//!
//! Runs the deterministic extractors (palette, layout, typography) plus
//! the confidence scorer for one asset and merges their detections into a
//! single per-asset extract, in fixed extractor order. Pixel work runs on
//! the blocking pool.

use async_trait::async_trait;
use brand_extract_common::{
    fields, AssetPayload, ConfidenceLevel, Detection, LoadedAsset, PerAssetExtract,
};
use brand_extract_core::{Context, DetectionProducer, ProducerError};
use brand_extract_layout::LayoutConfig;
use brand_extract_palette::PaletteConfig;
use brand_extract_typography::{TextRecognizer, TypographyConfig};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Deterministic per-asset detection producer
pub struct LocalHeuristicProducer {
    palette: PaletteConfig,
    layout: LayoutConfig,
    typography: TypographyConfig,
    recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl LocalHeuristicProducer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            palette: PaletteConfig::default(),
            layout: LayoutConfig::default(),
            typography: TypographyConfig::default(),
            recognizer: None,
        }
    }

    #[must_use]
    pub fn with_palette_config(mut self, config: PaletteConfig) -> Self {
        self.palette = config;
        self
    }

    #[must_use]
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    #[must_use]
    pub fn with_typography_config(mut self, config: TypographyConfig) -> Self {
        self.typography = config;
        self
    }

    /// Attach the optional text-recognition collaborator
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }
}

impl Default for LocalHeuristicProducer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DetectionProducer for LocalHeuristicProducer {
    fn name(&self) -> &str {
        "local-heuristic"
    }

    async fn extract(
        &self,
        ctx: &Context,
        asset: &LoadedAsset,
    ) -> Result<PerAssetExtract, ProducerError> {
        let record = asset.record.clone();

        let image = match &asset.payload {
            AssetPayload::Decoded(image) => image.clone(),
            AssetPayload::Unreadable(reason) => {
                warn!(
                    "Asset {} is unreadable: {reason}",
                    record.display_name()
                );
                let mut extract =
                    PerAssetExtract::gap(record.clone(), format!("unreadable asset: {reason}"));
                extract.push(Detection::new(
                    fields::CONFIDENCE_NOTE,
                    json!(format!("asset could not be decoded: {reason}")),
                    &record.path,
                    ConfidenceLevel::Gap,
                ));
                return Ok(extract);
            }
        };

        let palette_config = self.palette.clone();
        let layout_config = self.layout.clone();
        let typography_config = self.typography.clone();
        let recognizer = self.recognizer.clone();
        let verbose = ctx.verbose;

        let blocking_record = record.clone();
        let detections = tokio::task::spawn_blocking(move || {
            // Fixed extractor order keeps the merged extract stable
            let mut detections = brand_extract_palette::producer::emit_detections(
                &blocking_record,
                &image,
                &palette_config,
            );
            detections.extend(brand_extract_layout::producer::emit_detections(
                &blocking_record,
                &image,
                &layout_config,
            ));
            detections.extend(brand_extract_typography::producer::emit_detections(
                &blocking_record,
                &image,
                recognizer.as_deref(),
                &typography_config,
            ));
            if verbose {
                debug!(
                    "Local extraction finished for {}: {} detections",
                    blocking_record.display_name(),
                    detections.len()
                );
            }
            detections
        })
        .await
        .map_err(|e| ProducerError::ExecutionFailed(format!("Extraction task join error: {e}")))?;

        let mut extract = PerAssetExtract::new(record);
        extract.extend(detections);
        Ok(extract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brand_extract_common::AssetRecord;
    use image::{DynamicImage, Rgb, RgbImage};

    fn two_tone_asset(ordinal: usize) -> LoadedAsset {
        let img = RgbImage::from_fn(120, 120, |_, y| {
            if y < 60 {
                Rgb([0, 161, 222])
            } else {
                Rgb([200, 48, 48])
            }
        });
        LoadedAsset::decoded(
            AssetRecord::new(format!("asset-{ordinal}.png"), "png", ordinal),
            DynamicImage::ImageRgb8(img),
        )
    }

    #[tokio::test]
    async fn test_decoded_asset_yields_all_extractor_families() {
        let producer = LocalHeuristicProducer::new();
        let extract = producer
            .extract(&Context::standard(), &two_tone_asset(0))
            .await
            .unwrap();

        assert!(extract
            .all_detections()
            .any(|d| d.field_path == fields::COLOR_PALETTE));
        assert!(extract
            .all_detections()
            .any(|d| d.field_path == fields::GRID_AND_SPACING));
        // Without a recognizer the typography family degrades to gap
        assert!(extract
            .all_detections()
            .any(|d| d.field_path == fields::TYPOGRAPHY && d.confidence.is_gap()));
    }

    #[tokio::test]
    async fn test_unreadable_asset_degrades_to_gap_extract() {
        let producer = LocalHeuristicProducer::new();
        let asset = LoadedAsset::unreadable(
            AssetRecord::new("corrupt.png", "png", 0),
            "truncated header",
        );

        let extract = producer
            .extract(&Context::standard(), &asset)
            .await
            .unwrap();

        assert!(extract.is_all_gap());
        assert!(extract
            .all_detections()
            .any(|d| d.note.as_deref().is_some_and(|n| n.contains("unreadable"))));
    }

    #[tokio::test]
    async fn test_same_asset_extracts_identically() {
        let producer = LocalHeuristicProducer::new();
        let first = producer
            .extract(&Context::standard(), &two_tone_asset(0))
            .await
            .unwrap();
        let second = producer
            .extract(&Context::standard(), &two_tone_asset(0))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
