//! Batch orchestration
//!
//! Coordinates one full pipeline run: per-asset extraction across the
//! bounded worker pool, the strict reduction barrier, the single-threaded
//! cross-asset fold, and document rendering. Reruns on unchanged input
//! produce byte-identical output.

pub mod producer;

pub use producer::LocalHeuristicProducer;

use brand_extract_common::{
    AssetRecord, LoadedAsset, PerAssetExtract, ProcessingError,
};
use brand_extract_core::{BatchExecutor, CancelFlag, Context, DetectionProducer, ExtractConfig};
use brand_extract_normalizer::{normalize, CanonicalSpec, NormalizerConfig};
use brand_extract_renderer::{
    build_document, render_markdown, render_structured, GuidelineDocument,
};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// One extract per input asset, in input order
    pub extracts: Vec<PerAssetExtract>,
    /// The canonical cross-asset specification
    pub spec: CanonicalSpec,
    /// The rendered document
    pub document: GuidelineDocument,
    /// Formatted-document serialization
    pub markdown: String,
    /// Lossless structured serialization of the specification
    pub structured_json: String,
}

/// Wrap already-decoded images into uniform asset records, assigning
/// ordinals in input order.
#[must_use]
pub fn build_assets(
    images: impl IntoIterator<Item = (PathBuf, String, DynamicImage)>,
) -> Vec<LoadedAsset> {
    images
        .into_iter()
        .enumerate()
        .map(|(ordinal, (path, format, image))| {
            LoadedAsset::decoded(AssetRecord::new(path, format, ordinal), image)
        })
        .collect()
}

/// Run the full pipeline over a batch of assets
pub async fn run_batch(
    ctx: &Context,
    config: &ExtractConfig,
    producer: Arc<dyn DetectionProducer>,
    assets: Vec<LoadedAsset>,
) -> Result<RunOutput, ProcessingError> {
    run_batch_with_cancel(ctx, config, producer, assets, CancelFlag::new()).await
}

/// Run the full pipeline with an externally held cancellation flag.
///
/// Cancellation between asset completions discards all accumulated
/// state; no partial canonical specification is ever produced.
pub async fn run_batch_with_cancel(
    ctx: &Context,
    config: &ExtractConfig,
    producer: Arc<dyn DetectionProducer>,
    assets: Vec<LoadedAsset>,
    cancel: CancelFlag,
) -> Result<RunOutput, ProcessingError> {
    let asset_count = assets.len();
    info!("Pipeline run started: {asset_count} assets");

    let executor = BatchExecutor::new(config).with_cancel_flag(cancel);
    // Reduction barrier: the fold starts only after every per-asset
    // extract exists
    let extracts = executor.run(ctx, producer, assets).await?;

    let spec = normalize(&NormalizerConfig::default(), &extracts);
    let document = build_document(&spec, ctx.strict).map_err(ProcessingError::from)?;
    let markdown = render_markdown(&document);
    let structured_json = render_structured(&spec).map_err(ProcessingError::from)?;

    info!(
        "Pipeline run complete: {} extracts, {} palette entries",
        extracts.len(),
        spec.visual_identity.color_palette.len()
    );
    Ok(RunOutput {
        extracts,
        spec,
        document,
        markdown,
        structured_json,
    })
}
