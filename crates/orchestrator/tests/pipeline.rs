//! End-to-end pipeline tests over synthetic assets

use brand_extract_common::{AssetRecord, LoadedAsset};
use brand_extract_core::{Context, ExtractConfig};
use brand_extract_model_bridge::RemoteModelProducer;
use brand_extract_orchestrator::{build_assets, run_batch, LocalHeuristicProducer};
use brand_extract_renderer::{diff_sections, SECTION_GRAMMAR};
use image::{DynamicImage, Rgb, RgbImage};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

fn two_tone_image() -> DynamicImage {
    let img = RgbImage::from_fn(120, 120, |_, y| {
        if y < 60 {
            Rgb([0, 161, 222])
        } else {
            Rgb([200, 48, 48])
        }
    });
    DynamicImage::ImageRgb8(img)
}

fn banner_image() -> DynamicImage {
    let img = RgbImage::from_fn(160, 100, |x, y| {
        if (60..110).contains(&x) && (30..75).contains(&y) {
            Rgb([17, 34, 68])
        } else {
            Rgb([255, 255, 255])
        }
    });
    DynamicImage::ImageRgb8(img)
}

fn sample_assets() -> Vec<LoadedAsset> {
    build_assets(vec![
        (PathBuf::from("hero.png"), "png".to_string(), two_tone_image()),
        (PathBuf::from("banner.png"), "png".to_string(), banner_image()),
    ])
}

#[tokio::test]
async fn test_end_to_end_run() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .try_init();

    let output = run_batch(
        &Context::standard(),
        &ExtractConfig::default(),
        Arc::new(LocalHeuristicProducer::new()),
        sample_assets(),
    )
    .await
    .unwrap();

    assert_eq!(output.extracts.len(), 2);
    assert!(!output.spec.visual_identity.color_palette.is_empty());
    assert!(!output.markdown.is_empty());

    // Structural parity against the reference grammar
    let diff = diff_sections(&output.document.section_names(), &SECTION_GRAMMAR);
    assert!(diff.is_empty(), "structural diff not empty: {diff:?}");
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let first = run_batch(
        &Context::standard(),
        &ExtractConfig::default(),
        Arc::new(LocalHeuristicProducer::new()),
        sample_assets(),
    )
    .await
    .unwrap();

    let second = run_batch(
        &Context::standard(),
        &ExtractConfig::default(),
        Arc::new(LocalHeuristicProducer::new()),
        sample_assets(),
    )
    .await
    .unwrap();

    assert_eq!(first.markdown, second.markdown);
    assert_eq!(first.structured_json, second.structured_json);
}

#[tokio::test]
async fn test_partial_failure_isolation() {
    let mut assets = sample_assets();
    assets.push(LoadedAsset::unreadable(
        AssetRecord::new("corrupt.png", "png", assets.len()),
        "truncated header",
    ));

    let output = run_batch(
        &Context::standard(),
        &ExtractConfig::default(),
        Arc::new(LocalHeuristicProducer::new()),
        assets,
    )
    .await
    .unwrap();

    assert_eq!(output.extracts.len(), 3);
    let all_gap_count = output.extracts.iter().filter(|e| e.is_all_gap()).count();
    assert_eq!(all_gap_count, 1);
    assert!(!output.markdown.is_empty());

    // The failed asset surfaces as a follow-up note, not a run failure
    assert!(output
        .spec
        .confidence
        .notes
        .iter()
        .any(|n| n.asset.contains("corrupt.png")));
}

#[tokio::test]
async fn test_zero_text_batch_renders_typography_placeholder() {
    let output = run_batch(
        &Context::standard(),
        &ExtractConfig::default(),
        Arc::new(LocalHeuristicProducer::new()),
        sample_assets(),
    )
    .await
    .unwrap();

    // No recognizer is configured, so typography must fall back to the
    // literal placeholder, not an omitted heading
    assert!(output.markdown.contains("## Typography"));
    assert!(output.markdown.contains("no legible text detected"));
}

#[tokio::test]
async fn test_remote_producer_feeds_same_pipeline() {
    let producer = RemoteModelProducer::new("vision-model").with_payload(
        "hero.png",
        vec![
            json!({
                "field_path": "visual_identity.color_palette",
                "value": {"hex": "#00A1DE", "name": "Azure", "usage": "hero background", "finish": "matte"},
                "confidence": "high",
            }),
            json!({
                "field_path": "brand_identity.brand_name",
                "value": "Northwind",
                "confidence": "medium",
            }),
        ],
    );

    let assets = vec![LoadedAsset::unreadable(
        AssetRecord::new("hero.png", "png", 0),
        "pixels handled remotely",
    )];

    let output = run_batch(
        &Context::standard(),
        &ExtractConfig::default(),
        Arc::new(producer),
        assets,
    )
    .await
    .unwrap();

    assert_eq!(output.spec.visual_identity.color_palette.len(), 1);
    assert_eq!(output.spec.visual_identity.color_palette[0].hex, "#00A1DE");
    assert_eq!(
        output.spec.brand_identity.brand_name.as_ref().unwrap().value,
        "Northwind"
    );
    assert!(output
        .markdown
        .contains("# Northwind Brand Guidelines (Auto-generated)"));
}

#[tokio::test]
async fn test_strict_mode_run_completes() {
    let output = run_batch(
        &Context::debug(),
        &ExtractConfig::default(),
        Arc::new(LocalHeuristicProducer::new()),
        sample_assets(),
    )
    .await
    .unwrap();

    let diff = diff_sections(&output.document.section_names(), &SECTION_GRAMMAR);
    assert!(diff.is_empty());
}
