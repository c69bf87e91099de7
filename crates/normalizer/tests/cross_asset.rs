//! Cross-asset merge scenarios

use brand_extract_common::{fields, AssetRecord, ConfidenceLevel, Detection, PerAssetExtract};
use brand_extract_normalizer::{normalize, NormalizerConfig};
use serde_json::json;

fn palette_detection(source: &str, hex: &str, name: &str, level: ConfidenceLevel) -> Detection {
    Detection::new(
        fields::COLOR_PALETTE,
        json!({"hex": hex, "name": name, "usage": "", "finish": ""}),
        source,
        level,
    )
}

#[test]
fn test_two_asset_palette_merge() {
    // Asset A sees Bold Red at high confidence; asset B sees the same red
    // at medium plus Deep Blue at high. The merged palette keeps both
    // colors, reports the strongest level for each, and ranks the color
    // with uncontested high evidence first.
    let mut a = PerAssetExtract::new(AssetRecord::new("a.png", "png", 0));
    a.push(palette_detection("a.png", "#B03030", "Bold Red", ConfidenceLevel::High));

    let mut b = PerAssetExtract::new(AssetRecord::new("b.png", "png", 1));
    b.push(palette_detection("b.png", "#B03030", "Bold Red", ConfidenceLevel::Medium));
    b.push(palette_detection("b.png", "#204060", "Deep Blue", ConfidenceLevel::High));

    let spec = normalize(&NormalizerConfig::default(), &[a, b]);
    let palette = &spec.visual_identity.color_palette;

    assert_eq!(palette.len(), 2);

    assert_eq!(palette[0].hex, "#204060");
    assert_eq!(palette[0].name, "Deep Blue");
    assert_eq!(palette[0].confidence, ConfidenceLevel::High);
    assert_eq!(palette[0].sources, vec!["b.png"]);

    assert_eq!(palette[1].hex, "#B03030");
    assert_eq!(palette[1].name, "Bold Red");
    assert_eq!(palette[1].confidence, ConfidenceLevel::High);
    assert_eq!(palette[1].sources, vec!["a.png", "b.png"]);
}

#[test]
fn test_fold_order_is_input_order_not_completion_order() {
    // Same extracts presented in shuffled slice order must produce the
    // same canonical spec: the fold re-asserts ordinal order itself.
    let mut a = PerAssetExtract::new(AssetRecord::new("a.png", "png", 0));
    a.push(palette_detection("a.png", "#B03030", "Bold Red", ConfidenceLevel::Medium));
    let mut b = PerAssetExtract::new(AssetRecord::new("b.png", "png", 1));
    b.push(palette_detection("b.png", "#204060", "Deep Blue", ConfidenceLevel::Medium));

    let forward = normalize(&NormalizerConfig::default(), &[a.clone(), b.clone()]);
    let shuffled = normalize(&NormalizerConfig::default(), &[b, a]);

    assert_eq!(
        serde_json::to_string(&forward).unwrap(),
        serde_json::to_string(&shuffled).unwrap()
    );
}

#[test]
fn test_typography_merges_on_attribute_key() {
    let mut a = PerAssetExtract::new(AssetRecord::new("a.png", "png", 0));
    a.push(Detection::new(
        fields::TYPOGRAPHY,
        json!({"sample": "BUILD FASTER", "casing": "uppercase", "weight": "bold", "classification": "display"}),
        "a.png",
        ConfidenceLevel::Medium,
    ));
    let mut b = PerAssetExtract::new(AssetRecord::new("b.png", "png", 1));
    b.push(Detection::new(
        fields::TYPOGRAPHY,
        json!({"sample": "SHIP SOONER", "casing": "uppercase", "weight": "bold", "classification": "display"}),
        "b.png",
        ConfidenceLevel::High,
    ));

    let spec = normalize(&NormalizerConfig::default(), &[a, b]);
    let typography = &spec.visual_identity.typography;

    assert_eq!(typography.len(), 1);
    // The higher-confidence sample wins the surface form
    assert_eq!(typography[0].sample, "SHIP SOONER");
    assert_eq!(typography[0].confidence, ConfidenceLevel::High);
    assert_eq!(typography[0].sources, vec!["a.png", "b.png"]);
}
