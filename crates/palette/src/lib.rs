//! Palette extraction
//!
//! Ranks the prominent colors of a decoded asset by pixel-weighted cluster
//! prevalence. Clustering is a coarse RGB histogram (8 levels per channel)
//! over a bounded working size, which keeps the ranking invariant to input
//! resolution. Ties are broken by darker-luma-then-earlier-bin precedence
//! so repeated runs produce identical output.
//!
//! Degenerate inputs (solid color, fully transparent) yield a single
//! low-confidence swatch, never an error.

pub mod producer;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for palette extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Maximum number of swatches to emit (top-K)
    pub max_colors: usize,

    /// Upper bound on the working image edge; larger inputs are resized
    pub working_size: u32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_colors: 5,
            working_size: 600,
        }
    }
}

/// A single detected color and its contextual metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSwatch {
    /// Normalized uppercase hex, e.g. "#B03030"
    pub hex: String,
    /// Nearest named anchor, e.g. "Warm Red"
    pub name: String,
    /// Estimated usage role derived from prominence
    pub usage: String,
    /// Finish guess from saturation/brightness
    pub finish: String,
    /// Pixel share of this cluster (0.0-1.0)
    pub prominence: f32,
}

/// Result of palette extraction over one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteResult {
    /// Swatches ranked by prevalence, bounded to the configured top-K
    pub swatches: Vec<ColorSwatch>,
    /// Pixel share of the dominant cluster
    pub dominant_share: f32,
    /// Number of populated clusters before the top-K cut
    pub cluster_count: usize,
    /// True for solid/transparent inputs that collapse to one cluster
    pub degenerate: bool,
}

/// Named color anchors for labelling without extra dependencies
const NAMED_ANCHORS: [(&str, [u8; 3]); 19] = [
    ("Azure", [0, 161, 222]),
    ("Deep Blue", [0, 102, 204]),
    ("Navy", [17, 34, 68]),
    ("Sky", [102, 204, 255]),
    ("Midnight", [2, 20, 43]),
    ("Amber", [255, 149, 0]),
    ("Vivid Red", [220, 20, 60]),
    ("Warm Red", [200, 48, 48]),
    ("Slate", [112, 128, 144]),
    ("Charcoal", [54, 69, 79]),
    ("Stone", [189, 195, 199]),
    ("Cloud", [236, 240, 241]),
    ("Emerald", [46, 204, 113]),
    ("Mint", [171, 235, 198]),
    ("Lavender", [187, 143, 206]),
    ("Magenta", [214, 41, 118]),
    ("Gold", [255, 195, 0]),
    ("Ink", [12, 12, 12]),
    ("White", [255, 255, 255]),
];

// 8 quantization levels per channel
const LEVELS_SHIFT: u32 = 5;

struct Cluster {
    bin: usize,
    count: u64,
    sum: [u64; 3],
}

impl Cluster {
    fn mean(&self) -> [u8; 3] {
        let n = self.count.max(1);
        [
            (self.sum[0] / n) as u8,
            (self.sum[1] / n) as u8,
            (self.sum[2] / n) as u8,
        ]
    }
}

/// Extract the ranked palette of one decoded image
#[must_use]
pub fn extract_palette(image: &DynamicImage, config: &PaletteConfig) -> PaletteResult {
    let working = bounded_working_copy(image, config.working_size);
    let rgba = working.to_rgba8();

    let mut clusters: Vec<Option<Cluster>> = Vec::new();
    clusters.resize_with(512, || None);
    let mut total: u64 = 0;

    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        // Flatten alpha over white to avoid transparent noise
        let alpha = u32::from(a);
        let r = ((u32::from(r) * alpha + 255 * (255 - alpha)) / 255) as u8;
        let g = ((u32::from(g) * alpha + 255 * (255 - alpha)) / 255) as u8;
        let b = ((u32::from(b) * alpha + 255 * (255 - alpha)) / 255) as u8;

        let bin = ((usize::from(r) >> LEVELS_SHIFT) << 6)
            | ((usize::from(g) >> LEVELS_SHIFT) << 3)
            | (usize::from(b) >> LEVELS_SHIFT);
        let cluster = clusters[bin].get_or_insert_with(|| Cluster {
            bin,
            count: 0,
            sum: [0; 3],
        });
        cluster.count += 1;
        cluster.sum[0] += u64::from(r);
        cluster.sum[1] += u64::from(g);
        cluster.sum[2] += u64::from(b);
        total += 1;
    }

    let mut populated: Vec<Cluster> = clusters.into_iter().flatten().collect();
    let cluster_count = populated.len();
    if total == 0 || cluster_count == 0 {
        return PaletteResult {
            swatches: Vec::new(),
            dominant_share: 0.0,
            cluster_count: 0,
            degenerate: true,
        };
    }

    // Rank by prevalence; ties go to the darker, then earlier, bin
    populated.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| luma(a.mean()).cmp(&luma(b.mean())))
            .then_with(|| a.bin.cmp(&b.bin))
    });

    let degenerate = cluster_count == 1;
    let swatches: Vec<ColorSwatch> = populated
        .iter()
        .take(config.max_colors.max(1))
        .map(|cluster| {
            let mean = cluster.mean();
            let prominence = cluster.count as f32 / total as f32;
            ColorSwatch {
                hex: hex_of(mean),
                name: closest_named_anchor(mean).to_string(),
                usage: usage_hint(prominence).to_string(),
                finish: finish_guess(mean).to_string(),
                prominence,
            }
        })
        .collect();

    let dominant_share = swatches.first().map_or(0.0, |s| s.prominence);
    debug!(
        "Palette: {} clusters, dominant share {:.3}, degenerate={}",
        cluster_count, dominant_share, degenerate
    );

    PaletteResult {
        swatches,
        dominant_share,
        cluster_count,
        degenerate,
    }
}

/// Voice descriptor implied by the dominant swatch brightness
#[must_use]
pub fn tone_descriptor(dominant_hex: &str) -> &'static str {
    let brightness = relative_brightness(dominant_hex);
    if brightness < 0.35 {
        "confident and premium"
    } else if brightness < 0.6 {
        "assured and balanced"
    } else {
        "open and energizing"
    }
}

/// Perceptual brightness of a hex color (0.0-1.0)
#[must_use]
pub fn relative_brightness(hex: &str) -> f32 {
    let clean = hex.trim_start_matches('#');
    if clean.len() < 6 || !clean.is_ascii() {
        return 0.5;
    }
    let parse = |range| u8::from_str_radix(&clean[range], 16).unwrap_or(128);
    let r = f32::from(parse(0..2));
    let g = f32::from(parse(2..4));
    let b = f32::from(parse(4..6));
    (0.2126 * r + 0.7152 * g + 0.0722 * b) / 255.0
}

fn bounded_working_copy(image: &DynamicImage, working_size: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width <= working_size && height <= working_size {
        return image.clone();
    }
    image.resize(working_size, working_size, image::imageops::FilterType::Triangle)
}

fn luma(rgb: [u8; 3]) -> u32 {
    2126 * u32::from(rgb[0]) + 7152 * u32::from(rgb[1]) + 722 * u32::from(rgb[2])
}

fn hex_of(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

fn closest_named_anchor(rgb: [u8; 3]) -> &'static str {
    let distance = |anchor: [u8; 3]| -> u32 {
        anchor
            .iter()
            .zip(rgb.iter())
            .map(|(a, c)| {
                let d = i32::from(*a) - i32::from(*c);
                (d * d) as u32
            })
            .sum()
    };
    NAMED_ANCHORS
        .iter()
        .min_by_key(|(_, anchor)| distance(*anchor))
        .map(|(name, _)| *name)
        .unwrap_or("Unnamed")
}

fn usage_hint(prominence: f32) -> &'static str {
    if prominence >= 0.45 {
        "Dominant background or hero coverage"
    } else if prominence >= 0.25 {
        "Primary supporting block"
    } else if prominence >= 0.10 {
        "Accent or typography highlight"
    } else {
        "Detail accent"
    }
}

fn finish_guess(rgb: [u8; 3]) -> &'static str {
    let max = u32::from(*rgb.iter().max().unwrap_or(&0));
    let min = u32::from(*rgb.iter().min().unwrap_or(&0));
    let value = max as f32 / 255.0;
    let saturation = if max == 0 {
        0.0
    } else {
        (max - min) as f32 / max as f32
    };

    if saturation <= 0.08 {
        "matte neutral"
    } else if value >= 0.85 && saturation < 0.3 {
        "soft matte"
    } else if saturation >= 0.55 {
        "saturated solid"
    } else {
        "solid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn two_tone_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |_, y| {
            if y < height / 3 {
                Rgb([200, 48, 48])
            } else {
                Rgb([0, 161, 222])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_two_tone_ranking() {
        let config = PaletteConfig::default();
        let result = extract_palette(&two_tone_image(120, 120), &config);

        assert!(!result.degenerate);
        assert!(result.swatches.len() >= 2);
        // Blue covers two thirds of the canvas
        assert_eq!(result.swatches[0].hex, "#00A1DE");
        assert_eq!(result.swatches[1].hex, "#C83030");
        assert!(result.swatches[0].prominence > result.swatches[1].prominence);
    }

    #[test]
    fn test_resolution_invariance() {
        let config = PaletteConfig::default();
        let small = extract_palette(&two_tone_image(120, 120), &config);
        let large = extract_palette(&two_tone_image(900, 900), &config);

        let hexes = |r: &PaletteResult| -> Vec<String> {
            r.swatches.iter().take(2).map(|s| s.hex.clone()).collect()
        };
        assert_eq!(hexes(&small), hexes(&large));
    }

    #[test]
    fn test_solid_image_is_degenerate() {
        let img = RgbImage::from_pixel(64, 64, Rgb([0, 102, 204]));
        let result = extract_palette(&DynamicImage::ImageRgb8(img), &PaletteConfig::default());

        assert!(result.degenerate);
        assert_eq!(result.cluster_count, 1);
        assert_eq!(result.swatches.len(), 1);
        assert_eq!(result.swatches[0].hex, "#0066CC");
    }

    #[test]
    fn test_transparent_image_flattens_to_white() {
        let img = image::RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 0, 0]));
        let result = extract_palette(&DynamicImage::ImageRgba8(img), &PaletteConfig::default());

        assert!(result.degenerate);
        assert_eq!(result.swatches[0].hex, "#FFFFFF");
        assert_eq!(result.swatches[0].name, "White");
    }

    #[test]
    fn test_top_k_bound() {
        let img = RgbImage::from_fn(128, 128, |x, _| {
            // Eight distinct vertical bands
            let band = (x / 16) as u8;
            Rgb([band * 30, 255 - band * 30, 128])
        });
        let config = PaletteConfig {
            max_colors: 3,
            ..PaletteConfig::default()
        };
        let result = extract_palette(&DynamicImage::ImageRgb8(img), &config);
        assert_eq!(result.swatches.len(), 3);
        assert!(result.cluster_count > 3);
    }

    #[test]
    fn test_tone_descriptor_brightness_bands() {
        assert_eq!(tone_descriptor("#02142B"), "confident and premium");
        assert_eq!(tone_descriptor("#C83030"), "assured and balanced");
        assert_eq!(tone_descriptor("#ECF0F1"), "open and energizing");
    }

    #[test]
    fn test_usage_hint_thresholds() {
        assert_eq!(usage_hint(0.5), "Dominant background or hero coverage");
        assert_eq!(usage_hint(0.3), "Primary supporting block");
        assert_eq!(usage_hint(0.12), "Accent or typography highlight");
        assert_eq!(usage_hint(0.05), "Detail accent");
    }
}
