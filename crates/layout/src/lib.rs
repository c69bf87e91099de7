//! Layout and geometry analysis
//!
//! Produces coarse structural descriptors from edge/contrast heuristics:
//! orientation class, whitespace-ratio bucket, focal regions on a thirds
//! grid, mirror-symmetry class, and a rectilinear component estimate.
//! When an image carries no strong edges the structural descriptors are
//! withheld (gap confidence downstream) instead of fabricated.

pub mod producer;

use image::DynamicImage;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::sobel_gradients;
use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Thirds-grid region labels, row-major
pub const GRID_REGIONS: [&str; 9] = [
    "top-left",
    "top-center",
    "top-right",
    "middle-left",
    "center",
    "middle-right",
    "bottom-left",
    "bottom-center",
    "bottom-right",
];

/// Configuration for layout analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gaussian blur sigma applied before measurement
    pub blur_sigma: f32,
    /// Luminance floor (0.0-1.0) counted as whitespace
    pub whitespace_luminance: f32,
    /// Darkness threshold for a grid cell to count as focal
    pub focal_darkness: f32,
    /// Sobel magnitude above which a pixel counts as a strong edge
    pub edge_magnitude_threshold: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.5,
            whitespace_luminance: 0.9,
            focal_darkness: 0.35,
            edge_magnitude_threshold: 200,
        }
    }
}

/// Orientation class from the aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Square => "square",
        }
    }
}

/// Whitespace-ratio bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceBucket {
    Airy,
    Balanced,
    Dense,
}

impl WhitespaceBucket {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Airy => "airy",
            Self::Balanced => "balanced",
            Self::Dense => "dense",
        }
    }
}

/// Mirror-symmetry class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymmetryClass {
    /// Mirrored across both axes
    Centered,
    /// Mirrored across the vertical axis (left/right)
    VerticalAxis,
    /// Mirrored across the horizontal axis (top/bottom)
    HorizontalAxis,
    Asymmetric,
}

impl SymmetryClass {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Centered => "centered",
            Self::VerticalAxis => "vertical-axis",
            Self::HorizontalAxis => "horizontal-axis",
            Self::Asymmetric => "asymmetric",
        }
    }
}

/// Edge-derived descriptors; withheld when the image has no structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSummary {
    pub symmetry: SymmetryClass,
    /// Coarse count of rectilinear blocks
    pub component_estimate: usize,
}

/// Coarse layout descriptors for one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub aspect_ratio: f32,
    pub orientation: Orientation,
    pub whitespace_ratio: f32,
    pub whitespace_bucket: WhitespaceBucket,
    /// Thirds-grid regions carrying visual weight
    pub focal_regions: Vec<String>,
    /// Fraction of pixels carrying strong edges
    pub edge_coverage: f32,
    /// None when no strong edges were found
    pub structure: Option<StructureSummary>,
}

/// Produce coarse layout descriptors for one decoded image
#[must_use]
pub fn analyze_layout(image: &DynamicImage, config: &LayoutConfig) -> LayoutSummary {
    let gray = image.to_luma8();
    let blurred = gaussian_blur_f32(&gray, config.blur_sigma);
    let (width, height) = blurred.dimensions();

    let arr = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        f32::from(blurred.get_pixel(x as u32, y as u32)[0]) / 255.0
    });

    let aspect_ratio = if height > 0 {
        width as f32 / height as f32
    } else {
        1.0
    };
    let orientation = orientation_from_ratio(aspect_ratio);

    let total = arr.len().max(1) as f32;
    let whitespace_ratio = arr
        .iter()
        .filter(|v| **v >= config.whitespace_luminance)
        .count() as f32
        / total;
    let whitespace_bucket = bucket_whitespace(whitespace_ratio);

    let focal_regions = resolve_focal_regions(&arr, config.focal_darkness);

    let edges = sobel_gradients(&blurred);
    let strong: Vec<bool> = edges
        .pixels()
        .map(|p| p[0] > config.edge_magnitude_threshold)
        .collect();
    let edge_coverage = strong.iter().filter(|s| **s).count() as f32 / total;

    let structure = if edge_coverage >= 0.002 {
        Some(StructureSummary {
            symmetry: classify_symmetry(&arr),
            component_estimate: estimate_components(
                &strong,
                width as usize,
                height as usize,
            ),
        })
    } else {
        None
    };

    debug!(
        "Layout: {} {:.2}, whitespace {:.2}, edges {:.4}, structure={}",
        orientation.label(),
        aspect_ratio,
        whitespace_ratio,
        edge_coverage,
        structure.is_some()
    );

    LayoutSummary {
        aspect_ratio,
        orientation,
        whitespace_ratio,
        whitespace_bucket,
        focal_regions,
        edge_coverage,
        structure,
    }
}

fn orientation_from_ratio(ratio: f32) -> Orientation {
    if ratio > 1.15 {
        Orientation::Landscape
    } else if ratio < 0.85 {
        Orientation::Portrait
    } else {
        Orientation::Square
    }
}

fn bucket_whitespace(ratio: f32) -> WhitespaceBucket {
    if ratio >= 0.5 {
        WhitespaceBucket::Airy
    } else if ratio >= 0.3 {
        WhitespaceBucket::Balanced
    } else {
        WhitespaceBucket::Dense
    }
}

fn resolve_focal_regions(arr: &Array2<f32>, darkness_threshold: f32) -> Vec<String> {
    let (height, width) = arr.dim();
    if height < 3 || width < 3 {
        return Vec::new();
    }
    let third_h = height / 3;
    let third_w = width / 3;
    let mut regions = Vec::new();

    for (idx, label) in GRID_REGIONS.iter().enumerate() {
        let row = idx / 3;
        let col = idx % 3;
        let y0 = row * third_h;
        let y1 = if row < 2 { (row + 1) * third_h } else { height };
        let x0 = col * third_w;
        let x1 = if col < 2 { (col + 1) * third_w } else { width };
        let cell = arr.slice(s![y0..y1, x0..x1]);
        if cell.is_empty() {
            continue;
        }
        let darkness = 1.0 - cell.mean().unwrap_or(1.0);
        if darkness > darkness_threshold {
            regions.push((*label).to_string());
        }
    }
    regions
}

fn classify_symmetry(arr: &Array2<f32>) -> SymmetryClass {
    let mirror_threshold = 0.06;

    let flipped_h = arr.slice(s![.., ..;-1]);
    let h_diff = arr
        .iter()
        .zip(flipped_h.iter())
        .map(|(a, b)| (a - b).abs())
        .sum::<f32>()
        / arr.len().max(1) as f32;

    let flipped_v = arr.slice(s![..;-1, ..]);
    let v_diff = arr
        .iter()
        .zip(flipped_v.iter())
        .map(|(a, b)| (a - b).abs())
        .sum::<f32>()
        / arr.len().max(1) as f32;

    match (h_diff < mirror_threshold, v_diff < mirror_threshold) {
        (true, true) => SymmetryClass::Centered,
        (true, false) => SymmetryClass::VerticalAxis,
        (false, true) => SymmetryClass::HorizontalAxis,
        (false, false) => SymmetryClass::Asymmetric,
    }
}

/// Count bands of edge-dense rows/columns and derive a block estimate.
/// A single rectangle contributes two column bands and two row bands.
fn estimate_components(strong: &[bool], width: usize, height: usize) -> usize {
    let band_density = 0.05;

    let mut col_runs = 0;
    let mut in_run = false;
    for x in 0..width {
        let edges_in_col = (0..height).filter(|y| strong[y * width + x]).count();
        let active = edges_in_col as f32 / height.max(1) as f32 > band_density;
        if active && !in_run {
            col_runs += 1;
        }
        in_run = active;
    }

    let mut row_runs = 0;
    in_run = false;
    for y in 0..height {
        let edges_in_row = (0..width).filter(|x| strong[y * width + x]).count();
        let active = edges_in_row as f32 / width.max(1) as f32 > band_density;
        if active && !in_run {
            row_runs += 1;
        }
        in_run = active;
    }

    ((col_runs / 2).max(1)) * ((row_runs / 2).max(1))
}
