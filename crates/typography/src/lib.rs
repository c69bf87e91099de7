//! Text and typography extraction
//!
//! Recognized text comes from a pluggable [`TextRecognizer`] collaborator;
//! this crate owns the span cleanup and the type-attribute inference
//! (casing, weight from stroke contrast where a bounding hint exists,
//! display/headline/body classification). A missing or failing recognizer
//! degrades to an empty span list, never an error.

pub mod producer;

use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a text-recognition collaborator can report
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Recognizer unavailable: {0}")]
    Unavailable(String),

    #[error("Recognition failed: {0}")]
    Failed(String),
}

/// Bounding hint with normalized coordinates (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One recognized text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    /// Recognized text content
    pub text: String,
    /// Recognizer-reported confidence (0.0-1.0), if any
    pub confidence: Option<f32>,
    /// Bounding hint, if the recognizer provides one
    pub bounds: Option<SpanBounds>,
}

/// Pluggable text-recognition collaborator
pub trait TextRecognizer: Send + Sync {
    /// Collaborator identifier for logging
    fn name(&self) -> &str;

    /// Recognize text spans in an RGB image
    fn recognize(&self, image: &RgbImage) -> Result<Vec<RecognizedSpan>, RecognizerError>;
}

/// Configuration for text extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypographyConfig {
    /// Minimum span length kept after whitespace normalization
    pub min_span_length: usize,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self { min_span_length: 3 }
    }
}

/// Casing class of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    Uppercase,
    Lowercase,
    Title,
    Mixed,
}

impl Casing {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Title => "title",
            Self::Mixed => "mixed",
        }
    }
}

/// Inferred weight class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    Bold,
    Medium,
    Regular,
}

impl Weight {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Medium => "medium",
            Self::Regular => "regular",
        }
    }
}

/// Typographic role of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Display,
    Headline,
    Body,
}

impl Classification {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Headline => "headline",
            Self::Body => "body",
        }
    }
}

/// Lightweight description of detected typographic usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSample {
    pub text: String,
    pub casing: Casing,
    pub weight: Weight,
    pub classification: Classification,
}

/// All text signals collected from one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextExtraction {
    /// Cleaned spans in recognizer order
    pub spans: Vec<RecognizedSpan>,
    /// One sample per distinct span
    pub samples: Vec<TypeSample>,
    /// Mean recognizer-reported score, when available
    pub mean_recognizer_score: Option<f32>,
    /// Total recognized characters after cleanup
    pub char_count: usize,
    /// Reason extraction degraded (recognizer absent or failing)
    pub degraded: Option<String>,
}

impl TextExtraction {
    fn empty(degraded: Option<String>) -> Self {
        Self {
            spans: Vec::new(),
            samples: Vec::new(),
            mean_recognizer_score: None,
            char_count: 0,
            degraded,
        }
    }
}

/// Extract text spans and typography samples from one decoded image
#[must_use]
pub fn extract_text(
    image: &DynamicImage,
    recognizer: Option<&dyn TextRecognizer>,
    config: &TypographyConfig,
) -> TextExtraction {
    let Some(recognizer) = recognizer else {
        return TextExtraction::empty(Some("no text recognizer configured".to_string()));
    };

    let rgb = image.to_rgb8();
    let raw = match recognizer.recognize(&rgb) {
        Ok(spans) => spans,
        Err(err) => {
            warn!("Recognizer '{}' failed: {err}", recognizer.name());
            return TextExtraction::empty(Some(err.to_string()));
        }
    };

    let gray = image.to_luma8();
    let mut seen: HashSet<String> = HashSet::new();
    let mut spans = Vec::with_capacity(raw.len());
    let mut samples = Vec::with_capacity(raw.len());
    let mut score_sum = 0.0_f32;
    let mut score_count = 0usize;
    let mut char_count = 0usize;

    for span in raw {
        let normalized = span.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.chars().count() < config.min_span_length {
            continue;
        }
        if !seen.insert(normalized.to_lowercase()) {
            continue;
        }
        if let Some(score) = span.confidence {
            score_sum += score;
            score_count += 1;
        }
        char_count += normalized.chars().count();

        let stroke = span.bounds.and_then(|b| ink_ratio(&gray, b));
        samples.push(TypeSample {
            casing: infer_casing(&normalized),
            weight: infer_weight(&normalized, stroke),
            classification: infer_classification(&normalized),
            text: normalized.clone(),
        });
        spans.push(RecognizedSpan {
            text: normalized,
            confidence: span.confidence,
            bounds: span.bounds,
        });
    }

    let mean_recognizer_score = if score_count > 0 {
        Some(score_sum / score_count as f32)
    } else {
        None
    };
    debug!(
        "Text extraction: {} spans, {} chars, recognizer '{}'",
        spans.len(),
        char_count,
        recognizer.name()
    );

    TextExtraction {
        spans,
        samples,
        mean_recognizer_score,
        char_count,
        degraded: None,
    }
}

/// Fraction of uppercase letters across all recognized lines
#[must_use]
pub fn uppercase_ratio(lines: &[String]) -> f32 {
    let mut letters = 0usize;
    let mut uppercase = 0usize;
    for line in lines {
        for ch in line.chars() {
            if ch.is_alphabetic() {
                letters += 1;
                if ch.is_uppercase() {
                    uppercase += 1;
                }
            }
        }
    }
    if letters == 0 {
        0.0
    } else {
        uppercase as f32 / letters as f32
    }
}

fn infer_casing(text: &str) -> Casing {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return Casing::Mixed;
    }
    if letters.iter().all(|c| c.is_uppercase()) {
        return Casing::Uppercase;
    }
    if letters.iter().all(|c| c.is_lowercase()) {
        return Casing::Lowercase;
    }
    if letters[0].is_uppercase() {
        return Casing::Title;
    }
    Casing::Mixed
}

/// Stroke contrast first: a measured ink ratio in the span's bounding
/// region beats the text-shape fallback.
fn infer_weight(text: &str, ink_ratio: Option<f32>) -> Weight {
    if let Some(ink) = ink_ratio {
        if ink >= 0.40 {
            return Weight::Bold;
        }
        if ink <= 0.15 {
            return Weight::Regular;
        }
        return Weight::Medium;
    }
    if text.chars().count() <= 12 && text.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase()) {
        Weight::Bold
    } else if text.split_whitespace().count() >= 8 {
        Weight::Regular
    } else {
        Weight::Medium
    }
}

fn infer_classification(text: &str) -> Classification {
    let words = text.split_whitespace().count();
    let all_upper = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase());
    if words <= 4 && all_upper && text.chars().any(|c| c.is_alphabetic()) {
        Classification::Display
    } else if words <= 8 {
        Classification::Headline
    } else {
        Classification::Body
    }
}

/// Fraction of dark pixels inside a normalized bounding region
fn ink_ratio(gray: &GrayImage, bounds: SpanBounds) -> Option<f32> {
    let (width, height) = gray.dimensions();
    let x0 = (bounds.x * width as f32) as u32;
    let y0 = (bounds.y * height as f32) as u32;
    let x1 = (((bounds.x + bounds.width) * width as f32) as u32).min(width);
    let y1 = (((bounds.y + bounds.height) * height as f32) as u32).min(height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let mut dark = 0u32;
    let mut total = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            if gray.get_pixel(x, y)[0] < 128 {
                dark += 1;
            }
            total += 1;
        }
    }
    Some(dark as f32 / total.max(1) as f32)
}
