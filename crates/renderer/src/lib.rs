//! Guideline document rendering
//!
//! Projects the canonical specification onto a fixed section grammar.
//! Every grammar-defined section appears exactly once, in grammar order,
//! even with no backing data; empty sections carry a "needs review"
//! placeholder instead of being omitted. The same specification also
//! serializes losslessly to structured JSON, with no information
//! asymmetry between the two forms.

pub mod render;
pub mod validate;

pub use render::{build_document, render_markdown, render_structured, RenderError};
pub use validate::{diff_sections, SectionDiff};

use serde::{Deserialize, Serialize};

/// The reference section grammar: names and order of every rendered
/// section. This constant is the contract the validator checks against.
pub const SECTION_GRAMMAR: [&str; 9] = [
    "Brand Identity",
    "Tone of Voice",
    "Color",
    "Typography",
    "Logo",
    "Imagery & Iconography",
    "Layout & Components",
    "Production Notes",
    "Confidence & Follow-ups",
];

/// One rendered section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: Vec<String>,
}

/// The final rendered document: an ordered sequence of named sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

impl GuidelineDocument {
    /// Section names in document order
    #[must_use]
    pub fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.title.clone()).collect()
    }
}
