//! Document assembly and serialization

use crate::{GuidelineDocument, Section, SECTION_GRAMMAR};
use brand_extract_common::ProcessingError;
use brand_extract_normalizer::{CanonicalSpec, ConfidenceNote, SpecValue};
use thiserror::Error;
use tracing::{debug, warn};

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<RenderError> for ProcessingError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvariantViolation(msg) => {
                ProcessingError::RenderInvariantViolation(msg)
            }
            RenderError::Serialization(e) => ProcessingError::Other(e.to_string()),
        }
    }
}

/// Literal placeholder rendered when no legible text was detected
pub const NO_TEXT_PLACEHOLDER: &str = "no legible text detected";

/// Build the guideline document from a canonical specification.
///
/// In strict mode a section missing a resolvable placeholder is fatal;
/// otherwise it is patched and logged.
pub fn build_document(spec: &CanonicalSpec, strict: bool) -> Result<GuidelineDocument, RenderError> {
    let brand_label = spec
        .brand_identity
        .brand_name
        .as_ref()
        .map_or("Brand", |v| v.value.as_str());

    let document = GuidelineDocument {
        title: format!("{brand_label} Brand Guidelines (Auto-generated)"),
        sections: vec![
            brand_identity_section(spec),
            tone_of_voice_section(spec),
            color_section(spec),
            typography_section(spec),
            logo_section(spec),
            imagery_section(spec),
            layout_section(spec),
            production_notes_section(spec),
            confidence_section(spec),
        ],
    };

    enforce_grammar(document, strict)
}

/// Check the structural-parity invariant: section names must equal the
/// grammar exactly and every section must carry a body.
pub(crate) fn enforce_grammar(
    mut document: GuidelineDocument,
    strict: bool,
) -> Result<GuidelineDocument, RenderError> {
    let names = document.section_names();
    if names != SECTION_GRAMMAR {
        let message = format!(
            "section sequence {names:?} does not match the grammar {SECTION_GRAMMAR:?}"
        );
        if strict {
            return Err(RenderError::InvariantViolation(message));
        }
        warn!("{message}");
    }

    for section in &mut document.sections {
        if section.body.is_empty() {
            let message = format!("section '{}' has no resolvable placeholder", section.title);
            if strict {
                return Err(RenderError::InvariantViolation(message));
            }
            warn!("{message}; patching");
            section
                .body
                .push(format!("- Needs review: no data for {}.", section.title));
        }
    }

    debug!("Document assembled: {} sections", document.sections.len());
    Ok(document)
}

/// Render the document to Markdown with a table of contents
#[must_use]
pub fn render_markdown(document: &GuidelineDocument) -> String {
    let mut lines: Vec<String> = vec![format!("# {}", document.title), String::new()];
    lines.push("## Table of Contents".to_string());
    lines.push(String::new());
    for section in &document.sections {
        let anchor = section.title.to_lowercase().replace(' ', "-");
        lines.push(format!("- [{}](#{anchor})", section.title));
    }
    lines.push(String::new());
    lines.push("***".to_string());
    lines.push(String::new());

    for section in &document.sections {
        lines.push(format!("## {}", section.title));
        lines.push(String::new());
        lines.extend(section.body.iter().cloned());
        if section.body.last().is_some_and(|l| !l.is_empty()) {
            lines.push(String::new());
        }
        lines.push("***".to_string());
        lines.push(String::new());
    }

    lines.push("_Generated from the current design asset gallery._".to_string());
    lines.join("\n")
}

/// Serialize the canonical specification to its lossless structured form
pub fn render_structured(spec: &CanonicalSpec) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(spec)?)
}

fn bullet(value: &SpecValue) -> String {
    format!("- {} _({})_", value.value, value.confidence)
}

fn sources_label(sources: &[String]) -> String {
    if sources.is_empty() {
        "—".to_string()
    } else {
        sources.join(", ")
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "—"
    } else {
        text
    }
}

fn brand_identity_section(spec: &CanonicalSpec) -> Section {
    let identity = &spec.brand_identity;
    let mut body = Vec::new();

    if let Some(name) = &identity.brand_name {
        body.push(format!("- Brand name: **{}** _({})_", name.value, name.confidence));
    }
    if let Some(tagline) = &identity.tagline {
        body.push(format!(
            "- Tagline candidate: \"{}\" _({})_",
            tagline.value, tagline.confidence
        ));
    }
    if !identity.design_context.is_empty() {
        let contexts: Vec<&str> =
            identity.design_context.iter().map(|v| v.value.as_str()).collect();
        body.push(format!("- Observed design contexts: {}.", contexts.join(", ")));
    }
    if !identity.core_attributes.is_empty() {
        let attributes: Vec<&str> =
            identity.core_attributes.iter().map(|v| v.value.as_str()).collect();
        body.push(format!("- Core attributes surfaced: {}.", attributes.join(", ")));
    }

    if body.is_empty() {
        body.push(
            "- Needs review: no brand identity signals detected across the asset set."
                .to_string(),
        );
    }
    Section {
        title: "Brand Identity".to_string(),
        body,
    }
}

fn tone_of_voice_section(spec: &CanonicalSpec) -> Section {
    let voice = &spec.voice_and_copy;
    let mut body = vec!["### What Defines the Voice".to_string()];

    if voice.tone_descriptors.is_empty() {
        body.push("- Needs review: palette and copy analysis surfaced no tone descriptors; retain a neutral authoritative tone.".to_string());
    } else {
        for tone in &voice.tone_descriptors {
            body.push(bullet(tone));
        }
    }

    body.push(String::new());
    body.push("### Key Voice Principles".to_string());
    if voice.messaging_pillars.is_empty() {
        body.push("- Needs review: no messaging pillars detected.".to_string());
    } else {
        for (idx, pillar) in voice.messaging_pillars.iter().enumerate() {
            body.push(format!("{}. **{}**", idx + 1, pillar.value));
        }
    }

    if !voice.dos.is_empty() || !voice.donts.is_empty() {
        body.push(String::new());
        if !voice.dos.is_empty() {
            let dos: Vec<&str> = voice.dos.iter().map(|v| v.value.as_str()).collect();
            body.push(format!("- **Do:** {}", dos.join(", ")));
        }
        if !voice.donts.is_empty() {
            let donts: Vec<&str> = voice.donts.iter().map(|v| v.value.as_str()).collect();
            body.push(format!("- **Don't:** {}", donts.join(", ")));
        }
    }

    if !voice.copy_observations.is_empty() {
        body.push(String::new());
        body.push("### Observed Copy".to_string());
        for line in &voice.copy_observations {
            body.push(format!("- \"{}\"", line.value));
        }
    }

    Section {
        title: "Tone of Voice".to_string(),
        body,
    }
}

fn color_section(spec: &CanonicalSpec) -> Section {
    let palette = &spec.visual_identity.color_palette;
    let mut body = vec!["### Palette Overview".to_string()];

    if palette.is_empty() {
        body.push(
            "- Needs review: no colors detected; verify source assets and rerun analysis."
                .to_string(),
        );
    } else {
        body.push("| Hex | Name | Usage | Finish | Confidence | Sources |".to_string());
        body.push("| --- | ---- | ----- | ------ | ---------- | ------- |".to_string());
        for entry in palette {
            body.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                entry.hex,
                or_dash(&entry.name),
                or_dash(&entry.usage),
                or_dash(&entry.finish),
                entry.confidence,
                sources_label(&entry.sources)
            ));
        }
        body.push(String::new());
        body.push(
            "- Ensure minimum 4.5:1 contrast for primary copy against backgrounds.".to_string(),
        );
    }

    Section {
        title: "Color".to_string(),
        body,
    }
}

fn typography_section(spec: &CanonicalSpec) -> Section {
    let typography = &spec.visual_identity.typography;
    let mut body = Vec::new();

    if typography.is_empty() {
        body.push(format!("- Needs review: {NO_TEXT_PLACEHOLDER}."));
    } else {
        body.push("| Sample | Casing | Weight | Classification | Confidence | Sources |".to_string());
        body.push("| ------ | ------ | ------ | -------------- | ---------- | ------- |".to_string());
        for entry in typography {
            body.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                entry.sample,
                or_dash(&entry.casing),
                or_dash(&entry.weight),
                or_dash(&entry.classification),
                entry.confidence,
                sources_label(&entry.sources)
            ));
        }
    }

    Section {
        title: "Typography".to_string(),
        body,
    }
}

fn logo_section(spec: &CanonicalSpec) -> Section {
    let logo_usage = &spec.visual_identity.logo_usage;
    let palette = &spec.visual_identity.color_palette;
    let mut body = Vec::new();

    if let Some(primary) = palette.first() {
        body.push(format!(
            "- Primary lockup: symbol + wordmark in {} on white or a deep neutral.",
            primary.hex
        ));
        body.push("- Maintain 1x clearspace buffer around the combined lockup.".to_string());
    }
    for usage in logo_usage {
        body.push(bullet(usage));
    }

    if body.is_empty() {
        body.push("- Needs review: no logo treatments detected across the asset set.".to_string());
    }
    Section {
        title: "Logo".to_string(),
        body,
    }
}

fn imagery_section(spec: &CanonicalSpec) -> Section {
    let imagery = &spec.visual_identity.imagery_style;
    let palette = &spec.visual_identity.color_palette;
    let mut body = Vec::new();

    let groups: [(&str, &Vec<SpecValue>); 4] = [
        ("Photography", &imagery.photography),
        ("Illustration", &imagery.illustration),
        ("Iconography", &imagery.iconography),
        ("Textures & patterns", &imagery.textures_and_patterns),
    ];
    for (label, values) in groups {
        if !values.is_empty() {
            let items: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
            body.push(format!("- {label}: {}.", items.join(", ")));
        }
    }
    if let Some(primary) = palette.first() {
        body.push(format!(
            "- Icon tint: {} with white fill for contrast.",
            primary.hex
        ));
    }

    if body.is_empty() {
        body.push("- Needs review: no imagery or iconography cues detected.".to_string());
    }
    Section {
        title: "Imagery & Iconography".to_string(),
        body,
    }
}

fn layout_section(spec: &CanonicalSpec) -> Section {
    let layout = &spec.layout_and_components;
    let mut body = Vec::new();

    if !layout.grid_and_spacing.is_empty() {
        body.push("### Grid & Spacing".to_string());
        for value in &layout.grid_and_spacing {
            body.push(bullet(value));
        }
    }
    if !layout.key_components.is_empty() {
        if !body.is_empty() {
            body.push(String::new());
        }
        body.push("### Key Components".to_string());
        for value in &layout.key_components {
            body.push(bullet(value));
        }
    }
    if !layout.call_to_action_treatment.is_empty() {
        if !body.is_empty() {
            body.push(String::new());
        }
        body.push("### Call-to-Action Treatment".to_string());
        for value in &layout.call_to_action_treatment {
            body.push(bullet(value));
        }
    }
    if !layout.interaction_notes.is_empty() {
        if !body.is_empty() {
            body.push(String::new());
        }
        body.push("### Interaction Notes".to_string());
        for value in &layout.interaction_notes {
            body.push(bullet(value));
        }
    }

    if body.is_empty() {
        body.push("- Needs review: no layout or component structure detected.".to_string());
    }
    Section {
        title: "Layout & Components".to_string(),
        body,
    }
}

fn production_notes_section(spec: &CanonicalSpec) -> Section {
    let mut body = Vec::new();
    if spec.production_notes.is_empty() {
        body.push("- Needs review: no production notes recorded.".to_string());
    } else {
        for note in &spec.production_notes {
            body.push(bullet(note));
        }
    }
    Section {
        title: "Production Notes".to_string(),
        body,
    }
}

fn confidence_section(spec: &CanonicalSpec) -> Section {
    let confidence = &spec.confidence;
    let mut body = vec![format!("Overall confidence: **{}**", confidence.overall)];

    if confidence.notes.is_empty() {
        body.push("- Needs review: no per-asset follow-ups recorded.".to_string());
    } else {
        for ConfidenceNote { asset, note, level } in &confidence.notes {
            body.push(format!("- **{asset}:** {note} _({level})_"));
        }
    }
    Section {
        title: "Confidence & Follow-ups".to_string(),
        body,
    }
}
