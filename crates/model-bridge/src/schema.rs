//! Field-level schema validation for collaborator-supplied detections

use brand_extract_common::{fields, ConfidenceLevel, Detection, ProcessingError, SpecSection};
use serde_json::{json, Value};
use std::path::Path;

/// All field paths a collaborator may supply
const KNOWN_FIELDS: [&str; 22] = [
    fields::BRAND_NAME,
    fields::TAGLINE,
    fields::DESIGN_CONTEXT,
    fields::CORE_ATTRIBUTES,
    fields::COLOR_PALETTE,
    fields::TYPOGRAPHY,
    fields::LOGO_USAGE,
    fields::IMAGERY_PHOTOGRAPHY,
    fields::IMAGERY_ILLUSTRATION,
    fields::IMAGERY_ICONOGRAPHY,
    fields::IMAGERY_TEXTURES,
    fields::GRID_AND_SPACING,
    fields::KEY_COMPONENTS,
    fields::CALL_TO_ACTION,
    fields::INTERACTION_NOTES,
    fields::TONE_DESCRIPTORS,
    fields::MESSAGING_PILLARS,
    fields::DOS,
    fields::DONTS,
    fields::COPY_OBSERVATIONS,
    fields::PRODUCTION_NOTES,
    fields::CONFIDENCE_NOTE,
];

/// Validate one raw collaborator detection into a [`Detection`].
///
/// Violations are returned, never coerced; the caller logs and drops.
pub fn validate_detection(
    raw: &Value,
    source_asset: &Path,
) -> Result<Detection, ProcessingError> {
    let obj = raw.as_object().ok_or_else(|| violation("<root>", "detection must be an object"))?;

    let field_path = obj
        .get("field_path")
        .and_then(Value::as_str)
        .ok_or_else(|| violation("field_path", "missing or not a string"))?;
    if !KNOWN_FIELDS.contains(&field_path) || SpecSection::for_field_path(field_path).is_none() {
        return Err(violation(field_path, "unknown field path"));
    }

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_str)
        .ok_or_else(|| violation(field_path, "missing confidence level"))?;
    let confidence: ConfidenceLevel = serde_json::from_value(json!(confidence))
        .map_err(|_| violation(field_path, "confidence must be one of gap/low/medium/high"))?;

    let value = obj
        .get("value")
        .ok_or_else(|| violation(field_path, "missing value"))?;
    let value = validate_value(field_path, value)?;

    let mut detection = Detection::new(field_path, value, source_asset, confidence);
    if let Some(note) = obj.get("note").and_then(Value::as_str) {
        detection = detection.with_note(note);
    }
    Ok(detection)
}

/// Check the value's shape for its field and return the normalized form
fn validate_value(field_path: &str, value: &Value) -> Result<Value, ProcessingError> {
    match field_path {
        fields::COLOR_PALETTE => {
            let obj = value
                .as_object()
                .ok_or_else(|| violation(field_path, "palette value must be an object"))?;
            let hex = obj
                .get("hex")
                .and_then(Value::as_str)
                .ok_or_else(|| violation(field_path, "palette value needs a string hex"))?;
            let hex = normalize_hex(hex)
                .ok_or_else(|| violation(field_path, "hex must be six hex digits"))?;
            let text_field = |key: &str| -> Result<String, ProcessingError> {
                match obj.get(key) {
                    None | Some(Value::Null) => Ok(String::new()),
                    Some(Value::String(s)) => Ok(s.clone()),
                    Some(_) => Err(violation(field_path, "palette fields must be strings")),
                }
            };
            Ok(json!({
                "hex": hex,
                "name": text_field("name")?,
                "usage": text_field("usage")?,
                "finish": text_field("finish")?,
            }))
        }
        fields::TYPOGRAPHY => {
            let obj = value
                .as_object()
                .ok_or_else(|| violation(field_path, "typography value must be an object"))?;
            let required = |key: &str| -> Result<String, ProcessingError> {
                obj.get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        violation(field_path, format!("typography value needs a string {key}"))
                    })
            };
            Ok(json!({
                "sample": required("sample")?,
                "casing": required("casing")?,
                "weight": required("weight")?,
                "classification": required("classification")?,
            }))
        }
        _ => {
            let text = value
                .as_str()
                .ok_or_else(|| violation(field_path, "value must be a string"))?;
            if text.trim().is_empty() {
                return Err(violation(field_path, "value must not be empty"));
            }
            Ok(json!(text))
        }
    }
}

/// Normalize a hex color to uppercase "#RRGGBB"
#[must_use]
pub fn normalize_hex(raw: &str) -> Option<String> {
    let clean = raw.trim().trim_start_matches('#');
    if clean.len() != 6 || !clean.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", clean.to_ascii_uppercase()))
}

fn violation(field_path: impl Into<String>, reason: impl Into<String>) -> ProcessingError {
    ProcessingError::SchemaViolation {
        field_path: field_path.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("#b03030"), Some("#B03030".to_string()));
        assert_eq!(normalize_hex("204060"), Some("#204060".to_string()));
        assert_eq!(normalize_hex(" #B03030 "), Some("#B03030".to_string()));
        assert_eq!(normalize_hex("#fff"), None);
        assert_eq!(normalize_hex("not-a-color"), None);
    }

    #[test]
    fn test_rejects_non_string_list_value() {
        let raw = json!({
            "field_path": "voice_and_copy.dos",
            "value": 42,
            "confidence": "high",
        });
        let err = validate_detection(&raw, Path::new("a.png")).unwrap_err();
        assert!(matches!(err, ProcessingError::SchemaViolation { .. }));
    }

    #[test]
    fn test_rejects_bad_confidence() {
        let raw = json!({
            "field_path": "voice_and_copy.dos",
            "value": "use the primary palette",
            "confidence": "certain",
        });
        assert!(validate_detection(&raw, Path::new("a.png")).is_err());
    }

    #[test]
    fn test_accepts_typography_object() {
        let raw = json!({
            "field_path": "visual_identity.typography",
            "value": {
                "sample": "BUILD FASTER",
                "casing": "uppercase",
                "weight": "bold",
                "classification": "display",
            },
            "confidence": "medium",
            "note": "clear headline",
        });
        let detection = validate_detection(&raw, Path::new("a.png")).unwrap();
        assert_eq!(detection.confidence, ConfidenceLevel::Medium);
        assert_eq!(detection.note.as_deref(), Some("clear headline"));
    }

    #[test]
    fn test_palette_hex_normalized_on_ingest() {
        let raw = json!({
            "field_path": "visual_identity.color_palette",
            "value": {"hex": "b03030", "name": "Bold Red"},
            "confidence": "high",
        });
        let detection = validate_detection(&raw, Path::new("a.png")).unwrap();
        assert_eq!(detection.value["hex"], json!("#B03030"));
        assert_eq!(detection.value["usage"], json!(""));
    }
}
