//! Remote vision-model bridge
//!
//! Adapts pre-validated structured detections from an externally hosted
//! vision model into the same per-asset extract the deterministic
//! extractors produce, so the normalizer stays producer-agnostic.
//!
//! Collaborator payloads are field-level validated on the way in: a
//! detection violating the expected field schema is rejected and logged,
//! never silently coerced, and never halts the run.

pub mod schema;

use async_trait::async_trait;
use brand_extract_common::{
    fields, ConfidenceLevel, Detection, LoadedAsset, PerAssetExtract,
};
use brand_extract_core::{Context, DetectionProducer, ProducerError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Detection producer backed by an external vision-model collaborator.
///
/// The collaborator has already run; this producer only holds its raw
/// per-asset payloads and validates them into detections on demand.
pub struct RemoteModelProducer {
    name: String,
    payloads: HashMap<PathBuf, Vec<Value>>,
}

impl RemoteModelProducer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payloads: HashMap::new(),
        }
    }

    /// Attach the collaborator's raw detection list for one asset. Each
    /// entry must be an object `{field_path, value, confidence, note?}`.
    #[must_use]
    pub fn with_payload(mut self, asset_path: impl Into<PathBuf>, detections: Vec<Value>) -> Self {
        self.payloads.insert(asset_path.into(), detections);
        self
    }
}

#[async_trait]
impl DetectionProducer for RemoteModelProducer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(
        &self,
        ctx: &Context,
        asset: &LoadedAsset,
    ) -> Result<PerAssetExtract, ProducerError> {
        let record = &asset.record;
        let Some(raw_detections) = self.payloads.get(&record.path) else {
            return Ok(PerAssetExtract::gap(
                record.clone(),
                "no remote detections supplied for asset",
            ));
        };

        let mut extract = PerAssetExtract::new(record.clone());
        let mut rejected = 0usize;

        for raw in raw_detections {
            match schema::validate_detection(raw, &record.path) {
                Ok(detection) => extract.push(detection),
                Err(violation) => {
                    rejected += 1;
                    warn!(
                        "Rejected remote detection for {}: {violation}",
                        record.display_name()
                    );
                }
            }
        }

        if rejected > 0 {
            extract.push(Detection::new(
                fields::CONFIDENCE_NOTE,
                json!(format!(
                    "{rejected} remote detection{} rejected (schema violations)",
                    if rejected == 1 { "" } else { "s" }
                )),
                &record.path,
                ConfidenceLevel::Low,
            ));
        }

        if ctx.verbose {
            debug!(
                "Remote producer '{}': {} detections, {} rejected for {}",
                self.name,
                extract.detection_count(),
                rejected,
                record.display_name()
            );
        }
        Ok(extract)
    }
}
