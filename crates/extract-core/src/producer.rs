//! Detection producer trait
//!
//! Both the deterministic local extractors and the remote vision-model
//! bridge implement this trait, so the normalizer never knows where an
//! extract came from.

use crate::context::Context;
use crate::error::ProducerError;
use async_trait::async_trait;
use brand_extract_common::{LoadedAsset, PerAssetExtract};

/// A producer of per-asset detections.
///
/// Implementations must be side-effect-free beyond reading their own
/// asset: per-asset extraction runs concurrently with no shared mutable
/// state.
#[async_trait]
pub trait DetectionProducer: Send + Sync {
    /// Unique producer identifier
    fn name(&self) -> &str;

    /// Extract all detections for one asset.
    ///
    /// An unreadable payload must degrade to a gap-confidence extract,
    /// never an error; errors here are reserved for producer-internal
    /// failures the batch executor converts to gap extracts itself.
    async fn extract(
        &self,
        ctx: &Context,
        asset: &LoadedAsset,
    ) -> Result<PerAssetExtract, ProducerError>;
}
