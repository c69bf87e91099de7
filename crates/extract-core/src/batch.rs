//! Bounded-concurrency batch executor
//!
//! Runs per-asset extraction across a semaphore-limited worker pool and
//! enforces the per-asset time budget. Per-asset failures and timeouts
//! recover locally into gap-confidence extracts; a single bad asset never
//! aborts the batch. The returned extracts are re-ordered by ordinal so
//! the downstream fold sees stable input order regardless of completion
//! order.

use crate::config::ExtractConfig;
use crate::context::Context;
use crate::producer::DetectionProducer;
use brand_extract_common::{LoadedAsset, PerAssetExtract, ProcessingError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Cooperative cancellation flag checked between asset completions.
///
/// A cancelled run discards everything accumulated so far; no partial
/// result set ever reaches the normalizer.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Batch executor for per-asset extraction
pub struct BatchExecutor {
    max_concurrent: usize,
    asset_timeout: Option<Duration>,
    cancel: CancelFlag,
}

impl BatchExecutor {
    #[must_use]
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent_assets.max(1),
            asset_timeout: Some(config.asset_timeout()),
            cancel: CancelFlag::new(),
        }
    }

    /// Set timeout for each asset extraction.
    /// Use `None` to disable the budget (not recommended for production)
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.asset_timeout = timeout;
        self
    }

    /// Attach an externally held cancellation flag
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the producer over all assets and return one extract per asset,
    /// ordered by ordinal.
    pub async fn run(
        &self,
        ctx: &Context,
        producer: Arc<dyn DetectionProducer>,
        assets: Vec<LoadedAsset>,
    ) -> Result<Vec<PerAssetExtract>, ProcessingError> {
        let total = assets.len();
        info!(
            "=== Batch extraction started: {} assets, max concurrent {}, producer '{}' ===",
            total,
            self.max_concurrent,
            producer.name()
        );

        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.max_concurrent));
        let (tx, mut rx) = tokio::sync::mpsc::channel::<(usize, PerAssetExtract)>(total.max(1));

        for asset in assets {
            let tx = tx.clone();
            let semaphore = semaphore.clone();
            let producer = producer.clone();
            let ctx = ctx.clone();
            let asset_timeout = self.asset_timeout;

            tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return, // executor dropped, run abandoned
                };

                let ordinal = asset.record.ordinal;
                let record = asset.record.clone();
                let start = Instant::now();

                let extract = match asset_timeout {
                    Some(budget) => {
                        match tokio::time::timeout(budget, producer.extract(&ctx, &asset)).await {
                            Ok(result) => resolve_extract(result, &asset),
                            Err(_) => {
                                warn!(
                                    "Asset {} exceeded {}s budget, recording gap extract",
                                    record.display_name(),
                                    budget.as_secs()
                                );
                                PerAssetExtract::gap(
                                    record.clone(),
                                    format!("processing timeout after {}s", budget.as_secs()),
                                )
                            }
                        }
                    }
                    None => resolve_extract(producer.extract(&ctx, &asset).await, &asset),
                };

                if ctx.verbose {
                    info!(
                        "Asset {} extracted in {:.2}s ({} detections)",
                        record.display_name(),
                        start.elapsed().as_secs_f64(),
                        extract.detection_count()
                    );
                }

                let _ = tx.send((ordinal, extract)).await;
            });
        }
        drop(tx);

        let mut extracts: Vec<(usize, PerAssetExtract)> = Vec::with_capacity(total);
        while let Some(item) = rx.recv().await {
            if self.cancel.is_cancelled() {
                info!("Batch cancelled after {} completions; discarding", extracts.len());
                return Err(ProcessingError::Cancelled);
            }
            extracts.push(item);
        }
        if self.cancel.is_cancelled() {
            return Err(ProcessingError::Cancelled);
        }

        // Completion order is nondeterministic; the fold order must not be
        extracts.sort_by_key(|(ordinal, _)| *ordinal);

        info!("=== Batch extraction complete: {} extracts ===", extracts.len());
        Ok(extracts.into_iter().map(|(_, extract)| extract).collect())
    }
}

/// Convert a producer result into an extract, degrading errors to gap
fn resolve_extract(
    result: Result<PerAssetExtract, crate::error::ProducerError>,
    asset: &LoadedAsset,
) -> PerAssetExtract {
    match result {
        Ok(extract) => extract,
        Err(err) => {
            warn!(
                "Producer failed on {}: {err}; recording gap extract",
                asset.record.display_name()
            );
            PerAssetExtract::gap(asset.record.clone(), format!("extraction failed: {err}"))
        }
    }
}
