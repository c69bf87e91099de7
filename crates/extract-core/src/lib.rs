//! Core abstractions for the brand guideline extraction pipeline
//!
//! Defines the producer trait implemented by both the deterministic
//! extractors and the remote vision-model bridge, the execution context
//! threaded through all calls, run configuration, confidence scoring, and
//! the bounded-concurrency batch executor.

pub mod batch;
pub mod config;
pub mod context;
pub mod error;
pub mod producer;
pub mod scoring;

pub use batch::{BatchExecutor, CancelFlag};
pub use config::ExtractConfig;
pub use context::{Context, ExecutionMode};
pub use error::ProducerError;
pub use producer::DetectionProducer;
