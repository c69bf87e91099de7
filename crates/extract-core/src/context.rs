//! Execution context threaded through producer and renderer calls

use serde::{Deserialize, Serialize};

/// Execution mode that determines strictness and verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Debug mode - verbose logging, render invariants are fatal
    Debug,

    /// Standard mode - invariant violations degrade to logged warnings
    Standard,

    /// Bulk mode - minimal logging for large batches
    Bulk,
}

/// Context passed to producers and the renderer during a run.
///
/// There are no run-wide mutable globals; everything configurable travels
/// here so the normalizer and renderer stay pure and independently
/// testable.
#[derive(Debug, Clone)]
pub struct Context {
    /// Execution mode
    pub mode: ExecutionMode,

    /// Whether a missing section placeholder aborts rendering
    pub strict: bool,

    /// Whether verbose logging is enabled
    pub verbose: bool,
}

impl Context {
    /// Create a debug context
    pub fn debug() -> Self {
        Self {
            mode: ExecutionMode::Debug,
            strict: true,
            verbose: true,
        }
    }

    /// Create a standard context
    pub fn standard() -> Self {
        Self {
            mode: ExecutionMode::Standard,
            strict: false,
            verbose: false,
        }
    }

    /// Create a bulk context
    pub fn bulk() -> Self {
        Self {
            mode: ExecutionMode::Bulk,
            strict: false,
            verbose: false,
        }
    }

    /// Create a context for the given mode
    pub fn new(mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::Debug => Self::debug(),
            ExecutionMode::Standard => Self::standard(),
            ExecutionMode::Bulk => Self::bulk(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_context() {
        let ctx = Context::debug();
        assert_eq!(ctx.mode, ExecutionMode::Debug);
        assert!(ctx.strict);
        assert!(ctx.verbose);
    }

    #[test]
    fn test_standard_context() {
        let ctx = Context::standard();
        assert_eq!(ctx.mode, ExecutionMode::Standard);
        assert!(!ctx.strict);
        assert!(!ctx.verbose);
    }

    #[test]
    fn test_bulk_context() {
        let ctx = Context::bulk();
        assert_eq!(ctx.mode, ExecutionMode::Bulk);
        assert!(!ctx.strict);
    }
}
