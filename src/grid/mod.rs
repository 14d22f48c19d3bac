//! Grid components and the per-cycle balancing engine.

/// Protective breaker and the typed breaker panel.
pub mod breaker;
pub mod engine;
/// Grid operation errors.
pub mod error;
/// Fault target selectors for manual fault injection.
pub mod fault;
pub mod load;
pub mod report;
/// Power source models (fixed and variable output).
pub mod source;
pub mod summary;

// Re-export the main types for convenience
pub use breaker::{Breaker, BreakerPanel, BreakerStatus, ComponentKind};
pub use engine::GridEngine;
pub use error::GridError;
pub use fault::FaultTarget;
pub use load::Load;
pub use report::CycleReport;
pub use source::{Source, SourceModel};
pub use summary::RunSummary;
