//! Input/output helpers for simulation results.

/// CSV export of per-cycle telemetry.
pub mod export;
