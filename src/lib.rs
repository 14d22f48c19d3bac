//! Smart-grid load balancing simulator.
//!
//! Models a small distribution network of power sources, consuming loads, and
//! protective breakers, and runs discrete cycles that balance supply against
//! demand by shedding or restoring loads in priority order.

pub mod config;
/// Balancing engine, grid components, breakers, and fault handling.
pub mod grid;
pub mod io;
