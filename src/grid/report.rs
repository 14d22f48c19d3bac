//! Structured per-cycle results.

use std::fmt;

/// Complete record of one balancing cycle.
///
/// Returned as data so that non-interactive consumers (drivers, tests, CSV
/// export) can inspect the outcome instead of parsing printed text.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Cycle index, counted from zero over the engine's lifetime.
    pub cycle: usize,
    /// Total available supply this cycle (kW).
    pub total_power_kw: f32,
    /// Connected, breaker-untripped demand before any shedding or restoring (kW).
    pub demand_before_kw: f32,
    /// Demand after the shed/restore pass (kW). Equals the sum of demand over
    /// loads that are both connected and breaker-untripped at cycle end.
    pub total_demand_kw: f32,
    /// Names of loads shed (disconnected and breaker-tripped) this cycle, in shed order.
    pub shed: Vec<String>,
    /// Names of loads reconnected this cycle, in reconnect order.
    pub reconnected: Vec<String>,
    /// Names of components under manual fault at cycle end, in fault-set order.
    pub active_faults: Vec<String>,
}

impl CycleReport {
    /// Returns `true` when the cycle entered the deficit branch.
    pub fn deficit(&self) -> bool {
        self.total_power_kw < self.demand_before_kw
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycle={:>3} | power={:>7.2} kW  demand={:>7.2} kW (was {:>7.2})",
            self.cycle, self.total_power_kw, self.total_demand_kw, self.demand_before_kw,
        )?;
        if !self.shed.is_empty() {
            write!(f, " | shed: {}", self.shed.join(", "))?;
        }
        if !self.reconnected.is_empty() {
            write!(f, " | reconnected: {}", self.reconnected.join(", "))?;
        }
        if !self.active_faults.is_empty() {
            write!(f, " | faults: {}", self.active_faults.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report() -> CycleReport {
        CycleReport {
            cycle: 3,
            total_power_kw: 42.5,
            demand_before_kw: 55.0,
            total_demand_kw: 40.0,
            shed: vec!["Shop-C".into()],
            reconnected: vec![],
            active_faults: vec!["HydroStation".into()],
        }
    }

    #[test]
    fn deficit_compares_against_pre_shed_demand() {
        let r = make_report();
        assert!(r.deficit());
        let balanced = CycleReport {
            total_power_kw: 60.0,
            ..make_report()
        };
        assert!(!balanced.deficit());
    }

    #[test]
    fn display_lists_shed_loads_and_faults() {
        let s = format!("{}", make_report());
        assert!(s.contains("shed: Shop-C"));
        assert!(s.contains("faults: HydroStation"));
        assert!(!s.contains("reconnected"));
    }
}
