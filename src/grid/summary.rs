//! Post-hoc run summary computed from cycle reports.

use std::fmt;

use super::report::CycleReport;

/// Aggregate indicators for a complete run.
///
/// Computed post-hoc from `&[CycleReport]` so the summary always agrees with
/// the per-cycle data it was derived from.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of cycles covered.
    pub cycles: usize,
    /// Number of cycles that entered the deficit branch.
    pub deficit_cycles: usize,
    /// Total loads shed across the run.
    pub shed_events: usize,
    /// Total loads reconnected across the run.
    pub reconnect_events: usize,
    /// Highest supply seen in any cycle (kW).
    pub peak_power_kw: f32,
    /// Highest pre-shed demand seen in any cycle (kW).
    pub peak_demand_kw: f32,
    /// Active faults at the end of the last cycle.
    pub final_fault_count: usize,
}

impl RunSummary {
    /// Computes the summary from a run's complete cycle reports.
    pub fn from_reports(reports: &[CycleReport]) -> Self {
        let mut summary = Self {
            cycles: reports.len(),
            deficit_cycles: 0,
            shed_events: 0,
            reconnect_events: 0,
            peak_power_kw: 0.0,
            peak_demand_kw: 0.0,
            final_fault_count: 0,
        };

        for r in reports {
            if r.deficit() {
                summary.deficit_cycles += 1;
            }
            summary.shed_events += r.shed.len();
            summary.reconnect_events += r.reconnected.len();
            summary.peak_power_kw = summary.peak_power_kw.max(r.total_power_kw);
            summary.peak_demand_kw = summary.peak_demand_kw.max(r.demand_before_kw);
        }
        if let Some(last) = reports.last() {
            summary.final_fault_count = last.active_faults.len();
        }
        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Cycles:            {}", self.cycles)?;
        writeln!(f, "Deficit cycles:    {}", self.deficit_cycles)?;
        writeln!(f, "Loads shed:        {}", self.shed_events)?;
        writeln!(f, "Loads reconnected: {}", self.reconnect_events)?;
        writeln!(f, "Peak supply:       {:.2} kW", self.peak_power_kw)?;
        writeln!(f, "Peak demand:       {:.2} kW", self.peak_demand_kw)?;
        write!(f, "Open faults:       {}", self.final_fault_count)
    }
}
