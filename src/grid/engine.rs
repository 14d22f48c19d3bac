//! The balancing engine: per-cycle supply/demand aggregation and the
//! priority-driven shed/restore decision procedure.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use rand::{SeedableRng, rngs::StdRng};

use super::breaker::{BreakerPanel, BreakerStatus, ComponentKind};
use super::error::GridError;
use super::fault::FaultTarget;
use super::load::Load;
use super::report::CycleReport;
use super::source::Source;

/// Balancing engine owning the grid's sources, loads, breakers, and faults.
///
/// Single-threaded and synchronous: every operation runs to completion, and
/// the cycle procedure is not re-entrant. Randomness for variable sources is
/// engine-owned and seeded, so runs are reproducible for a given seed.
///
/// Registration is decoupled from evaluation: adding a source or load never
/// runs a cycle by itself. The caller decides when to call [`run_cycle`].
///
/// [`run_cycle`]: GridEngine::run_cycle
#[derive(Debug)]
pub struct GridEngine {
    sources: Vec<Source>,
    loads: Vec<Load>,
    breakers: BreakerPanel,
    faults: BTreeSet<(ComponentKind, String)>,
    rng: StdRng,
    cycle: usize,
}

impl GridEngine {
    /// Creates an empty engine with a seeded random generator.
    pub fn new(seed: u64) -> Self {
        Self {
            sources: Vec::new(),
            loads: Vec::new(),
            breakers: BreakerPanel::new(),
            faults: BTreeSet::new(),
            rng: StdRng::seed_from_u64(seed),
            cycle: 0,
        }
    }

    /// Registers a source and installs its breaker.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateRegistration`] if a source with the same
    /// name is already registered.
    pub fn add_source(&mut self, source: Source) -> Result<(), GridError> {
        if !self.breakers.install(ComponentKind::Source, source.name()) {
            return Err(GridError::DuplicateRegistration {
                kind: ComponentKind::Source,
                name: source.name().to_string(),
            });
        }
        self.sources.push(source);
        Ok(())
    }

    /// Registers a load and installs its breaker.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateRegistration`] if a load with the same
    /// name is already registered.
    pub fn add_load(&mut self, load: Load) -> Result<(), GridError> {
        if !self.breakers.install(ComponentKind::Load, load.name()) {
            return Err(GridError::DuplicateRegistration {
                kind: ComponentKind::Load,
                name: load.name().to_string(),
            });
        }
        self.loads.push(load);
        Ok(())
    }

    /// Executes one balancing cycle and returns the structured report.
    ///
    /// Procedure:
    /// 1. Sources in insertion order: breaker-tripped and disconnected
    ///    sources are skipped entirely (never resampled, no randomness
    ///    consumed); the rest are resampled and contribute to total power.
    /// 2. Loads in insertion order: breaker-tripped loads are skipped; the
    ///    connected rest contribute to total demand.
    /// 3. On deficit, shed connected loads greedily in descending priority
    ///    value (ties: registration order), tripping each breaker, until
    ///    supply covers remaining demand.
    /// 4. Otherwise, restore disconnected untripped loads in ascending
    ///    priority value, each admitted only if it fits the remaining
    ///    surplus at that point. Breaker-tripped loads are never restored
    ///    here; they require explicit fault resolution first.
    /// 5. Active faults are reported unchanged.
    pub fn run_cycle(&mut self) -> CycleReport {
        let mut total_power = 0.0_f32;
        let mut total_demand = 0.0_f32;

        for source in &mut self.sources {
            if self.breakers.is_tripped(ComponentKind::Source, source.name()) {
                continue;
            }
            if source.is_connected() {
                total_power += source.resample(&mut self.rng);
            }
        }

        for load in &self.loads {
            if self.breakers.is_tripped(ComponentKind::Load, load.name()) {
                continue;
            }
            if load.is_connected() {
                total_demand += load.demand_kw();
            }
        }

        let demand_before = total_demand;
        let mut shed = Vec::new();
        let mut reconnected = Vec::new();

        if total_power < total_demand {
            // Deficit: shed highest priority values first; stable sort keeps
            // registration order among equals.
            let mut candidates: Vec<usize> = (0..self.loads.len())
                .filter(|&i| self.loads[i].is_connected())
                .collect();
            candidates.sort_by_key(|&i| Reverse(self.loads[i].priority()));

            for i in candidates {
                let load = &mut self.loads[i];
                load.disconnect();
                self.breakers.trip(ComponentKind::Load, load.name());
                total_demand -= load.demand_kw();
                shed.push(load.name().to_string());
                if total_power >= total_demand {
                    break;
                }
            }
        } else {
            // Surplus: restore most important loads first. Only untripped
            // loads are eligible, so automatically shed loads stay off until
            // their fault-style breaker reset.
            let mut candidates: Vec<usize> = (0..self.loads.len())
                .filter(|&i| {
                    !self.loads[i].is_connected()
                        && !self
                            .breakers
                            .is_tripped(ComponentKind::Load, self.loads[i].name())
                })
                .collect();
            candidates.sort_by_key(|&i| self.loads[i].priority());

            for i in candidates {
                let load = &mut self.loads[i];
                if total_power >= total_demand + load.demand_kw() {
                    load.reconnect();
                    total_demand += load.demand_kw();
                    reconnected.push(load.name().to_string());
                }
            }
        }

        let report = CycleReport {
            cycle: self.cycle,
            total_power_kw: total_power,
            demand_before_kw: demand_before,
            total_demand_kw: total_demand,
            shed,
            reconnected,
            active_faults: self.active_faults(),
        };
        self.cycle += 1;
        report
    }

    /// Injects a manual fault at the targeted component.
    ///
    /// Records the component in the fault set and trips its breaker. A
    /// faulted load is also disconnected, so no load is ever both connected
    /// and breaker-tripped. Returns the faulted component's name.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidIndex`] if the target index is out of
    /// range; the engine state is unchanged.
    pub fn inject_fault(&mut self, target: FaultTarget) -> Result<String, GridError> {
        let (kind, name) = match target {
            FaultTarget::Load(i) => {
                let len = self.loads.len();
                let load = self.loads.get_mut(i).ok_or(GridError::InvalidIndex {
                    collection: "loads",
                    index: i,
                    len,
                })?;
                load.disconnect();
                (ComponentKind::Load, load.name().to_string())
            }
            FaultTarget::Source(i) => {
                let source = self.sources.get(i).ok_or(GridError::InvalidIndex {
                    collection: "sources",
                    index: i,
                    len: self.sources.len(),
                })?;
                (ComponentKind::Source, source.name().to_string())
            }
        };
        self.breakers.trip(kind, &name);
        self.faults.insert((kind, name.clone()));
        Ok(name)
    }

    /// Resolves the `index`-th active fault (fault-set iteration order).
    ///
    /// Removes the fault entry, resets the component's breaker, and
    /// immediately re-runs the cycle procedure. Resetting the breaker does
    /// not reconnect a load; only the subsequent surplus branch may, subject
    /// to capacity. Returns the resolved name and the cycle report.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidIndex`] if `index` is out of range; the
    /// engine state is unchanged.
    pub fn resolve_fault(&mut self, index: usize) -> Result<(String, CycleReport), GridError> {
        let key = self
            .faults
            .iter()
            .nth(index)
            .cloned()
            .ok_or(GridError::InvalidIndex {
                collection: "faults",
                index,
                len: self.faults.len(),
            })?;
        self.faults.remove(&key);
        let (kind, name) = key;
        self.breakers.reset(kind, &name);
        let report = self.run_cycle();
        Ok((name, report))
    }

    /// Directly sets a load's connectivity flag.
    ///
    /// Operator command: unconditional flip that touches neither the breaker
    /// nor the fault set. A load disconnected this way stays eligible for
    /// automatic restoring (its breaker is intact).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidIndex`] if `index` is out of range.
    pub fn set_load_connectivity(&mut self, index: usize, connected: bool) -> Result<(), GridError> {
        let len = self.loads.len();
        let load = self.loads.get_mut(index).ok_or(GridError::InvalidIndex {
            collection: "loads",
            index,
            len,
        })?;
        if connected {
            load.reconnect();
        } else {
            load.disconnect();
        }
        Ok(())
    }

    /// Returns every breaker's state in deterministic order.
    pub fn list_breakers(&self) -> Vec<BreakerStatus> {
        self.breakers.statuses()
    }

    /// Returns the registered loads in registration order.
    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Returns the registered sources in registration order.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Returns the names of components under manual fault, in fault-set order.
    pub fn active_faults(&self) -> Vec<String> {
        self.faults.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Number of cycles run so far.
    pub fn cycles_run(&self) -> usize {
        self.cycle
    }
}
