//! Shared test fixtures for integration tests.

use grid_sim::grid::{GridEngine, Load, Source};

/// The classic baseline grid: variable solar plus fixed hydro against
/// Factory-A (30 kW, pr 2), House-B (15 kW, pr 1), Shop-C (10 kW, pr 3).
pub fn baseline_engine(seed: u64) -> GridEngine {
    let mut engine = GridEngine::new(seed);
    engine
        .add_source(Source::variable("SolarFarm-A", 20.0, 50.0, true))
        .expect("register solar");
    engine
        .add_source(Source::fixed("HydroStation", 60.0, false))
        .expect("register hydro");
    register_baseline_loads(&mut engine);
    engine
}

/// Hydro-only grid: a single fixed 60 kW source against the baseline loads.
/// Total demand (55 kW) is covered, so no shedding occurs while the breaker
/// is intact.
pub fn hydro_only_engine(seed: u64) -> GridEngine {
    let mut engine = GridEngine::new(seed);
    engine
        .add_source(Source::fixed("HydroStation", 60.0, false))
        .expect("register hydro");
    register_baseline_loads(&mut engine);
    engine
}

fn register_baseline_loads(engine: &mut GridEngine) {
    engine
        .add_load(Load::new("Factory-A", 30.0, 2))
        .expect("register factory");
    engine
        .add_load(Load::new("House-B", 15.0, 1))
        .expect("register house");
    engine
        .add_load(Load::new("Shop-C", 10.0, 3))
        .expect("register shop");
}

/// Sum of demand over loads that are both connected and breaker-untripped.
pub fn connected_untripped_demand(engine: &GridEngine) -> f32 {
    use grid_sim::grid::ComponentKind;

    let breakers = engine.list_breakers();
    engine
        .loads()
        .iter()
        .filter(|l| {
            l.is_connected()
                && !breakers
                    .iter()
                    .any(|b| b.kind == ComponentKind::Load && b.name == l.name() && b.tripped)
        })
        .map(|l| l.demand_kw())
        .sum()
}
