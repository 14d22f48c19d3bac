//! Grid simulator entry point: CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use grid_sim::config::ScenarioConfig;
use grid_sim::grid::{GridEngine, RunSummary};
use grid_sim::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    cycles_override: Option<usize>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("grid-sim — smart-grid load balancing simulator");
    eprintln!();
    eprintln!("Usage: grid-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, deficit_stress)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --cycles <n>             Override number of cycles to run");
    eprintln!("  --telemetry-out <path>   Export cycle reports to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        cycles_override: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--cycles" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --cycles requires a count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.cycles_override = Some(n);
                } else {
                    eprintln!("error: --cycles value \"{}\" is not a valid count", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds an engine with every configured source and load registered.
fn build_engine(cfg: &ScenarioConfig) -> Result<GridEngine, grid_sim::grid::GridError> {
    let mut engine = GridEngine::new(cfg.simulation.seed);
    for s in &cfg.sources {
        engine.add_source(s.build())?;
    }
    for l in &cfg.loads {
        engine.add_load(l.build())?;
    }
    Ok(engine)
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(cycles) = cli.cycles_override {
        scenario.simulation.cycles = cycles;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    let mut engine = match build_engine(&scenario) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let mut reports = Vec::with_capacity(scenario.simulation.cycles);
    for _ in 0..scenario.simulation.cycles {
        let report = engine.run_cycle();
        println!("{report}");
        reports.push(report);
    }

    // Final breaker states
    println!("\n[Breaker Status]");
    for b in engine.list_breakers() {
        println!(
            "{} {}: {}",
            b.kind,
            b.name,
            if b.tripped { "TRIPPED" } else { "OK" }
        );
    }

    // Run summary
    let summary = RunSummary::from_reports(&reports);
    println!("\n{summary}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&reports, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
