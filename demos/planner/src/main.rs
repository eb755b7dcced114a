//! planner: reads a delivery scenario and prints every vehicle's schedule.
//!
//! ```text
//! planner [INPUT] [--config planner.json] [--csv schedule.csv]
//! ```
//!
//! `INPUT` defaults to stdin.  The text schedule goes to stdout; logs and the
//! run summary go to stderr (`RUST_LOG=debug` shows solver and assignment
//! progress).

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use fleet_core::{PackageId, PlannerConfig, Tick, VehicleId};
use fleet_dispatch::AssignmentFailure;
use fleet_io::{CsvWriter, OutputObserver, TextWriter, load_scenario, parse_scenario};
use fleet_itinerary::{ItineraryError, ItineraryObserver, PlanSummary, Planner, ScheduleEvent};

const USAGE: &str = "usage: planner [INPUT] [--config <json>] [--csv <path>]";

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Args {
    input:  Option<PathBuf>,
    config: Option<PathBuf>,
    csv:    Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args_os().skip(1);
    while let Some(arg) = it.next() {
        match arg.to_str() {
            Some("--config") => {
                args.config = Some(it.next().context("--config needs a path")?.into());
            }
            Some("--csv") => {
                args.csv = Some(it.next().context("--csv needs a path")?.into());
            }
            Some("-h" | "--help") => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            Some(flag) if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ if args.input.is_none() => args.input = Some(arg.into()),
            _ => bail!("unexpected argument {arg:?}\n{USAGE}"),
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<PlannerConfig> {
    let Some(path) = &args.config else {
        return Ok(PlannerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Forwards every callback to both observers, `A` first.
struct Both<A, B>(A, B);

impl<A: ItineraryObserver, B: ItineraryObserver> ItineraryObserver for Both<A, B> {
    fn on_unassigned(&mut self, failure: &AssignmentFailure) {
        self.0.on_unassigned(failure);
        self.1.on_unassigned(failure);
    }
    fn on_vehicle_start(&mut self, vehicle: VehicleId) {
        self.0.on_vehicle_start(vehicle);
        self.1.on_vehicle_start(vehicle);
    }
    fn on_event(&mut self, event: &ScheduleEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
    fn on_failure(&mut self, vehicle: VehicleId, package: PackageId, error: &ItineraryError) {
        self.0.on_failure(vehicle, package, error);
        self.1.on_failure(vehicle, package, error);
    }
    fn on_vehicle_end(&mut self, vehicle: VehicleId, finish: Tick) {
        self.0.on_vehicle_end(vehicle, finish);
        self.1.on_vehicle_end(vehicle, finish);
    }
    fn on_plan_end(&mut self, summary: &PlanSummary) {
        self.0.on_plan_end(summary);
        self.1.on_plan_end(summary);
    }
}

/// Names every trip that could not be driven.
struct TripFailures<'p, W: Write> {
    planner: &'p Planner,
    out:     W,
}

impl<W: Write> ItineraryObserver for TripFailures<'_, W> {
    fn on_failure(&mut self, vehicle: VehicleId, package: PackageId, error: &ItineraryError) {
        let p = self.planner.packages().get(package.index()).map_or("?", |p| p.name.as_str());
        let v = self.planner.vehicles().get(vehicle.index()).map_or("?", |v| v.name.as_str());
        // Diagnostics only; a broken stderr must not abort the run.
        let _ = writeln!(self.out, "failed trip: package {p} on vehicle {v}: {error}");
    }
}

/// Runs the plan, writing the text schedule to `out` and optionally a CSV
/// copy to `csv`.  A failed schedule write is returned as an error once the
/// run completes.
fn run_plan(
    planner: &Planner,
    out: impl Write,
    csv: Option<&Path>,
    diagnostics: impl Write,
) -> Result<PlanSummary> {
    let text     = OutputObserver::new(TextWriter::new(out), planner);
    let failures = TripFailures { planner, out: diagnostics };

    let (summary, output_error) = match csv {
        None => {
            let mut obs = Both(text, failures);
            let summary = planner.run(&mut obs)?;
            (summary, obs.0.take_error())
        }
        Some(path) => {
            let csv = CsvWriter::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut obs = Both(Both(text, OutputObserver::new(csv, planner)), failures);
            let summary = planner.run(&mut obs)?;
            let text_error = obs.0.0.take_error();
            (summary, text_error.or_else(|| obs.0.1.take_error()))
        }
    };

    match output_error {
        Some(e) => Err(e).context("writing schedule"),
        None => Ok(summary),
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args   = parse_args()?;
    let config = load_config(&args)?;

    let scenario = match &args.input {
        Some(path) => load_scenario(path)
            .with_context(|| format!("reading scenario {}", path.display()))?,
        None => parse_scenario(io::stdin().lock()).context("reading scenario from stdin")?,
    };
    let planner = scenario
        .resolve()
        .context("resolving scenario")?
        .planner()
        .config(config)
        .build()?;

    for failure in planner.assignment().failures() {
        let name = &planner.packages()[failure.package.index()].name;
        eprintln!("unassigned package {name}: {}", failure.error);
    }

    let stdout  = BufWriter::new(io::stdout().lock());
    let summary = run_plan(&planner, stdout, args.csv.as_deref(), io::stderr())?;

    eprintln!(
        "{} events  |  {} delivered  |  {} unassigned  |  {} failed  |  makespan {}",
        summary.events, summary.delivered, summary.unassigned, summary.failed, summary.makespan,
    );
    tracing::info!(?summary, "run complete");
    Ok(())
}
