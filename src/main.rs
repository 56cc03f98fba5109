use nbsim::{PositionWriter, Scenario, ScenarioConfig, Simulator};
use nbsim::{bench_gravity, bench_step, bench_step_curve};
use nbsim::logging;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Direct-sum N-body simulator with inelastic merging")]
struct Args {
    /// Scenario file, as given or under the crate's `scenarios/` directory
    #[arg(short, default_value = "test_file.yaml")]
    file_name: String,

    /// Where positions are written
    #[arg(short, default_value = "output.txt")]
    output: PathBuf,

    /// More logging (-v debug, -vv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run the benchmark suite instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn resolve_scenario_path(file_name: &str) -> PathBuf {
    let given = PathBuf::from(file_name);
    if given.exists() {
        return given;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = resolve_scenario_path(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose))
        .context("failed to install logger")?;

    if args.bench {
        bench_gravity();
        bench_step();
        bench_step_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    let units = scenario.units;

    for (i, b) in scenario.system.bodies.iter().enumerate() {
        let p = units.position_from_si(&b.position);
        info!("body {i}: {}, {}, {} (m = {:e} kg)", p.x, p.y, p.z, b.mass);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = PositionWriter::new(BufWriter::new(file), units);

    let mut sim = Simulator::new(scenario);
    let summary = sim.simulate(&mut writer).context("simulation failed")?;
    writer.finish().context("failed to flush output")?;

    info!(
        "wrote {} reports for {} steps to {}",
        summary.reports,
        summary.steps,
        args.output.display()
    );

    Ok(())
}
