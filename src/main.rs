use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lifegrid::{
    engine::{EngineBuilder, EngineSettings},
    scenario::{Scenario, ScenarioLoader},
    telemetry,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless creature/food grid simulation")]
struct Cli {
    /// Path to a scenario YAML file (built-in defaults when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset (defaults to the scenario's level)
    #[arg(long)]
    log_level: Option<String>,

    /// Log a census every N ticks (0 disables)
    #[arg(long)]
    report_every: Option<u64>,

    /// Print the final frame as JSON on stdout
    #[arg(long)]
    dump_frame: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::default(),
    };
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| scenario.config.logging.level.clone());
    telemetry::init_tracing(&level)?;

    let ticks = scenario.ticks(cli.ticks);
    let report_every = cli
        .report_every
        .unwrap_or(scenario.config.logging.report_every_ticks);

    let mut engine = EngineBuilder::new(EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
    })
    .with_default_systems()
    .build();
    let mut world = engine.spawn_world(&scenario.config)?;

    info!(scenario = %scenario.name, seed = scenario.seed, ticks, "starting run");
    let mut last_frame = world.frame();
    engine.run_with_hook(&mut world, ticks, |summary, frame| {
        if report_every > 0 && summary.tick % report_every == 0 {
            info!(
                tick = summary.tick,
                population = summary.population,
                food = summary.food,
                births = summary.ledger.births,
                deaths = summary.ledger.deaths(),
                elapsed_ms = summary.elapsed_ms(),
                "census"
            );
        }
        last_frame = frame;
    })?;

    for entry in world.census() {
        info!(
            species = entry.species.raw(),
            color = entry.color.0,
            speed = entry.speed,
            alive = entry.alive,
            "species census"
        );
    }
    info!(
        scenario = %scenario.name,
        ticks,
        population = world.population(),
        food = world.food().len(),
        "run complete"
    );

    if cli.dump_frame {
        let json = serde_json::to_string_pretty(&last_frame).context("Failed to encode frame")?;
        println!("{json}");
    }
    Ok(())
}
