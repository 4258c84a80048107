use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::SimConfig,
    rng::{RandomSource, SimRng},
    systems::{FoodGrowthSystem, LifecycleSystem, MatingSystem, MortalitySystem},
    world::{Frame, TickLedger, World},
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
    rng: Option<Box<dyn RandomSource>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
            rng: None,
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Registers the four tick phases in their required order.
    pub fn with_default_systems(self) -> Self {
        self.with_system(LifecycleSystem::new())
            .with_system(MortalitySystem::new())
            .with_system(MatingSystem::new())
            .with_system(FoodGrowthSystem::new())
    }

    /// Replaces the seeded ChaCha stream, e.g. with a scripted source.
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn build(self) -> Engine {
        let seed = self.settings.seed;
        Engine {
            rng: self
                .rng
                .unwrap_or_else(|| Box::new(SimRng::new(seed))),
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: Box<dyn RandomSource>,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
}

impl Engine {
    /// Seeds a fresh world from the engine's own random stream.
    pub fn spawn_world(&mut self, config: &SimConfig) -> Result<World> {
        let world = World::seeded(config, self.rng.as_mut())
            .with_context(|| format!("Failed to seed world for '{}'", self.settings.scenario_name))?;
        info!(
            scenario = %self.settings.scenario_name,
            species = world.species().len(),
            creatures = world.population(),
            food = world.food().len(),
            "world seeded"
        );
        Ok(world)
    }

    /// Runs every system once, in registration order.
    pub fn tick(&mut self, world: &mut World) -> Result<TickSummary> {
        world.reset_ledger();
        let ctx = SystemContext {
            tick: world.tick() + 1,
            scenario_name: &self.settings.scenario_name,
        };

        let mut system_reports = Vec::with_capacity(self.systems.len());
        for system in &mut self.systems {
            let start = Instant::now();
            system
                .run(&ctx, world, self.rng.as_mut())
                .with_context(|| format!("system '{}' failed on tick {}", system.name(), ctx.tick))?;
            system_reports.push(SystemRunReport {
                name: system.name().to_string(),
                duration_ms: start.elapsed().as_secs_f64() * 1_000.0,
            });
        }
        world.advance_time();

        let summary = TickSummary {
            tick: world.tick(),
            system_reports,
            ledger: world.ledger().clone(),
            population: world.population(),
            food: world.food().len(),
        };
        debug!(
            tick = summary.tick,
            population = summary.population,
            food = summary.food,
            elapsed_ms = summary.elapsed_ms(),
            "tick complete"
        );
        Ok(summary)
    }

    pub fn run(&mut self, world: &mut World, ticks: u64) -> Result<()> {
        self.run_with_hook(world, ticks, |_, _| {})
    }

    /// Runs `ticks` ticks, handing the hook a frame after each one completes.
    pub fn run_with_hook<F>(&mut self, world: &mut World, ticks: u64, mut hook: F) -> Result<()>
    where
        F: FnMut(&TickSummary, Frame),
    {
        for _ in 0..ticks {
            let summary = self.tick(world)?;
            hook(&summary, world.frame());
        }
        Ok(())
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub scenario_name: &'a str,
}

/// One phase of a tick.
pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> Result<()>;
}

#[derive(Clone, Debug, Serialize)]
pub struct SystemRunReport {
    pub name: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct TickSummary {
    pub tick: u64,
    pub system_reports: Vec<SystemRunReport>,
    pub ledger: TickLedger,
    pub population: usize,
    pub food: usize,
}

impl TickSummary {
    pub fn elapsed_ms(&self) -> f64 {
        self.system_reports.iter().map(|r| r.duration_ms).sum()
    }
}
