use anyhow::Result;
use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    rng::RandomSource,
    world::{DeathCause, World},
};

/// Removes creatures that starved or reached the maximum age. Runs after every
/// creature has been updated so deaths never influence the update pass.
pub struct MortalitySystem;

impl MortalitySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MortalitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MortalitySystem {
    fn name(&self) -> &str {
        "mortality"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut dyn RandomSource,
    ) -> Result<()> {
        let mut dead = Vec::new();
        for (index, creature) in world.creatures.iter().enumerate() {
            let Some(cause) = creature.death_cause(&world.rules) else {
                continue;
            };
            match cause {
                DeathCause::Starvation => world.ledger.starved += 1,
                DeathCause::Age => world.ledger.died_of_age += 1,
            }
            debug!(
                tick = ctx.tick,
                species = creature.species.raw(),
                starvation = creature.starvation,
                age = creature.age,
                ?cause,
                "creature died"
            );
            dead.push(index);
        }

        for index in dead.into_iter().rev() {
            world.creatures.remove(index);
        }
        Ok(())
    }
}
