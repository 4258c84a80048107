use anyhow::{anyhow, Result};

use crate::{
    config::Rules,
    engine::{System, SystemContext},
    food::FoodField,
    rng::RandomSource,
    world::{Bounds, Creature, World},
};

/// Moves, feeds and ages every live creature.
pub struct LifecycleSystem;

impl LifecycleSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LifecycleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for LifecycleSystem {
    fn name(&self) -> &str {
        "lifecycle"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        let bounds = world.bounds();
        for creature in world.creatures.iter_mut() {
            let speed = world
                .species
                .get(creature.species)
                .map(|species| species.speed())
                .ok_or_else(|| {
                    anyhow!("creature references unknown species {}", creature.species.raw())
                })?;
            if update_creature(creature, speed, bounds, &world.rules, &mut world.food, rng) {
                world.ledger.food_eaten += 1;
            }
        }
        Ok(())
    }
}

/// Applies one tick of turning, movement, metabolism, foraging and aging.
///
/// The heading is stored in degrees but handed to `cos`/`sin` unconverted, so
/// the effective motion is that of a radian angle. Returns true when the
/// creature ate.
pub fn update_creature(
    creature: &mut Creature,
    speed: f64,
    bounds: Bounds,
    rules: &Rules,
    food: &mut FoodField,
    rng: &mut dyn RandomSource,
) -> bool {
    creature.direction += f64::from(rng.rand_int(-1, 1));
    creature.direction = (creature.direction + 360.0) % 360.0;

    let x = creature.x + creature.direction.cos() * speed;
    let y = creature.y + creature.direction.sin() * speed;
    (creature.x, creature.y) = bounds.clamp(x, y);

    creature.starvation += speed / rules.metabolism_divisor;

    let mut ate = false;
    if creature.starvation > rules.foraging_threshold && food.remove(creature.cell()) {
        creature.starvation = 0.0;
        ate = true;
    }

    creature.age += 1;
    ate
}
