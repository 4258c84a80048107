use anyhow::Result;
use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    rng::RandomSource,
    world::{Creature, World},
};

/// Pairs co-located creatures of the same species.
///
/// Every unordered pair is visited once in index order. A parent stays in the
/// scan after breeding, so it may breed again in the same tick while it can
/// still afford the cost. Newborns join the population after the scan.
pub struct MatingSystem;

impl MatingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MatingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MatingSystem {
    fn name(&self) -> &str {
        "mating"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        let rules = &world.rules;
        let creatures = &mut world.creatures;
        let mut newborns = Vec::new();

        for i in 0..creatures.len() {
            let (head, tail) = creatures.split_at_mut(i + 1);
            let first = &mut head[i];
            for second in tail.iter_mut() {
                if first.species != second.species
                    || first.cell() != second.cell()
                    || !first.can_reproduce(rules)
                    || !second.can_reproduce(rules)
                {
                    continue;
                }
                let direction = Creature::random_heading(rng);
                let mut child = Creature::new(first.species, first.x, first.y, direction);
                child.starvation = rules.newborn_starvation();
                newborns.push(child);
                first.starvation += rules.reproduction_cost;
                second.starvation += rules.reproduction_cost;
            }
        }

        if !newborns.is_empty() {
            debug!(tick = ctx.tick, births = newborns.len(), "new creatures");
        }
        world.ledger.births += newborns.len();
        world.creatures.extend(newborns);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimConfig, rng::SimRng, species::ColorId};

    fn adult(world: &mut World, species: crate::species::SpeciesId, x: f64, y: f64) {
        let mut creature = Creature::new(species, x, y, 0.0);
        creature.starvation = 0.2;
        creature.age = 150;
        world.spawn_creature(creature);
    }

    fn run(world: &mut World) {
        let ctx = SystemContext {
            tick: 1,
            scenario_name: "test",
        };
        MatingSystem::new()
            .run(&ctx, world, &mut SimRng::new(1))
            .unwrap();
    }

    #[test]
    fn eligible_pair_produces_one_newborn() {
        let mut world = World::new(&SimConfig::default());
        let species = world.add_species(ColorId::YELLOW, 0.6);
        adult(&mut world, species, 5.0, 5.0);
        adult(&mut world, species, 5.0, 5.0);

        run(&mut world);

        assert_eq!(world.population(), 3);
        let child = &world.creatures()[2];
        assert_eq!((child.x, child.y), (5.0, 5.0));
        assert!((child.starvation - 0.6).abs() < 1e-12);
        assert_eq!(child.age, 0);
        assert!((0.0..360.0).contains(&child.direction));
        for parent in &world.creatures()[..2] {
            assert!((parent.starvation - 0.5).abs() < 1e-12);
        }
        assert_eq!(world.ledger().births, 1);
    }

    #[test]
    fn identical_traits_are_not_the_same_species() {
        let mut world = World::new(&SimConfig::default());
        let a = world.add_species(ColorId::YELLOW, 0.6);
        let b = world.add_species(ColorId::YELLOW, 0.6);
        adult(&mut world, a, 5.0, 5.0);
        adult(&mut world, b, 5.0, 5.0);

        run(&mut world);
        assert_eq!(world.population(), 2);
    }

    #[test]
    fn pairs_must_share_a_floored_cell() {
        let mut world = World::new(&SimConfig::default());
        let species = world.add_species(ColorId::YELLOW, 0.6);
        adult(&mut world, species, 5.2, 5.9);
        adult(&mut world, species, 5.8, 5.1);
        adult(&mut world, species, 6.0, 5.0);

        run(&mut world);
        assert_eq!(world.population(), 4);
        assert_eq!((world.creatures()[3].x, world.creatures()[3].y), (5.2, 5.9));
    }

    #[test]
    fn young_creatures_do_not_breed() {
        let mut world = World::new(&SimConfig::default());
        let species = world.add_species(ColorId::YELLOW, 0.6);
        adult(&mut world, species, 5.0, 5.0);
        adult(&mut world, species, 5.0, 5.0);
        world.creatures_mut()[1].age = 100;

        run(&mut world);
        assert_eq!(world.population(), 2);
    }

    /// Answers every draw with the top of the requested range.
    struct Highest;

    impl RandomSource for Highest {
        fn rand_int(&mut self, _lo: i32, hi: i32) -> i32 {
            hi
        }
    }

    #[test]
    fn newborn_heading_stays_below_a_full_turn() {
        let mut world = World::new(&SimConfig::default());
        let species = world.add_species(ColorId::YELLOW, 0.6);
        adult(&mut world, species, 5.0, 5.0);
        adult(&mut world, species, 5.0, 5.0);

        let ctx = SystemContext {
            tick: 1,
            scenario_name: "test",
        };
        MatingSystem::new().run(&ctx, &mut world, &mut Highest).unwrap();

        assert_eq!(world.population(), 3);
        assert_eq!(world.creatures()[2].direction, 359.0);
    }

    #[test]
    fn a_parent_can_breed_with_several_partners() {
        let mut world = World::new(&SimConfig::default());
        let species = world.add_species(ColorId::YELLOW, 0.6);
        for _ in 0..3 {
            let mut creature = Creature::new(species, 5.0, 5.0, 0.0);
            creature.age = 150;
            world.spawn_creature(creature);
        }

        run(&mut world);

        // Each parent pays for its first litter and can still afford a second.
        assert_eq!(world.population(), 6);
        for parent in &world.creatures()[..3] {
            assert!((parent.starvation - 0.6).abs() < 1e-12);
        }
        assert!(world.creatures()[3..].iter().all(|child| child.age == 0));
    }
}
