use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::RandomSource,
    world::World,
};

/// Grows one food item per tick unless the `1 in skip_one_in` draw comes up.
pub struct FoodGrowthSystem;

impl FoodGrowthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FoodGrowthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FoodGrowthSystem {
    fn name(&self) -> &str {
        "food_growth"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        if rng.rand_int(0, world.skip_food_one_in - 1) > 0 && world.food.spawn(rng).is_some() {
            world.ledger.food_spawned += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    /// Replays a fixed script of draws.
    struct Script(Vec<i32>);

    impl RandomSource for Script {
        fn rand_int(&mut self, lo: i32, hi: i32) -> i32 {
            let value = self.0.remove(0);
            assert!((lo..=hi).contains(&value), "{value} outside {lo}..={hi}");
            value
        }
    }

    fn ctx() -> SystemContext<'static> {
        SystemContext {
            tick: 1,
            scenario_name: "test",
        }
    }

    #[test]
    fn zero_draw_skips_growth() {
        let mut world = World::new(&SimConfig::default());
        let mut script = Script(vec![0]);
        FoodGrowthSystem::new()
            .run(&ctx(), &mut world, &mut script)
            .unwrap();
        assert!(world.food().is_empty());
        assert!(script.0.is_empty());
    }

    #[test]
    fn other_draws_spawn_on_a_free_cell() {
        let mut world = World::new(&SimConfig::default());
        world.food_mut().insert(crate::food::Cell::new(4, 4));
        // Growth roll, one collision, then a free cell.
        let mut script = Script(vec![99, 4, 4, 10, 20]);
        FoodGrowthSystem::new()
            .run(&ctx(), &mut world, &mut script)
            .unwrap();

        assert_eq!(world.food().len(), 2);
        assert!(world.food().contains(crate::food::Cell::new(10, 20)));
        assert_eq!(world.ledger().food_spawned, 1);
    }
}
