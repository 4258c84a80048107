use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Rules, SimConfig, STARVATION_LIMIT};
use crate::error::Result;
use crate::food::{Cell, FoodField};
use crate::rng::RandomSource;
use crate::species::{ColorId, Species, SpeciesId, SpeciesRegistry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub species: SpeciesId,
    pub x: f64,
    pub y: f64,
    /// Heading in degrees, kept in `[0, 360)`.
    pub direction: f64,
    pub starvation: f64,
    pub age: u32,
}

impl Creature {
    pub fn new(species: SpeciesId, x: f64, y: f64, direction: f64) -> Self {
        Self {
            species,
            x,
            y,
            direction,
            starvation: 0.0,
            age: 0,
        }
    }

    /// Uniform whole-degree heading in `[0, 360)`.
    pub fn random_heading(rng: &mut dyn RandomSource) -> f64 {
        f64::from(rng.rand_int(0, 359))
    }

    pub fn cell(&self) -> Cell {
        Cell::containing(self.x, self.y)
    }

    pub fn can_reproduce(&self, rules: &Rules) -> bool {
        self.starvation + rules.reproduction_cost < STARVATION_LIMIT
            && self.age > rules.reproduction_min_age
    }

    #[allow(clippy::float_cmp)]
    pub fn death_cause(&self, rules: &Rules) -> Option<DeathCause> {
        if self.starvation == STARVATION_LIMIT {
            Some(DeathCause::Starvation)
        } else if self.age >= rules.max_age {
            Some(DeathCause::Age)
        } else {
            None
        }
    }
}

/// Inclusive upper limits of creature coordinates; the lower limit is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.max(0.0).min(self.max_x), y.max(0.0).min(self.max_y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Starvation,
    Age,
}

/// Counters filled in by the systems during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickLedger {
    pub births: usize,
    pub starved: usize,
    pub died_of_age: usize,
    pub food_eaten: usize,
    pub food_spawned: usize,
}

impl TickLedger {
    pub fn deaths(&self) -> usize {
        self.starved + self.died_of_age
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureView {
    pub x: f64,
    pub y: f64,
    pub color: ColorId,
}

/// Read-only view handed to the host after each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub width: i32,
    pub height: i32,
    pub population: usize,
    pub creatures: Vec<CreatureView>,
    pub food: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusEntry {
    pub species: SpeciesId,
    pub color: ColorId,
    pub speed: f64,
    pub alive: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    width: i32,
    height: i32,
    tick: u64,
    pub(crate) rules: Rules,
    pub(crate) skip_food_one_in: i32,
    pub(crate) species: SpeciesRegistry,
    pub(crate) creatures: Vec<Creature>,
    pub(crate) food: FoodField,
    pub(crate) ledger: TickLedger,
}

impl World {
    /// An empty board: no species, creatures or food.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            width: config.board.width,
            height: config.board.height,
            tick: 0,
            rules: config.rules.clone(),
            skip_food_one_in: config.food.skip_one_in,
            species: SpeciesRegistry::new(),
            creatures: Vec::new(),
            food: FoodField::new(
                config.board.width,
                config.board.height,
                config.food.max_spawn_attempts,
            ),
            ledger: TickLedger::default(),
        }
    }

    /// Validates `config`, then seeds species, their creatures and the initial food.
    pub fn seeded(config: &SimConfig, rng: &mut dyn RandomSource) -> Result<Self> {
        config.validate()?;
        let mut world = Self::new(config);
        world.species = SpeciesRegistry::seeded(config.species.count, rng)?;

        let ids: Vec<SpeciesId> = world.species.iter().map(Species::id).collect();
        for id in ids {
            for _ in 0..config.species.creatures_per_species {
                let x = f64::from(rng.rand_int(0, world.width - 1));
                let y = f64::from(rng.rand_int(0, world.height - 1));
                let direction = Creature::random_heading(rng);
                world.creatures.push(Creature::new(id, x, y, direction));
            }
        }

        for _ in 0..config.food.initial {
            world.food.spawn(rng);
        }
        Ok(world)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn species(&self) -> &SpeciesRegistry {
        &self.species
    }

    pub fn add_species(&mut self, color: ColorId, speed: f64) -> SpeciesId {
        self.species.register(color, speed)
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    pub fn spawn_creature(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    pub fn population(&self) -> usize {
        self.creatures.len()
    }

    pub fn food(&self) -> &FoodField {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut FoodField {
        &mut self.food
    }

    pub fn ledger(&self) -> &TickLedger {
        &self.ledger
    }

    pub(crate) fn reset_ledger(&mut self) {
        self.ledger = TickLedger::default();
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            max_x: f64::from(self.width - 1),
            max_y: f64::from(self.height - 1),
        }
    }

    /// Live creature counts per species, in registration order.
    pub fn census(&self) -> Vec<CensusEntry> {
        let mut counts: BTreeMap<SpeciesId, usize> = BTreeMap::new();
        for creature in &self.creatures {
            *counts.entry(creature.species).or_default() += 1;
        }
        self.species
            .iter()
            .map(|species| CensusEntry {
                species: species.id(),
                color: species.color(),
                speed: species.speed(),
                alive: counts.get(&species.id()).copied().unwrap_or(0),
            })
            .collect()
    }

    pub fn frame(&self) -> Frame {
        let creatures = self
            .creatures
            .iter()
            .map(|creature| CreatureView {
                x: creature.x,
                y: creature.y,
                color: self
                    .species
                    .get(creature.species)
                    .map(Species::color)
                    .unwrap_or(ColorId::BLACK),
            })
            .collect();
        Frame {
            tick: self.tick,
            width: self.width,
            height: self.height,
            population: self.creatures.len(),
            creatures,
            food: self.food.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    fn test_species() -> SpeciesId {
        SpeciesRegistry::new().register(ColorId::RED, 0.2)
    }

    #[test]
    fn seeded_world_matches_config() {
        let config = SimConfig::default();
        let mut rng = SimRng::new(7);
        let world = World::seeded(&config, &mut rng).unwrap();

        assert_eq!(world.species().len(), 5);
        assert_eq!(world.population(), 100);
        assert_eq!(world.food().len(), 200);
        for creature in world.creatures() {
            assert!(creature.x >= 0.0 && creature.x <= 119.0);
            assert!(creature.y >= 0.0 && creature.y <= 119.0);
            assert!((0.0..360.0).contains(&creature.direction));
            assert_eq!(creature.starvation, 0.0);
            assert_eq!(creature.age, 0);
        }
    }

    #[test]
    fn seeded_headings_exclude_a_full_turn() {
        struct Highest;
        impl RandomSource for Highest {
            fn rand_int(&mut self, _lo: i32, hi: i32) -> i32 {
                hi
            }
        }

        let mut config = SimConfig::default();
        config.food.initial = 0;
        let world = World::seeded(&config, &mut Highest).unwrap();

        assert_eq!(world.population(), 100);
        assert!(world.creatures().iter().all(|c| c.direction == 359.0));
    }

    #[test]
    fn seeding_fails_when_palette_runs_out() {
        let mut config = SimConfig::default();
        config.species.count = 15;
        let mut rng = SimRng::new(7);
        assert!(World::seeded(&config, &mut rng).is_err());
    }

    #[test]
    fn reproduction_requires_margin_and_age() {
        let rules = Rules::default();
        let mut creature = Creature::new(test_species(), 1.0, 1.0, 0.0);
        creature.age = 100;
        assert!(!creature.can_reproduce(&rules));
        creature.age = 101;
        assert!(creature.can_reproduce(&rules));
        creature.starvation = 0.7;
        assert!(!creature.can_reproduce(&rules));
    }

    #[test]
    fn death_cause_checks_exact_starvation_and_age() {
        let rules = Rules::default();
        let mut creature = Creature::new(test_species(), 1.0, 1.0, 0.0);
        creature.starvation = 0.999;
        assert_eq!(creature.death_cause(&rules), None);
        creature.starvation = 1.0;
        assert_eq!(creature.death_cause(&rules), Some(DeathCause::Starvation));
        creature.starvation = 0.5;
        creature.age = 1000;
        assert_eq!(creature.death_cause(&rules), Some(DeathCause::Age));
    }

    #[test]
    fn frame_and_census_reflect_population() {
        let mut world = World::new(&SimConfig::default());
        let red = world.add_species(ColorId::RED, 0.2);
        let cyan = world.add_species(ColorId::CYAN, 0.4);
        world.spawn_creature(Creature::new(red, 3.5, 4.5, 0.0));
        world.spawn_creature(Creature::new(red, 8.0, 9.0, 0.0));
        world.food_mut().insert(Cell::new(1, 1));

        let frame = world.frame();
        assert_eq!(frame.population, 2);
        assert_eq!(frame.food, vec![Cell::new(1, 1)]);
        assert!(frame.creatures.iter().all(|c| c.color == ColorId::RED));

        let census = world.census();
        assert_eq!(census.len(), 2);
        assert_eq!(census[0].species, red);
        assert_eq!(census[0].alive, 2);
        assert_eq!(census[1].species, cyan);
        assert_eq!(census[1].alive, 0);
    }
}
