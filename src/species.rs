//! Species registry: immutable colour and speed shared by a group of creatures.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::rng::{shuffle, RandomSource};

/// Index into the 16-colour pixel palette used by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColorId(pub u8);

impl ColorId {
    pub const BLACK: ColorId = ColorId(0);
    pub const NAVY: ColorId = ColorId(1);
    pub const PURPLE: ColorId = ColorId(2);
    pub const GREEN: ColorId = ColorId(3);
    pub const BROWN: ColorId = ColorId(4);
    pub const DARK_BLUE: ColorId = ColorId(5);
    pub const LIGHT_BLUE: ColorId = ColorId(6);
    pub const WHITE: ColorId = ColorId(7);
    pub const RED: ColorId = ColorId(8);
    pub const ORANGE: ColorId = ColorId(9);
    pub const YELLOW: ColorId = ColorId(10);
    pub const LIME: ColorId = ColorId(11);
    pub const CYAN: ColorId = ColorId(12);
    pub const GRAY: ColorId = ColorId(13);
    pub const PINK: ColorId = ColorId(14);
    pub const PEACH: ColorId = ColorId(15);
}

/// Colours a species may take. Green is the board background and white marks food.
pub const SPECIES_PALETTE: [ColorId; 14] = [
    ColorId::BLACK,
    ColorId::NAVY,
    ColorId::PURPLE,
    ColorId::BROWN,
    ColorId::DARK_BLUE,
    ColorId::LIGHT_BLUE,
    ColorId::RED,
    ColorId::ORANGE,
    ColorId::YELLOW,
    ColorId::LIME,
    ColorId::CYAN,
    ColorId::GRAY,
    ColorId::PINK,
    ColorId::PEACH,
];

/// Number of discrete speed steps; speed is `step / SPEED_STEPS`.
pub const SPEED_STEPS: i32 = 5;

/// Identity of a species. Two species never share an id even when their traits match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(u32);

impl SpeciesId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    id: SpeciesId,
    color: ColorId,
    speed: f64,
}

impl Species {
    pub fn id(&self) -> SpeciesId {
        self.id
    }

    pub fn color(&self) -> ColorId {
        self.color
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRegistry {
    species: Vec<Species>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `count` species with distinct palette colours and random speeds.
    pub fn seeded(count: usize, rng: &mut dyn RandomSource) -> Result<Self> {
        if count > SPECIES_PALETTE.len() {
            return Err(SimError::PaletteExhausted {
                requested: count,
                available: SPECIES_PALETTE.len(),
            });
        }

        let mut pool = SPECIES_PALETTE.to_vec();
        shuffle(rng, &mut pool);

        let mut registry = Self::new();
        for _ in 0..count {
            let Some(color) = pool.pop() else {
                break;
            };
            let speed = f64::from(rng.rand_int(1, SPEED_STEPS)) / f64::from(SPEED_STEPS);
            registry.register(color, speed);
        }
        Ok(registry)
    }

    /// Adds a species and returns its fresh id.
    pub fn register(&mut self, color: ColorId, speed: f64) -> SpeciesId {
        let id = SpeciesId(self.species.len() as u32);
        self.species.push(Species { id, color, speed });
        id
    }

    pub fn get(&self, id: SpeciesId) -> Option<&Species> {
        self.species.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> + '_ {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
