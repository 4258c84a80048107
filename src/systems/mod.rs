mod food_growth;
mod lifecycle;
mod mating;
mod mortality;

pub use food_growth::FoodGrowthSystem;
pub use lifecycle::{update_creature, LifecycleSystem};
pub use mating::MatingSystem;
pub use mortality::MortalitySystem;
