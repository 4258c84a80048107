pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod rng;
pub mod scenario;
pub mod species;
pub mod systems;
pub mod telemetry;
pub mod world;

pub use config::SimConfig;
pub use engine::{Engine, EngineBuilder, EngineSettings, TickSummary};
pub use error::SimError;
pub use world::{Creature, Frame, World};
