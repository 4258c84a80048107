//! Error types for world construction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("requested {requested} species but the palette only has {available} colours")]
    PaletteExhausted { requested: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
