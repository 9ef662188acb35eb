use thiserror::Error;

use crate::core::types::{Coord, OrganismId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("node {0} has no vegetation; initialize the map with set_plants first")]
    UninitializedVegetation(Coord),

    #[error("organism not found: {0:?}")]
    OrganismNotFound(OrganismId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
