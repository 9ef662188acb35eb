//! A single cell on the map grid

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, OrganismId};
use crate::grid::vegetation::Vegetation;

/// A single addressable location on the map
///
/// Nodes are created once when the grid is built and never move or get
/// destroyed; only their vegetation and occupant list mutate. Occupants are
/// kept in arrival order, though only membership is meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub coord: Coord,
    pub move_cost: f32,
    vegetation: Option<Vegetation>,
    pub occupants: Vec<OrganismId>,
}

impl Node {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            move_cost: 1.0,
            vegetation: None,
            occupants: Vec::new(),
        }
    }

    /// (Re)initialize this cell's plant state; always overwrites
    pub fn set_plants(&mut self, amount: f32, energy_density: f32, veg_max: f32) {
        self.vegetation = Some(Vegetation::new(amount, energy_density, veg_max));
    }

    /// Standard grassland cell: 10 units of density-1 vegetation
    pub fn make_plain(&mut self) {
        self.set_plants(10.0, 1.0, 10.0);
    }

    /// Plant state, failing loudly if the map was never initialized here
    pub fn plants(&self) -> Result<&Vegetation> {
        self.vegetation
            .as_ref()
            .ok_or(SimError::UninitializedVegetation(self.coord))
    }

    pub fn plants_mut(&mut self) -> Result<&mut Vegetation> {
        self.vegetation
            .as_mut()
            .ok_or(SimError::UninitializedVegetation(self.coord))
    }

    /// Whether plant state has been initialized (regardless of amount)
    pub fn has_plants(&self) -> bool {
        self.vegetation.is_some()
    }

    pub(crate) fn add_occupant(&mut self, id: OrganismId) {
        self.occupants.push(id);
    }

    pub(crate) fn remove_occupant(&mut self, id: OrganismId) {
        self.occupants.retain(|&o| o != id);
    }
}
