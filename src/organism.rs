//! Organism state: energy, perception parameters, and committed route

use crate::core::config::SimulationConfig;
use crate::core::types::{Coord, OrganismId};
use crate::grid::vegetation::Vegetation;
use crate::pathfind::Route;

/// An autonomous grazing agent
///
/// The organism records where it is (`location` is a lookup into the grid
/// that owns it, not ownership of the node) and what it has committed to
/// (`path`/`goal`). All decision logic lives in `simulation::behavior`; this
/// type only holds state and the primitive graze mutation.
#[derive(Debug, Clone)]
pub struct Organism {
    pub id: OrganismId,
    pub energy: f32,
    pub energy_max: f32,
    pub bitesize: f32,
    pub speed: u32,
    pub sight_range: i32,
    pub eat_threshold: f32,
    pub litter_size: u32,
    pub location: Coord,
    /// Remaining route steps, if committed to one; present-but-exhausted
    /// still counts as "en route" for the decision loop
    pub path: Option<Route>,
    /// Terminal node of the committed route
    pub goal: Option<Coord>,
    pub(crate) alive: bool,
}

impl Organism {
    pub fn new(id: OrganismId, location: Coord, config: &SimulationConfig) -> Self {
        Self {
            id,
            energy: config.energy_start,
            energy_max: config.energy_max,
            bitesize: config.bitesize,
            speed: config.speed,
            sight_range: config.sight_range,
            eat_threshold: config.eat_threshold,
            litter_size: config.litter_size,
            location,
            path: None,
            goal: None,
            alive: true,
        }
    }

    /// A child organism sharing this one's behavioral parameters,
    /// placed at the parent's location with a full energy reserve
    pub fn offspring(&self, id: OrganismId) -> Self {
        Self {
            id,
            energy: self.energy_max,
            energy_max: self.energy_max,
            bitesize: self.bitesize,
            speed: self.speed,
            sight_range: self.sight_range,
            eat_threshold: self.eat_threshold,
            litter_size: self.litter_size,
            location: self.location,
            path: None,
            goal: None,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Below the foraging threshold?
    pub fn is_hungry(&self) -> bool {
        self.energy < self.eat_threshold * self.energy_max
    }

    /// Consume one bite from the given cell's plants
    ///
    /// Raw subtraction: the amount is not floored at zero, and the energy
    /// gained is not capped at `energy_max`.
    pub fn graze(&mut self, plants: &mut Vegetation) {
        plants.amount -= self.bitesize;
        self.energy += plants.energy_density * self.bitesize;
    }
}
