//! Tick orchestration: one decision pass over every live organism
//!
//! Events generated during a tick are returned for display in the UI
//! event log and for headless run summaries.

use crate::core::error::Result;
use crate::core::types::{Coord, OrganismId};
use crate::grid::Grid;
use crate::pathfind::Pathfinder;
use crate::simulation::behavior;

/// Something notable an organism did during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    /// Energy dropped below zero; removed from the world
    Died { id: OrganismId, at: Coord },
    /// Committed route finished; path and goal cleared
    Arrived { id: OrganismId, at: Coord },
    /// Ate in place, leaving `remaining` plant units on the cell
    Grazed {
        id: OrganismId,
        at: Coord,
        remaining: f32,
    },
    /// Spotted food and committed a route to it
    Foraging { id: OrganismId, goal: Coord },
    /// Nothing edible in sight; picked a random cell to explore
    Wandering { id: OrganismId, goal: Coord },
}

impl std::fmt::Display for TickEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickEvent::Died { at, .. } => write!(f, "starved at {at}"),
            TickEvent::Arrived { at, .. } => write!(f, "arrived at {at}"),
            TickEvent::Grazed { at, remaining, .. } => {
                write!(f, "grazed at {at} ({remaining:.1} left)")
            }
            TickEvent::Foraging { goal, .. } => write!(f, "heading for food at {goal}"),
            TickEvent::Wandering { goal, .. } => write!(f, "wandering toward {goal}"),
        }
    }
}

/// Run a single simulation tick
///
/// The live roster is snapshotted up front: organisms spawned during the
/// pass do not act until the next tick, and organisms that die mid-pass are
/// skipped when their turn comes around.
pub fn run_tick<P: Pathfinder + ?Sized>(grid: &mut Grid, planner: &P) -> Result<Vec<TickEvent>> {
    let roster = grid.live_roster();
    let mut events = Vec::new();

    for id in roster {
        if let Some(event) = behavior::decide(grid, id, planner)? {
            events.push(event);
        }
    }

    grid.current_tick += 1;
    tracing::trace!(
        tick = grid.current_tick,
        events = events.len(),
        population = grid.live_count(),
        "tick complete"
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::mapgen;
    use crate::pathfind::AStar;

    #[test]
    fn test_tick_counter_advances() {
        let mut grid = mapgen::plain(5, 5, 1);
        assert_eq!(grid.current_tick(), 0);
        grid.advance(&AStar).unwrap();
        grid.advance(&AStar).unwrap();
        assert_eq!(grid.current_tick(), 2);
    }

    #[test]
    fn test_empty_grid_ticks_quietly() {
        let mut grid = mapgen::plain(5, 5, 1);
        let events = grid.advance(&AStar).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_events_follow_roster_order() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = SimulationConfig::default();
        let first = grid.spawn_organism(Coord::new(1, 1), &config).unwrap();
        let second = grid.spawn_organism(Coord::new(8, 8), &config).unwrap();
        for id in [first, second] {
            let idx = grid.index_of(id).unwrap();
            grid.organisms[idx].energy = 20.0;
        }

        let events = grid.advance(&AStar).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TickEvent::Grazed { id, .. } if id == first));
        assert!(matches!(events[1], TickEvent::Grazed { id, .. } if id == second));
    }

    #[test]
    fn test_shared_cell_grazed_twice_in_one_tick() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = SimulationConfig::default();
        for _ in 0..2 {
            let id = grid.spawn_organism(Coord::new(4, 4), &config).unwrap();
            let idx = grid.index_of(id).unwrap();
            grid.organisms[idx].energy = 20.0;
        }

        grid.advance(&AStar).unwrap();
        let plants = grid.get_node(4, 4).unwrap().plants().unwrap();
        assert!((plants.amount - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_death_mid_pass_leaves_others_untouched() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = SimulationConfig::default();
        let doomed = grid.spawn_organism(Coord::new(2, 2), &config).unwrap();
        let healthy = grid.spawn_organism(Coord::new(7, 7), &config).unwrap();
        let idx = grid.index_of(doomed).unwrap();
        grid.organisms[idx].energy = -5.0;

        let events = grid.advance(&AStar).unwrap();
        assert!(matches!(events[0], TickEvent::Died { id, .. } if id == doomed));
        assert_eq!(grid.live_count(), 1);
        assert!(grid.organism(healthy).is_some());
    }

    #[test]
    fn test_litter_joins_the_next_pass() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = SimulationConfig::default();
        let parent = grid.spawn_organism(Coord::new(3, 3), &config).unwrap();
        let children = grid.give_birth(parent).unwrap();

        // Make the children hungry so their actions are observable
        for child in &children {
            let idx = grid.index_of(*child).unwrap();
            grid.organisms[idx].energy = 20.0;
        }
        let events = grid.advance(&AStar).unwrap();
        // Both children were alive before the pass began, so both graze
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, TickEvent::Grazed { .. }))
                .count(),
            2
        );
    }
}
