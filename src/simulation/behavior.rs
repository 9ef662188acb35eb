//! The per-organism decision state machine
//!
//! Exactly one of four branches fires per tick, in strict priority order:
//! starvation death, then continuing a committed route, then eating or
//! searching for food, then idling. An organism already en route does not
//! re-evaluate hunger until the route is finished.

use rand::Rng;

use crate::core::error::{Result, SimError};
use crate::core::types::OrganismId;
use crate::grid::Grid;
use crate::pathfind::Pathfinder;
use crate::simulation::perception;
use crate::simulation::tick::TickEvent;

/// Run one tick's decision for a single organism
pub(crate) fn decide<P: Pathfinder + ?Sized>(
    grid: &mut Grid,
    id: OrganismId,
    planner: &P,
) -> Result<Option<TickEvent>> {
    let idx = grid
        .index_of(id)
        .ok_or(SimError::OrganismNotFound(id))?;
    if !grid.organisms[idx].is_alive() {
        return Ok(None);
    }

    // 1. Starvation death preempts everything else this tick.
    if grid.organisms[idx].energy < 0.0 {
        let at = grid.organisms[idx].location;
        grid.kill(idx)?;
        return Ok(Some(TickEvent::Died { id, at }));
    }

    // 2. A held route (even an exhausted one) is advanced before hunger is
    //    looked at again.
    if grid.organisms[idx].path.is_some() {
        return step_route(grid, idx);
    }

    // 3. Hungry: eat in place if the cell can feed us, otherwise search.
    if grid.organisms[idx].is_hungry() {
        let at = grid.organisms[idx].location;
        let bitesize = grid.organisms[idx].bitesize;
        let amount = grid.node(at)?.plants()?.amount;

        if amount >= bitesize {
            let (org, node) = grid.organism_and_node_mut(idx, at)?;
            org.graze(node.plants_mut()?);
            let remaining = grid.node(at)?.plants()?.amount;
            tracing::debug!(?id, %at, remaining, "grazed");
            return Ok(Some(TickEvent::Grazed { id, at, remaining }));
        }

        let sight_range = grid.organisms[idx].sight_range;
        return match perception::find_plants(grid, at, sight_range)? {
            Some(target) => {
                if let Some(route) = planner.compute_path(&*grid, at, target) {
                    grid.organisms[idx].goal = Some(target);
                    grid.organisms[idx].path = Some(route);
                    tracing::debug!(?id, %target, "committed to food");
                    Ok(Some(TickEvent::Foraging { id, goal: target }))
                } else {
                    Ok(None)
                }
            }
            None => wander(grid, idx, planner),
        };
    }

    // 4. Idle: fed and uncommitted.
    Ok(None)
}

/// Advance up to `speed` single-cell steps along the committed route
///
/// Arrival (location equals the goal, or the route is consumed past its
/// end) clears path and goal without charging a cost. Every consumed step
/// charges the destination cell's move cost. A freshly committed route
/// begins with the organism's own cell, so its first step is charged while
/// producing no displacement; this is long-standing behavior the rest of
/// the energy balance is tuned around.
fn step_route(grid: &mut Grid, idx: usize) -> Result<Option<TickEvent>> {
    let id = grid.organisms[idx].id;
    let speed = grid.organisms[idx].speed;

    for _ in 0..speed {
        let at = grid.organisms[idx].location;
        if grid.organisms[idx].goal == Some(at) {
            grid.organisms[idx].path = None;
            grid.organisms[idx].goal = None;
            tracing::debug!(?id, %at, "route complete");
            return Ok(Some(TickEvent::Arrived { id, at }));
        }

        let next = match grid.organisms[idx].path.as_mut().and_then(|route| route.next()) {
            Some(step) => step,
            None => {
                grid.organisms[idx].path = None;
                grid.organisms[idx].goal = None;
                tracing::debug!(?id, %at, "route exhausted");
                return Ok(Some(TickEvent::Arrived { id, at }));
            }
        };

        let cost = grid.node(next)?.move_cost;
        grid.node_mut(at)?.remove_occupant(id);
        grid.organisms[idx].location = next;
        grid.organisms[idx].energy -= cost;
        grid.node_mut(next)?.add_occupant(id);
    }

    Ok(None)
}

/// Exploration fallback: head for a uniformly random visible cell
///
/// Not guaranteed to end anywhere near food; a hungry organism may wander
/// repeatedly until something edible enters its sight window.
fn wander<P: Pathfinder + ?Sized>(
    grid: &mut Grid,
    idx: usize,
    planner: &P,
) -> Result<Option<TickEvent>> {
    let id = grid.organisms[idx].id;
    let at = grid.organisms[idx].location;
    let sight_range = grid.organisms[idx].sight_range;

    let cells = perception::visible_cells(grid, at, sight_range);
    let target = cells[grid.rng.gen_range(0..cells.len())];

    if let Some(route) = planner.compute_path(&*grid, at, target) {
        grid.organisms[idx].goal = Some(target);
        grid.organisms[idx].path = Some(route);
        tracing::debug!(?id, %target, "wandering");
        return Ok(Some(TickEvent::Wandering { id, goal: target }));
    }
    Ok(None)
}

/// Spawn a litter at the parent's cell
///
/// Offspring share the parent's behavioral parameters, join the parent's
/// occupant list, and are registered into the roster; they take their first
/// action on the tick after their birth. Reproduction costs the parent
/// nothing and is driven by external policy, never by `decide`.
pub(crate) fn give_birth(grid: &mut Grid, parent: OrganismId) -> Result<Vec<OrganismId>> {
    let idx = grid
        .index_of(parent)
        .ok_or(SimError::OrganismNotFound(parent))?;
    if !grid.organisms[idx].is_alive() {
        return Err(SimError::OrganismNotFound(parent));
    }

    let litter_size = grid.organisms[idx].litter_size;
    let mut children = Vec::with_capacity(litter_size as usize);
    for _ in 0..litter_size {
        let child = grid.organisms[idx].offspring(OrganismId::new());
        children.push(child.id);
        grid.insert_organism(child)?;
    }
    tracing::debug!(?parent, litter = children.len(), "gave birth");
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Coord;
    use crate::mapgen;
    use crate::pathfind::AStar;

    fn default_config() -> SimulationConfig {
        SimulationConfig::default()
    }

    #[test]
    fn test_death_preempts_everything() {
        // Food underfoot and a committed route: dying still wins
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(3, 3), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        let route = AStar
            .compute_path(&grid, Coord::new(3, 3), Coord::new(6, 6))
            .unwrap();
        grid.organisms[idx].goal = Some(Coord::new(6, 6));
        grid.organisms[idx].path = Some(route);
        grid.organisms[idx].energy = -1.0;

        let event = decide(&mut grid, id, &AStar).unwrap();
        assert_eq!(event, Some(TickEvent::Died { id, at: Coord::new(3, 3) }));
        assert_eq!(grid.live_count(), 0);
        assert!(grid.get_node(3, 3).unwrap().occupants.is_empty());
    }

    #[test]
    fn test_zero_energy_is_still_alive() {
        let mut grid = mapgen::desert(5, 5, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(2, 2), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        grid.organisms[idx].energy = 0.0;

        // Energy exactly zero forages rather than dying
        let event = decide(&mut grid, id, &AStar).unwrap();
        assert!(!matches!(event, Some(TickEvent::Died { .. })));
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_grazes_in_place_when_cell_feeds() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(1, 1), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        grid.organisms[idx].energy = 20.0;

        let event = decide(&mut grid, id, &AStar).unwrap();
        assert!(matches!(event, Some(TickEvent::Grazed { .. })));
        let plants = grid.get_node(1, 1).unwrap().plants().unwrap();
        assert!((plants.amount - 9.0).abs() < f32::EPSILON);
        assert!((grid.organism(id).unwrap().energy - 21.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fed_organism_idles() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(1, 1), &config).unwrap();

        let event = decide(&mut grid, id, &AStar).unwrap();
        assert_eq!(event, None);
        let plants = grid.get_node(1, 1).unwrap().plants().unwrap();
        assert!((plants.amount - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_commits_route_to_visible_food() {
        let mut grid = mapgen::desert(10, 10, 1);
        grid.get_node_mut(3, 3).unwrap().set_plants(1.0, 1.0, 10.0);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(5, 5), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        grid.organisms[idx].energy = 20.0;

        let event = decide(&mut grid, id, &AStar).unwrap();
        assert_eq!(
            event,
            Some(TickEvent::Foraging { id, goal: Coord::new(3, 3) })
        );
        let org = grid.organism(id).unwrap();
        assert_eq!(org.goal, Some(Coord::new(3, 3)));
        assert!(org.path.is_some());
        // Committing the route costs nothing yet
        assert!((org.energy - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wanders_when_nothing_in_sight() {
        let mut grid = mapgen::desert(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(5, 5), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        grid.organisms[idx].energy = 20.0;

        let event = decide(&mut grid, id, &AStar).unwrap();
        match event {
            Some(TickEvent::Wandering { goal, .. }) => {
                // Goal stays inside the sight window
                assert!(goal.chebyshev(&Coord::new(5, 5)) <= 2);
            }
            other => panic!("expected Wandering, got {:?}", other),
        }
        assert!(grid.organism(id).unwrap().path.is_some());
    }

    #[test]
    fn test_route_steps_charge_destination_cost() {
        // Mirror of the original movement trace: the route starts with the
        // organism's own cell, so the first step charges without moving.
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(3, 3), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        let route = AStar
            .compute_path(&grid, Coord::new(3, 3), Coord::new(6, 6))
            .unwrap();
        grid.organisms[idx].goal = Some(Coord::new(6, 6));
        grid.organisms[idx].path = Some(route);

        let mut energy = 100.0;
        for i in 3..7 {
            step_route(&mut grid, idx).unwrap();
            energy -= 1.0;
            let org = grid.organism(id).unwrap();
            assert_eq!(org.location, Coord::new(i, i));
            assert!((org.energy - energy).abs() < f32::EPSILON);
        }

        // One more invocation detects arrival and clears the commitment
        let event = step_route(&mut grid, idx).unwrap();
        assert_eq!(event, Some(TickEvent::Arrived { id, at: Coord::new(6, 6) }));
        let org = grid.organism(id).unwrap();
        assert!(org.path.is_none());
        assert!(org.goal.is_none());
        assert!((org.energy - 96.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_movement_updates_occupancy() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(2, 2), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        let route = AStar
            .compute_path(&grid, Coord::new(2, 2), Coord::new(3, 3))
            .unwrap();
        grid.organisms[idx].goal = Some(Coord::new(3, 3));
        grid.organisms[idx].path = Some(route);

        step_route(&mut grid, idx).unwrap(); // consumes (2, 2)
        step_route(&mut grid, idx).unwrap(); // steps into (3, 3)
        assert!(grid.get_node(2, 2).unwrap().occupants.is_empty());
        assert_eq!(grid.get_node(3, 3).unwrap().occupants, vec![id]);
    }

    #[test]
    fn test_speed_two_finishes_and_idles_in_one_tick() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = SimulationConfig {
            speed: 2,
            ..SimulationConfig::default()
        };
        let id = grid.spawn_organism(Coord::new(5, 5), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        // Single-cell remainder: one cost-bearing step, then arrival
        grid.organisms[idx].goal = Some(Coord::new(5, 6));
        grid.organisms[idx].path = Some(crate::pathfind::Route::new(vec![Coord::new(5, 6)]));

        let event = step_route(&mut grid, idx).unwrap();
        assert_eq!(event, Some(TickEvent::Arrived { id, at: Coord::new(5, 6) }));
        let org = grid.organism(id).unwrap();
        assert_eq!(org.location, Coord::new(5, 6));
        assert!((org.energy - 99.0).abs() < f32::EPSILON);
        assert!(org.path.is_none() && org.goal.is_none());
    }

    #[test]
    fn test_exhausted_route_reads_as_arrival() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let id = grid.spawn_organism(Coord::new(4, 4), &config).unwrap();
        let idx = grid.index_of(id).unwrap();
        // Route already consumed, goal never reached (e.g. stale commitment)
        grid.organisms[idx].goal = Some(Coord::new(9, 9));
        grid.organisms[idx].path = Some(crate::pathfind::Route::new(vec![]));

        let event = step_route(&mut grid, idx).unwrap();
        assert_eq!(event, Some(TickEvent::Arrived { id, at: Coord::new(4, 4) }));
        let org = grid.organism(id).unwrap();
        assert!(org.path.is_none() && org.goal.is_none());
        assert!((org.energy - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_give_birth_places_litter_with_parent() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let parent = grid.spawn_organism(Coord::new(4, 4), &config).unwrap();

        let children = give_birth(&mut grid, parent).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(grid.live_count(), 3);

        let occupants = &grid.get_node(4, 4).unwrap().occupants;
        assert_eq!(occupants.len(), 3);
        assert_eq!(occupants[0], parent);
        for child in &children {
            assert!(occupants.contains(child));
            assert_eq!(grid.organism(*child).unwrap().location, Coord::new(4, 4));
        }
    }

    #[test]
    fn test_give_birth_requires_living_parent() {
        let mut grid = mapgen::plain(10, 10, 1);
        let config = default_config();
        let parent = grid.spawn_organism(Coord::new(4, 4), &config).unwrap();
        let idx = grid.index_of(parent).unwrap();
        grid.kill(idx).unwrap();

        assert!(give_birth(&mut grid, parent).is_err());
    }
}
