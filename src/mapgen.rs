//! Map constructors: terrain presets and initial population placement

use clap::ValueEnum;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{Coord, OrganismId};
use crate::grid::Grid;

/// Terrain presets selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapKind {
    /// Uniform grassland, every cell fully grown
    Plain,
    /// Every cell initialized but barren
    Desert,
    /// Random per-cell amounts, from bare to fully grown
    Patchy,
}

/// Build a map of the given kind
pub fn build(kind: MapKind, width: i32, height: i32, seed: u64) -> Grid {
    match kind {
        MapKind::Plain => plain(width, height, seed),
        MapKind::Desert => desert(width, height, seed),
        MapKind::Patchy => patchy(width, height, seed),
    }
}

/// Uniform grassland: every cell at full growth
pub fn plain(width: i32, height: i32, seed: u64) -> Grid {
    let mut grid = Grid::with_seed(width, height, seed);
    for y in 0..height {
        for x in 0..width {
            grid.get_node_mut(x, y).expect("in bounds").make_plain();
        }
    }
    grid
}

/// Initialized but barren: zero plants everywhere
pub fn desert(width: i32, height: i32, seed: u64) -> Grid {
    let mut grid = Grid::with_seed(width, height, seed);
    for y in 0..height {
        for x in 0..width {
            grid.get_node_mut(x, y)
                .expect("in bounds")
                .set_plants(0.0, 1.0, 10.0);
        }
    }
    grid
}

/// Random growth per cell, drawn from the grid's own seeded RNG
pub fn patchy(width: i32, height: i32, seed: u64) -> Grid {
    let mut grid = Grid::with_seed(width, height, seed);
    for y in 0..height {
        for x in 0..width {
            let amount = grid.rng.gen_range(0..10) as f32;
            grid.get_node_mut(x, y)
                .expect("in bounds")
                .set_plants(amount, 1.0, 10.0);
        }
    }
    grid
}

/// Scatter `count` organisms across random cells of the grid
pub fn populate(grid: &mut Grid, count: usize, config: &SimulationConfig) -> Vec<OrganismId> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let x = grid.rng.gen_range(0..grid.width());
        let y = grid.rng.gen_range(0..grid.height());
        let id = grid
            .spawn_organism(Coord::new(x, y), config)
            .expect("random cell is in bounds");
        ids.push(id);
    }
    ids
}
