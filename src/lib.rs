//! Veldt - grassland foraging simulation
//!
//! Autonomous organisms graze a grid of renewable vegetation. Each tick an
//! organism either dies of starvation, advances a committed route, eats or
//! searches for food, or idles; route search is delegated to a pluggable
//! pathfinder behind a narrow trait seam.

pub mod core;
pub mod grid;
pub mod mapgen;
pub mod organism;
pub mod pathfind;
pub mod simulation;
pub mod ui;
