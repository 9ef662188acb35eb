pub mod behavior;
pub mod perception;
pub mod tick;

pub use perception::{find_plants, visible_cells};
pub use tick::{run_tick, TickEvent};
