//! Read-only terminal visualization of the grid

pub mod app;
pub mod colors;

pub use app::run;
pub use colors::{vegetation_band, vegetation_color};
