//! Per-cell plant resource state

use serde::{Deserialize, Serialize};

/// The renewable food resource held by a grid cell
///
/// `amount` is kept >= 0 by convention only; grazing performs a raw
/// subtraction and never clamps, so concurrent grazers within one tick can
/// drive a cell negative. `veg_max` scales the display color ramp and is
/// not enforced as a growth cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vegetation {
    pub amount: f32,
    pub energy_density: f32,
    pub veg_max: f32,
}

impl Vegetation {
    pub fn new(amount: f32, energy_density: f32, veg_max: f32) -> Self {
        Self {
            amount,
            energy_density,
            veg_max,
        }
    }
}
