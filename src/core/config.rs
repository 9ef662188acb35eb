//! Simulation configuration with documented constants
//!
//! All behavioral parameters are collected here with explanations of their
//! purpose and how they interact with each other.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, SimError};

/// Behavioral parameters applied to newly spawned organisms
///
/// These values have been tuned to produce a legible forage/starve cycle.
/// Changing them shifts how quickly a population strips a map bare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Energy a freshly spawned organism starts with
    ///
    /// Also the conceptual ceiling: grazing is not clamped against it, so
    /// a well-fed organism can briefly exceed it.
    pub energy_start: f32,

    /// Nominal energy capacity
    ///
    /// Only used to scale `eat_threshold`; gains are deliberately not
    /// clamped against it.
    pub energy_max: f32,

    /// Vegetation units consumed per graze
    ///
    /// An organism only grazes a cell holding at least this much, so one
    /// bite never drives a cell negative on its own.
    pub bitesize: f32,

    /// Grid cells advanced per tick while following a route
    ///
    /// Route steps are always single-cell; speed repeats them within one
    /// tick, each step paying the destination cell's move cost.
    pub speed: u32,

    /// Chebyshev radius of the perception window
    ///
    /// At 2, an organism in open terrain sees a 5x5 window (25 cells,
    /// its own included). Food outside this window does not exist as far
    /// as the organism is concerned.
    pub sight_range: i32,

    /// Fraction of `energy_max` below which foraging kicks in
    ///
    /// At 0.5 an organism starts looking for food once energy drops
    /// under 50. Above the threshold it idles unless already en route.
    pub eat_threshold: f32,

    /// Offspring produced per reproduction event
    pub litter_size: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            energy_start: 100.0,
            energy_max: 100.0,
            bitesize: 1.0,
            speed: 1,
            sight_range: 2,
            eat_threshold: 0.5,
            litter_size: 2,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.energy_max <= 0.0 || self.energy_start <= 0.0 {
            return Err(SimError::InvalidConfig(
                "energy_start and energy_max must be positive".into(),
            ));
        }
        if self.bitesize <= 0.0 {
            return Err(SimError::InvalidConfig("bitesize must be positive".into()));
        }
        if self.speed == 0 {
            return Err(SimError::InvalidConfig(
                "speed must be at least 1 cell per tick".into(),
            ));
        }
        if self.sight_range < 0 {
            return Err(SimError::InvalidConfig(
                "sight_range cannot be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.eat_threshold) {
            return Err(SimError::InvalidConfig(format!(
                "eat_threshold ({}) must lie in [0, 1]",
                self.eat_threshold
            )));
        }
        Ok(())
    }
}
