//! Per-region fire intensities.
//!
//! A [`FireMap`] holds one [`FireLevel`] per region, indexed like the
//! graph. Levels only ever go down, one step at a time, and only through
//! the controller.

use blaze_types::{FireLevel, RegionId};
use serde::Serialize;

use crate::error::SimulationError;

/// Current fire intensity of every region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FireMap {
    /// Intensity per region; index 0 is the base and is always 0.
    levels: Vec<FireLevel>,
}

impl FireMap {
    /// Build a fire map from raw intensities.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::FireCountMismatch`] if `raw` does not have
    ///   exactly `region_count` entries.
    /// - [`SimulationError::InvalidIntensity`] for a value above 5.
    /// - [`SimulationError::BaseOnFire`] if the base has a non-zero value.
    pub fn from_raw(raw: &[u8], region_count: usize) -> Result<Self, SimulationError> {
        if raw.len() != region_count {
            return Err(SimulationError::FireCountMismatch {
                expected: region_count,
                actual: raw.len(),
            });
        }

        let levels = raw
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                FireLevel::new(value).ok_or(SimulationError::InvalidIntensity {
                    region: RegionId::new(i),
                    level: value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(base) = levels.first()
            && !base.is_extinguished()
        {
            return Err(SimulationError::BaseOnFire { level: base.get() });
        }

        Ok(Self { levels })
    }

    /// Intensity at `region`, or `None` if the region does not exist.
    pub fn level(&self, region: RegionId) -> Option<FireLevel> {
        self.levels.get(region.index()).copied()
    }

    /// Burning regions with their levels, in ascending region order.
    pub fn burning(&self) -> impl Iterator<Item = (RegionId, FireLevel)> {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, level)| !level.is_extinguished())
            .map(|(i, &level)| (RegionId::new(i), level))
    }

    /// Whether any fire is still burning.
    pub fn any_burning(&self) -> bool {
        self.levels.iter().any(|level| !level.is_extinguished())
    }

    /// Number of regions still on fire.
    pub fn burning_count(&self) -> usize {
        self.burning().count()
    }

    /// Sum of all current intensities.
    pub fn total_intensity(&self) -> u64 {
        self.levels.iter().map(|level| u64::from(level.get())).sum()
    }

    /// Number of regions covered.
    pub const fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the map covers no regions.
    pub const fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Lower the fire at `region` by one level and return the new level.
    ///
    /// Returns `None` for an unknown region. An extinguished fire stays at 0.
    pub(crate) fn reduce(&mut self, region: RegionId) -> Option<FireLevel> {
        let slot = self.levels.get_mut(region.index())?;
        *slot = slot.reduced();
        Some(*slot)
    }
}
