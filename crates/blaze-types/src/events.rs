//! Discrete notifications emitted by the dispatch controller.
//!
//! The controller never waits on a sink to acknowledge an event; events are
//! fire-and-forget records of what happened during a tick.

use serde::{Deserialize, Serialize};

use crate::ids::{FireLevel, RegionId};
use crate::structs::Position;

/// An event produced by a single controller step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchEvent {
    /// The planner chose a fire and a path toward it.
    TargetSelected {
        /// The chosen fire-bearing region.
        target: RegionId,
        /// Total weight of the planned path.
        distance: u64,
        /// Intensity of the fire at selection time.
        level: FireLevel,
    },
    /// The unit reached the end of its current path.
    Arrived {
        /// The region reached.
        region: RegionId,
        /// Layout position of the region, for display.
        position: Position,
    },
    /// One suppression step lowered a fire by one level.
    FireLevelReduced {
        /// The region being suppressed.
        region: RegionId,
        /// The level after the reduction.
        level: FireLevel,
        /// Water spent on this step.
        water_used: u64,
        /// Fuel spent on this step.
        fuel_used: u64,
    },
    /// A fire reached level zero.
    FireExtinguished {
        /// The region that is now safe.
        region: RegionId,
    },
    /// The ledger cannot cover the next travel hop or suppression step.
    InsufficientResources {
        /// Where the shortfall was detected.
        region: RegionId,
        /// Fuel currently on board.
        fuel: u64,
        /// Water currently on board.
        water: u64,
    },
    /// Fuel and water were refilled to capacity at base.
    Refilled {
        /// Fuel after the refill.
        fuel: u64,
        /// Water after the refill.
        water: u64,
    },
    /// Every fire is out; the report has been built.
    AllFiresExtinguished {
        /// Regions in the order their fires were put out.
        order: Vec<RegionId>,
    },
}

impl DispatchEvent {
    /// Short machine-friendly name of the event kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TargetSelected { .. } => "target_selected",
            Self::Arrived { .. } => "arrived",
            Self::FireLevelReduced { .. } => "fire_level_reduced",
            Self::FireExtinguished { .. } => "fire_extinguished",
            Self::InsufficientResources { .. } => "insufficient_resources",
            Self::Refilled { .. } => "refilled",
            Self::AllFiresExtinguished { .. } => "all_fires_extinguished",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serde_tag() {
        let event = DispatchEvent::Refilled {
            fuel: 5000,
            water: 20_000,
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value.get("kind").and_then(|k| k.as_str()), Some(event.kind()));
    }

    #[test]
    fn extinguished_order_serializes_as_indices() {
        let event = DispatchEvent::AllFiresExtinguished {
            order: vec![RegionId::new(1), RegionId::new(3)],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"kind":"all_fires_extinguished","order":[1,3]}"#);
    }
}
