use serde::{Deserialize, Serialize};
use std::fmt;

/// A house sits on an integer grid cell `[x, y]`.
pub type House = [usize; 2];

/// A hospital starts on a grid cell but moves to real-valued means once updated.
pub type Hospital = [f64; 2];

/// Where the engine is in the stepwise k-means lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    Unconfigured,
    GridSet,
    DataReady,
    HospitalsReady,
    ClustersAssigned,
    HospitalsUpdated,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnginePhase::Unconfigured => write!(f, "UNCONFIGURED"),
            EnginePhase::GridSet => write!(f, "GRID_SET"),
            EnginePhase::DataReady => write!(f, "DATA_READY"),
            EnginePhase::HospitalsReady => write!(f, "HOSPITALS_READY"),
            EnginePhase::ClustersAssigned => write!(f, "CLUSTERS_ASSIGNED"),
            EnginePhase::HospitalsUpdated => write!(f, "HOSPITALS_UPDATED"),
        }
    }
}

/// Quality of the current assignment, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    pub average_distance: f64,
    pub inertia: f64,
}

/// Point-in-time copy of everything the engine holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: EnginePhase,
    pub m: Option<usize>,
    pub n: Option<usize>,
    #[serde(rename = "A")]
    pub a: Option<usize>,
    pub data: Option<Vec<House>>,
    pub hospitals: Option<Vec<Hospital>>,
    pub clusters: Option<Vec<usize>>,
}

impl EngineSnapshot {
    /// True once a set of houses exists.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}
