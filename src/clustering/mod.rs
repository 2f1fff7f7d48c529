// Module declarations
pub mod assignment;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod sampling;
#[cfg(test)]
mod tests;
pub mod types;
pub mod update;

pub use types::*;

pub use assignment::{assign_houses, euclidean_distance, nearest_hospital};
pub use engine::ClusteringEngine;
pub use error::ClusteringError;
pub use metrics::{calculate_metrics, round_2dp};
pub use update::recompute_hospitals;

/// Grid side used when nothing else is configured
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Most houses a single `generate_points` call may create, whatever the grid
/// capacity. Larger requests fail with `InvalidArgument`.
pub const MAX_HOUSES: usize = 1_000_000;
