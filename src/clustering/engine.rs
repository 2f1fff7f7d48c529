use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::assignment::assign_houses;
use super::error::ClusteringError;
use super::metrics::calculate_metrics;
use super::sampling::{random_hospitals, random_houses};
use super::types::{ClusterMetrics, EnginePhase, EngineSnapshot, Hospital, House};
use super::update::recompute_hospitals;
use super::MAX_HOUSES;
use crate::TARGET_ENGINE;

/// Stepwise k-means over an `m x m` integer grid.
///
/// Houses are the data points, hospitals the centroids. Nothing iterates on
/// its own: callers drive [`assign_step`](Self::assign_step) and
/// [`update_step`](Self::update_step) one at a time.
///
/// What each mutating call clears:
///
/// | call                 | houses   | hospitals | clusters |
/// |----------------------|----------|-----------|----------|
/// | `configure_grid`     | cleared  | cleared   | cleared  |
/// | `generate_points`    | replaced | kept      | cleared  |
/// | `generate_centroids` | kept     | replaced  | cleared  |
/// | `assign_step`        | kept     | kept      | replaced |
/// | `update_step`        | kept     | replaced  | kept     |
pub struct ClusteringEngine {
    m: Option<usize>,
    houses: Option<Vec<House>>,
    hospitals: Option<Vec<Hospital>>,
    clusters: Option<Vec<usize>>,
    phase: EnginePhase,
    rng: StdRng,
}

impl Default for ClusteringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusteringEngine {
    /// Engine with no grid, seeded from the OS.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Engine with no grid and a reproducible random stream.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Engine with its grid already configured.
    pub fn with_grid(m: i64) -> Result<Self, ClusteringError> {
        let mut engine = Self::new();
        engine.configure_grid(m)?;
        Ok(engine)
    }

    /// Seeded engine with its grid already configured.
    pub fn with_grid_and_seed(m: i64, seed: u64) -> Result<Self, ClusteringError> {
        let mut engine = Self::with_seed(seed);
        engine.configure_grid(m)?;
        Ok(engine)
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            m: None,
            houses: None,
            hospitals: None,
            clusters: None,
            phase: EnginePhase::Unconfigured,
            rng,
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn grid_size(&self) -> Option<usize> {
        self.m
    }

    pub fn houses(&self) -> Option<&[House]> {
        self.houses.as_deref()
    }

    pub fn hospitals(&self) -> Option<&[Hospital]> {
        self.hospitals.as_deref()
    }

    pub fn clusters(&self) -> Option<&[usize]> {
        self.clusters.as_deref()
    }

    /// Sets the grid side and drops every house, hospital and assignment.
    pub fn configure_grid(&mut self, m: i64) -> Result<usize, ClusteringError> {
        if m <= 0 {
            return Err(ClusteringError::InvalidArgument(format!(
                "grid size (m) must be a positive integer, got {}",
                m
            )));
        }
        let m = usize::try_from(m).map_err(|_| {
            ClusteringError::InvalidArgument(format!("grid size (m) {} is too large", m))
        })?;
        // m*m must fit for the capacity checks below
        if m.checked_mul(m).is_none() {
            return Err(ClusteringError::InvalidArgument(format!(
                "grid size (m) {} is too large",
                m
            )));
        }

        self.m = Some(m);
        self.houses = None;
        self.hospitals = None;
        self.clusters = None;
        self.phase = EnginePhase::GridSet;
        info!(target: TARGET_ENGINE, "Engine reset with a {}x{} grid", m, m);
        Ok(m)
    }

    /// Places `n` houses uniformly at random, duplicates allowed.
    ///
    /// `n` is bounded by both `m*m` and [`MAX_HOUSES`].
    ///
    /// Existing hospitals are kept; the previous assignment is dropped.
    pub fn generate_points(&mut self, n: i64) -> Result<&[House], ClusteringError> {
        let m = self.require_grid()?;
        let capacity = m * m;
        if n < 0 {
            return Err(ClusteringError::InvalidArgument(format!(
                "number of houses (n) must be at least 0, got {}",
                n
            )));
        }
        let n = match usize::try_from(n) {
            Ok(n) if n <= capacity => n,
            _ => {
                return Err(ClusteringError::InvalidArgument(format!(
                    "number of houses (n) cannot exceed m*m = {} (m = {}), got {}",
                    capacity, m, n
                )))
            }
        };
        if n > MAX_HOUSES {
            return Err(ClusteringError::InvalidArgument(format!(
                "number of houses (n) cannot exceed {}, got {}",
                MAX_HOUSES, n
            )));
        }

        let houses = random_houses(&mut self.rng, m, n);
        self.clusters = None;
        self.phase = if self.hospitals.is_some() {
            EnginePhase::HospitalsReady
        } else {
            EnginePhase::DataReady
        };
        info!(target: TARGET_ENGINE, "Generated {} houses on a {}x{} grid", n, m, m);
        Ok(self.houses.insert(houses).as_slice())
    }

    /// Places `a` hospitals uniformly at random, independent of the houses.
    pub fn generate_centroids(&mut self, a: i64) -> Result<&[Hospital], ClusteringError> {
        let m = self.require_grid()?;
        let n = match &self.houses {
            Some(houses) => houses.len(),
            None => {
                return Err(ClusteringError::NotReady(
                    "houses must be generated before hospitals".to_string(),
                ))
            }
        };
        let capacity = m * m;

        if a <= 0 {
            return Err(ClusteringError::InvalidArgument(format!(
                "number of hospitals (A) must be a positive integer, got {}",
                a
            )));
        }
        let a = match usize::try_from(a) {
            Ok(a) if a <= capacity => a,
            _ => {
                return Err(ClusteringError::InvalidArgument(format!(
                    "number of hospitals (A) cannot exceed m*m = {} (m = {}), got {}",
                    capacity, m, a
                )))
            }
        };
        if a > n {
            return Err(ClusteringError::InvalidArgument(format!(
                "number of hospitals (A) cannot exceed the number of houses (n = {}), got {}",
                n, a
            )));
        }

        let hospitals = random_hospitals(&mut self.rng, m, a);
        self.clusters = None;
        self.phase = EnginePhase::HospitalsReady;
        info!(target: TARGET_ENGINE, "Generated {} hospitals", a);
        Ok(self.hospitals.insert(hospitals).as_slice())
    }

    /// Assigns every house to its nearest hospital (lowest index on ties).
    pub fn assign_step(&mut self) -> Result<&[usize], ClusteringError> {
        let (houses, hospitals) = match (&self.houses, &self.hospitals) {
            (Some(houses), Some(hospitals)) if !hospitals.is_empty() => (houses, hospitals),
            _ => {
                return Err(ClusteringError::NotReady(
                    "houses and hospitals must be generated before assigning clusters".to_string(),
                ))
            }
        };

        let clusters = assign_houses(houses, hospitals);
        debug!(target: TARGET_ENGINE, "Assigned {} houses to {} hospitals", houses.len(), hospitals.len());
        self.phase = EnginePhase::ClustersAssigned;
        Ok(self.clusters.insert(clusters).as_slice())
    }

    /// Moves every hospital to the mean of its houses, re-seeding empty ones.
    pub fn update_step(&mut self) -> Result<&[Hospital], ClusteringError> {
        let (m, houses, clusters, count) =
            match (self.m, &self.houses, &self.clusters, &self.hospitals) {
                (Some(m), Some(houses), Some(clusters), Some(hospitals)) => {
                    (m, houses, clusters, hospitals.len())
                }
                _ => {
                    return Err(ClusteringError::NotReady(
                        "clusters must be assigned before updating hospitals".to_string(),
                    ))
                }
            };

        let hospitals = recompute_hospitals(houses, clusters, count, m, &mut self.rng);
        debug!(target: TARGET_ENGINE, "Recomputed {} hospital positions", count);
        self.phase = EnginePhase::HospitalsUpdated;
        Ok(self.hospitals.insert(hospitals).as_slice())
    }

    /// Average distance and inertia, or zeros if anything is missing.
    pub fn metrics(&self) -> ClusterMetrics {
        match (&self.houses, &self.hospitals, &self.clusters) {
            (Some(houses), Some(hospitals), Some(clusters)) => {
                calculate_metrics(houses, hospitals, clusters)
            }
            _ => ClusterMetrics::default(),
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase,
            m: self.m,
            n: self.houses.as_ref().map(Vec::len),
            a: self.hospitals.as_ref().map(Vec::len),
            data: self.houses.clone(),
            hospitals: self.hospitals.clone(),
            clusters: self.clusters.clone(),
        }
    }

    fn require_grid(&self) -> Result<usize, ClusteringError> {
        self.m.ok_or_else(|| {
            ClusteringError::NotReady("grid size (m) must be configured first".to_string())
        })
    }
}
