use super::assignment::euclidean_distance;
use super::types::{ClusterMetrics, Hospital, House};

/// Rounds to two decimals, halves away from zero.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average distance and inertia of houses to their assigned hospitals.
///
/// Returns zeroed metrics when there are no houses. A cluster index with no
/// matching hospital is skipped.
pub fn calculate_metrics(houses: &[House], hospitals: &[Hospital], clusters: &[usize]) -> ClusterMetrics {
    if houses.is_empty() {
        return ClusterMetrics::default();
    }

    let mut total_distance = 0.0;
    let mut inertia = 0.0;
    for (house, &cluster) in houses.iter().zip(clusters) {
        if let Some(hospital) = hospitals.get(cluster) {
            let distance = euclidean_distance(house, hospital);
            total_distance += distance;
            inertia += distance * distance;
        }
    }

    ClusterMetrics {
        average_distance: round_2dp(total_distance / houses.len() as f64),
        inertia: round_2dp(inertia),
    }
}
