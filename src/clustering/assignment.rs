use super::types::{Hospital, House};

/// Euclidean distance between a house and a hospital.
pub fn euclidean_distance(house: &House, hospital: &Hospital) -> f64 {
    let dx = house[0] as f64 - hospital[0];
    let dy = house[1] as f64 - hospital[1];
    (dx * dx + dy * dy).sqrt()
}

/// Index of the hospital closest to `house`.
///
/// Hospitals are scanned in index order and the best index only changes on a
/// strictly smaller distance, so ties resolve to the lowest index.
///
/// # Returns
/// * `None` if `hospitals` is empty
pub fn nearest_hospital(house: &House, hospitals: &[Hospital]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, hospital) in hospitals.iter().enumerate() {
        let distance = euclidean_distance(house, hospital);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Assigns every house to its nearest hospital. O(n·A).
///
/// `hospitals` must be non-empty; callers check this before getting here.
pub fn assign_houses(houses: &[House], hospitals: &[Hospital]) -> Vec<usize> {
    houses
        .iter()
        .map(|house| nearest_hospital(house, hospitals).unwrap_or(0))
        .collect()
}
