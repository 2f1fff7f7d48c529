use rand::Rng;

use super::sampling::{cell_to_hospital, random_cell};
use super::types::{Hospital, House};

/// Moves each hospital to the mean of the houses assigned to it.
///
/// A hospital with no houses is re-seeded to a fresh random cell on the
/// `m x m` grid instead of staying put.
///
/// # Arguments
/// * `houses` - Current houses
/// * `clusters` - Hospital index per house, same length as `houses`
/// * `count` - Number of hospitals to produce
/// * `m` - Grid side used for re-seeding
pub fn recompute_hospitals<R: Rng + ?Sized>(
    houses: &[House],
    clusters: &[usize],
    count: usize,
    m: usize,
    rng: &mut R,
) -> Vec<Hospital> {
    let mut sums = vec![[0.0_f64; 2]; count];
    let mut sizes = vec![0_usize; count];

    for (house, &cluster) in houses.iter().zip(clusters) {
        if cluster < count {
            sums[cluster][0] += house[0] as f64;
            sums[cluster][1] += house[1] as f64;
            sizes[cluster] += 1;
        }
    }

    sums.into_iter()
        .zip(sizes)
        .map(|(sum, size)| {
            if size > 0 {
                [sum[0] / size as f64, sum[1] / size as f64]
            } else {
                cell_to_hospital(random_cell(rng, m))
            }
        })
        .collect()
}
