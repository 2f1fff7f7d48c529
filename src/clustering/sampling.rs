use rand::Rng;

use super::types::{Hospital, House};

/// Uniformly random cell on an `m x m` grid. `m` must be positive.
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, m: usize) -> House {
    [rng.random_range(0..m), rng.random_range(0..m)]
}

/// `n` houses drawn uniformly with replacement, so houses may share a cell.
pub fn random_houses<R: Rng + ?Sized>(rng: &mut R, m: usize, n: usize) -> Vec<House> {
    (0..n).map(|_| random_cell(rng, m)).collect()
}

/// `count` hospitals on integral grid positions, stored as floats.
pub fn random_hospitals<R: Rng + ?Sized>(rng: &mut R, m: usize, count: usize) -> Vec<Hospital> {
    (0..count).map(|_| cell_to_hospital(random_cell(rng, m))).collect()
}

pub fn cell_to_hospital(cell: House) -> Hospital {
    [cell[0] as f64, cell[1] as f64]
}
