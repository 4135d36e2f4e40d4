//! Synthetic problem generation for speed tests.
//!
//! Entries of both `X` and `y` are independent draws from `U(-1, 1)`, which
//! gives a full-rank, well-conditioned design with overwhelming probability.

use std::time::Instant;

use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Problems smaller than this many entries are dumped at debug level.
const DUMP_LIMIT: usize = 1000;

/// A randomly populated design matrix and response.
#[derive(Debug, Clone)]
pub struct SpeedTestData {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

/// Generate an `n × m` design matrix and a length-`n` response.
///
/// Dimensions are not checked here; the solver's shape validation rejects
/// unsolvable sizes the same way it does for file input.
pub fn generate_speed_test(m: usize, n: usize, seed: Option<u64>) -> SpeedTestData {
    let start = Instant::now();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let unit = Uniform::new_inclusive(-1.0, 1.0);

    let x = DMatrix::from_fn(n, m, |_, _| unit.sample(&mut rng));
    let y = DVector::from_fn(n, |_, _| unit.sample(&mut rng));

    if n * m < DUMP_LIMIT {
        debug!("speed test design matrix:{x}");
        debug!("speed test response:{y}");
    }
    info!(
        "generated speed test data (n={n} m={m}) in {:.6}s",
        start.elapsed().as_secs_f64()
    );

    SpeedTestData { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_follow_arguments() {
        let data = generate_speed_test(3, 20, Some(1));
        assert_eq!(data.x.shape(), (20, 3));
        assert_eq!(data.y.len(), 20);
    }

    #[test]
    fn values_lie_in_unit_interval() {
        let data = generate_speed_test(4, 50, Some(2));
        assert!(data.x.iter().chain(data.y.iter()).all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_speed_test(2, 10, Some(99));
        let b = generate_speed_test(2, 10, Some(99));
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
    }
}
