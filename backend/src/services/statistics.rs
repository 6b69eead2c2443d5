//! Small statistical helpers with defined results for degenerate input.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::statistics::Statistics;

/// Arithmetic mean; 0.0 for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Sample standard deviation (n - 1); `None` with fewer than 2 values or a
/// non-finite result.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let std = values.iter().std_dev();
    std.is_finite().then_some(std)
}

/// Pearson's chi-square goodness-of-fit result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
}

/// Goodness of fit of observed against expected counts.
///
/// Pairs with a non-positive expected count are skipped. Returns `None`
/// when fewer than 2 pairs remain or the statistic is not finite.
pub fn chi_square_test(pairs: &[(f64, f64)]) -> Option<ChiSquareTest> {
    let usable: Vec<(f64, f64)> = pairs.iter().copied().filter(|(_, e)| *e > 0.0).collect();
    if usable.len() < 2 {
        return None;
    }

    let statistic: f64 = usable
        .iter()
        .map(|(observed, expected)| (observed - expected).powi(2) / expected)
        .sum();
    if !statistic.is_finite() {
        return None;
    }

    let degrees_of_freedom = usable.len() - 1;
    let distribution = ChiSquared::new(degrees_of_freedom as f64).ok()?;
    let p_value = (1.0 - distribution.cdf(statistic)).clamp(0.0, 1.0);

    Some(ChiSquareTest {
        statistic,
        p_value,
        degrees_of_freedom,
    })
}
