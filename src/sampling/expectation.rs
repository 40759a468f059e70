// src/sampling/expectation.rs

use crate::error::{KernelError, KernelResult};
use crate::sampling::sampler::sample_value;
use rand::Rng;
use serde::Serialize;

/// Exact expectation of a discrete distribution: Σ value·probability.
pub fn closed_form_expectation(values: &[u32], probabilities: &[f64]) -> KernelResult<f64> {
    if values.len() != probabilities.len() {
        return Err(KernelError::parameter(
            "probabilities",
            format!(
                "{} values for {} probabilities",
                values.len(),
                probabilities.len()
            ),
        ));
    }
    Ok(values
        .iter()
        .zip(probabilities)
        .map(|(&v, &p)| f64::from(v) * p)
        .sum())
}

/// Sample-average estimate of the expectation from `sample_count`
/// inverse-transform draws.
pub fn monte_carlo_average<R: Rng + ?Sized>(
    values: &[u32],
    cumulative: &[f64],
    sample_count: usize,
    rng: &mut R,
) -> KernelResult<f64> {
    if sample_count == 0 {
        return Err(KernelError::parameter(
            "sample_count",
            "at least one sample is required",
        ));
    }

    // u128 holds usize::MAX draws of u32::MAX without overflow.
    let mut sum: u128 = 0;
    for _ in 0..sample_count {
        sum += u128::from(sample_value(values, cumulative, rng)?);
    }
    Ok(sum as f64 / sample_count as f64)
}

/// Closed-form and Monte Carlo expectations side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectationComparison {
    pub closed_form: f64,
    pub monte_carlo: f64,
    pub sample_count: usize,
}

impl ExpectationComparison {
    pub fn absolute_error(&self) -> f64 {
        (self.monte_carlo - self.closed_form).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_closed_form() {
        let e = closed_form_expectation(&[1, 2, 3], &[0.2, 0.3, 0.5]).unwrap();
        assert!((e - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_closed_form_length_mismatch() {
        assert!(closed_form_expectation(&[1, 2], &[1.0]).is_err());
    }

    #[test]
    fn test_zero_samples_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = monte_carlo_average(&[1], &[1.0], 0, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            KernelError::InvalidParameter {
                name: "sample_count",
                ..
            }
        ));
    }

    #[test]
    fn test_single_point_distribution_is_exact() {
        let mut rng = StdRng::seed_from_u64(3);
        let avg = monte_carlo_average(&[7], &[1.0], 25, &mut rng).unwrap();
        assert_eq!(avg, 7.0);
    }

    #[test]
    fn test_large_values_average_exactly() {
        let mut rng = StdRng::seed_from_u64(5);
        let avg = monte_carlo_average(&[u32::MAX], &[1.0], 10_000, &mut rng).unwrap();
        assert_eq!(avg, f64::from(u32::MAX));
    }

    #[test]
    fn test_converges_to_closed_form() {
        let values = [1, 2, 3];
        let cumulative = [1.0 / 3.0, 2.0 / 3.0, 1.0];
        let mut rng = StdRng::seed_from_u64(42);

        let avg = monte_carlo_average(&values, &cumulative, 100_000, &mut rng).unwrap();
        assert!((avg - 2.0).abs() < 0.02, "average {avg} too far from 2.0");
    }

    #[test]
    fn test_absolute_error() {
        let cmp = ExpectationComparison {
            closed_form: 2.0,
            monte_carlo: 1.9,
            sample_count: 10,
        };
        assert!((cmp.absolute_error() - 0.1).abs() < 1e-12);
    }
}
