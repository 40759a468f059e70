// src/sampling/sampler.rs

use crate::error::{KernelError, KernelResult};
use rand::Rng;
use rand_distr::{Distribution, OpenClosed01};

/// Draws a uniform value in (0, 1].
pub fn draw_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    OpenClosed01.sample(rng)
}

/// Finds the bucket of `draw` in a cumulative-probability table.
///
/// Returns `i` such that `cumulative[i-1] < draw <= cumulative[i]`, with
/// `cumulative[-1]` taken as 0. When rounding leaves the last cumulative
/// value just under 1 and no bucket matches, the last index is returned.
pub fn find_range_index(cumulative: &[f64], draw: f64) -> KernelResult<usize> {
    if cumulative.is_empty() {
        return Err(KernelError::distribution("cumulative table is empty"));
    }
    // Also rejects NaN.
    if !(draw > 0.0 && draw <= 1.0) {
        return Err(KernelError::OutOfRangeSample { draw });
    }

    let mut lower = 0.0;
    for (i, &upper) in cumulative.iter().enumerate() {
        if draw > lower && draw <= upper {
            return Ok(i);
        }
        lower = upper;
    }
    Ok(cumulative.len() - 1)
}

/// Inverse-transform sample: one uniform draw mapped through `cumulative`
/// to the matching entry of `values`.
pub fn sample_value<R: Rng + ?Sized>(
    values: &[u32],
    cumulative: &[f64],
    rng: &mut R,
) -> KernelResult<u32> {
    if values.len() != cumulative.len() {
        return Err(KernelError::parameter(
            "values",
            format!(
                "{} values for {} cumulative probabilities",
                values.len(),
                cumulative.len()
            ),
        ));
    }
    let index = find_range_index(cumulative, draw_unit(rng))?;
    Ok(values[index])
}
