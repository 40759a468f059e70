// src/model/distribution.rs

use crate::error::{KernelError, KernelResult};
use crate::model::frequency::{FrequencyRecord, FrequencyTable, DEFAULT_MAX_RECORDS};
use crate::sampling::expectation::monte_carlo_average;
use crate::sampling::sampler::sample_value;
use rand::Rng;

/// Tolerance used when checking that cumulative probabilities end at 1.
pub const CUMULATIVE_TOLERANCE: f64 = 1e-6;

/// A discrete distribution derived from a frequency table.
///
/// Read-only: when the table changes, build a new distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    values: Vec<u32>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl EmpiricalDistribution {
    /// Normalizes a frequency table into probability and cumulative tables.
    ///
    /// The total is summed as an exact integer before any division.
    /// Fails if the table is empty or every frequency is zero.
    /// The table's own bound is enforced by [`FrequencyTable::push`].
    pub fn from_table(table: &FrequencyTable) -> KernelResult<Self> {
        Self::build(table.records())
    }

    /// Same as [`from_table`](Self::from_table) for a raw slice of records,
    /// checked against [`DEFAULT_MAX_RECORDS`].
    pub fn from_records(records: &[FrequencyRecord]) -> KernelResult<Self> {
        if records.len() > DEFAULT_MAX_RECORDS {
            return Err(KernelError::parameter(
                "frequency_table",
                format!(
                    "{} records exceeds the bound of {}",
                    records.len(),
                    DEFAULT_MAX_RECORDS
                ),
            ));
        }
        Self::build(records)
    }

    fn build(records: &[FrequencyRecord]) -> KernelResult<Self> {
        if records.is_empty() {
            return Err(KernelError::distribution("frequency table is empty"));
        }

        let total: u64 = records.iter().map(|r| u64::from(r.frequency)).sum();
        if total == 0 {
            return Err(KernelError::distribution("total frequency is zero"));
        }

        let total = total as f64;
        let mut values = Vec::with_capacity(records.len());
        let mut probabilities = Vec::with_capacity(records.len());
        let mut cumulative = Vec::with_capacity(records.len());

        let mut running = 0.0;
        for record in records {
            let p = f64::from(record.frequency) / total;
            running += p;
            values.push(record.value);
            probabilities.push(p);
            cumulative.push(running);
        }

        Ok(Self {
            values,
            probabilities,
            cumulative,
        })
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: an empty table never produces a distribution.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Draws one value by inverse-transform sampling.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> KernelResult<u32> {
        sample_value(&self.values, &self.cumulative, rng)
    }

    /// Exact expectation, Σ value·probability.
    pub fn expected_value(&self) -> f64 {
        self.values
            .iter()
            .zip(&self.probabilities)
            .map(|(&v, &p)| f64::from(v) * p)
            .sum()
    }

    /// Monte Carlo estimate of the expectation from `sample_count` draws.
    pub fn sample_mean<R: Rng + ?Sized>(
        &self,
        sample_count: usize,
        rng: &mut R,
    ) -> KernelResult<f64> {
        monte_carlo_average(&self.values, &self.cumulative, sample_count, rng)
    }
}
