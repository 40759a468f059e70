// src/model/frequency.rs

use crate::error::{KernelError, KernelResult};
use serde::{Deserialize, Serialize};

/// Default bound on the number of records a table may hold.
pub const DEFAULT_MAX_RECORDS: usize = 32;

/// Frequency given to records created with [`FrequencyTable::with_default_records`].
pub const DEFAULT_FREQUENCY: u32 = 10;

/// One observed value and how often it was seen.
///
/// `value` is a demand level or a lead time in days. A frequency of 0 is
/// legal and simply contributes no probability mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub value: u32,
    pub frequency: u32,
}

impl FrequencyRecord {
    pub fn new(value: u32, frequency: u32) -> Self {
        Self { value, frequency }
    }
}

/// An ordered table of frequency records with an explicit capacity bound.
///
/// Order is kept as inserted: cumulative probabilities are accumulated in
/// table order, so the table does not need to be sorted by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    records: Vec<FrequencyRecord>,
    max_records: usize,
}

impl FrequencyTable {
    /// Creates an empty table bounded by [`DEFAULT_MAX_RECORDS`].
    pub fn new() -> Self {
        Self::with_max_records(DEFAULT_MAX_RECORDS)
    }

    pub fn with_max_records(max_records: usize) -> Self {
        Self {
            records: Vec::new(),
            max_records,
        }
    }

    /// Builds a table from `(value, frequency)` pairs, rejecting it if it
    /// exceeds the default bound.
    pub fn from_pairs(pairs: &[(u32, u32)]) -> KernelResult<Self> {
        let mut table = Self::new();
        for &(value, frequency) in pairs {
            table.push(FrequencyRecord::new(value, frequency))?;
        }
        Ok(table)
    }

    /// Builds `count` records where record `i` has value `i` and the given
    /// frequency. This is the starting table a user gets by adding rows one
    /// at a time without editing them.
    pub fn with_default_records(count: usize, frequency: u32) -> KernelResult<Self> {
        let mut table = Self::new();
        for i in 0..count {
            let value = u32::try_from(i)
                .map_err(|_| KernelError::parameter("count", format!("{count} records")))?;
            table.push(FrequencyRecord::new(value, frequency))?;
        }
        Ok(table)
    }

    /// Appends a record, failing once the capacity bound is reached.
    pub fn push(&mut self, record: FrequencyRecord) -> KernelResult<()> {
        if self.records.len() >= self.max_records {
            return Err(KernelError::parameter(
                "frequency_table",
                format!("table is full ({} records max)", self.max_records),
            ));
        }
        self.records.push(record);
        Ok(())
    }

    /// Mutable access to one record, for editing a table in place.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut FrequencyRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[FrequencyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Exact integer sum of all frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.frequency)).sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
