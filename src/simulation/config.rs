// src/simulation/config.rs

use crate::error::{KernelError, KernelResult};
use crate::sampling::rng::SeedPolicy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub starting_inventory: u32,
    pub reorder_point: u32,
    pub order_quantity: u32,
    pub horizon_days: u32,
    /// Draws used for the Monte Carlo expectation.
    pub sample_count: usize,
    pub seed: u64,
    pub seed_policy: SeedPolicy,
    /// Lead time used when no lead-time table is supplied.
    pub fixed_lead_time_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_inventory: 5,
            reorder_point: 5,
            order_quantity: 10,
            horizon_days: 10,
            sample_count: 1000,
            seed: 1,
            seed_policy: SeedPolicy::ReseedEachCall,
            fixed_lead_time_days: 0,
        }
    }
}

impl SimulationConfig {
    /// Rejects values the kernel cannot run with.
    pub fn validate(&self) -> KernelResult<()> {
        self.validate_horizon()?;
        if self.sample_count == 0 {
            return Err(KernelError::parameter(
                "sample_count",
                "at least one sample is required",
            ));
        }
        Ok(())
    }

    /// The only check the day-stepper needs: averages divide by the horizon.
    pub fn validate_horizon(&self) -> KernelResult<()> {
        if self.horizon_days == 0 {
            return Err(KernelError::parameter(
                "horizon_days",
                "simulation horizon must be at least one day",
            ));
        }
        Ok(())
    }

    /// Defaults overridden by `INVENTORY_*` environment variables.
    ///
    /// Recognized: `INVENTORY_START`, `INVENTORY_REORDER_POINT`,
    /// `INVENTORY_ORDER_QUANTITY`, `INVENTORY_HORIZON_DAYS`,
    /// `INVENTORY_SAMPLE_COUNT`, `INVENTORY_SEED`, `INVENTORY_SEED_POLICY`,
    /// `INVENTORY_LEAD_TIME_DAYS`. A variable that is set but does not parse
    /// is an error, not a silent fallback.
    pub fn from_env() -> KernelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> KernelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_with(&lookup, "INVENTORY_START", &mut config.starting_inventory)?;
        override_with(&lookup, "INVENTORY_REORDER_POINT", &mut config.reorder_point)?;
        override_with(&lookup, "INVENTORY_ORDER_QUANTITY", &mut config.order_quantity)?;
        override_with(&lookup, "INVENTORY_HORIZON_DAYS", &mut config.horizon_days)?;
        override_with(&lookup, "INVENTORY_SAMPLE_COUNT", &mut config.sample_count)?;
        override_with(&lookup, "INVENTORY_SEED", &mut config.seed)?;
        override_with(&lookup, "INVENTORY_SEED_POLICY", &mut config.seed_policy)?;
        override_with(&lookup, "INVENTORY_LEAD_TIME_DAYS", &mut config.fixed_lead_time_days)?;
        config.validate()?;
        Ok(config)
    }
}

fn override_with<F, T>(lookup: &F, key: &'static str, slot: &mut T) -> KernelResult<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .map_err(|e: T::Err| KernelError::parameter(key, format!("`{raw}`: {e}")))?;
    }
    Ok(())
}
