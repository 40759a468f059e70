// src/simulation/analysis.rs

//! One call from raw tables and configuration to everything a front end
//! displays: the simulation averages and the expected demand computed
//! both exactly and by sampling.

use crate::error::KernelResult;
use crate::model::distribution::EmpiricalDistribution;
use crate::model::frequency::FrequencyTable;
use crate::sampling::expectation::ExpectationComparison;
use crate::sampling::rng::RandomSource;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::{DayRecord, InventorySimulator, LeadTimeModel, SimulationResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryAnalysis {
    pub simulation: SimulationResult,
    pub demand_expectation: ExpectationComparison,
    /// Only present when lead times are sampled from a table.
    pub lead_time_expectation: Option<ExpectationComparison>,
}

/// Runs the expectation estimates and the inventory simulation.
///
/// Every table and parameter is validated before any sampling starts.
/// Each computation asks `source` for its generator separately, so with
/// [`SeedPolicy::ReseedEachCall`](crate::sampling::rng::SeedPolicy) each
/// one starts from the seed, and with a persistent stream they consume
/// consecutive draws in the order demand, lead time, simulation.
pub fn analyse_inventory(
    config: &SimulationConfig,
    demand: &FrequencyTable,
    lead_time: Option<&FrequencyTable>,
    source: &mut RandomSource,
) -> KernelResult<InventoryAnalysis> {
    analyse(config, demand, lead_time, source, false).map(|(analysis, _)| analysis)
}

/// Same as [`analyse_inventory`], also returning the day trace of the very
/// run the averages were computed from.
pub fn analyse_inventory_with_trace(
    config: &SimulationConfig,
    demand: &FrequencyTable,
    lead_time: Option<&FrequencyTable>,
    source: &mut RandomSource,
) -> KernelResult<(InventoryAnalysis, Vec<DayRecord>)> {
    analyse(config, demand, lead_time, source, true)
}

fn analyse(
    config: &SimulationConfig,
    demand: &FrequencyTable,
    lead_time: Option<&FrequencyTable>,
    source: &mut RandomSource,
    with_trace: bool,
) -> KernelResult<(InventoryAnalysis, Vec<DayRecord>)> {
    config.validate()?;
    let demand = EmpiricalDistribution::from_table(demand)?;
    let lead_time = LeadTimeModel::from_table(lead_time, config.fixed_lead_time_days)?;

    let demand_expectation = compare_expectations(&demand, config.sample_count, source)?;
    let lead_time_expectation = match &lead_time {
        LeadTimeModel::Sampled(dist) => {
            Some(compare_expectations(dist, config.sample_count, source)?)
        }
        LeadTimeModel::Fixed(_) => None,
    };

    let simulator = InventorySimulator::new(config.clone(), demand, lead_time)?;
    let (simulation, trace) = if with_trace {
        simulator.run_with_trace(source.rng())?
    } else {
        (simulator.run(source.rng())?, Vec::new())
    };

    let analysis = InventoryAnalysis {
        simulation,
        demand_expectation,
        lead_time_expectation,
    };
    Ok((analysis, trace))
}

fn compare_expectations(
    dist: &EmpiricalDistribution,
    sample_count: usize,
    source: &mut RandomSource,
) -> KernelResult<ExpectationComparison> {
    let monte_carlo = dist.sample_mean(sample_count, source.rng())?;
    Ok(ExpectationComparison {
        closed_form: dist.expected_value(),
        monte_carlo,
        sample_count,
    })
}
