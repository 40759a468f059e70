// src/simulation/engine.rs

use crate::error::KernelResult;
use crate::model::distribution::EmpiricalDistribution;
use crate::model::frequency::FrequencyTable;
use crate::model::state::{InventoryPhase, SimulationState};
use crate::simulation::config::SimulationConfig;
use crate::strategy::implementations::ContinuousReviewPolicy;
use crate::strategy::traits::ReorderPolicy;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

/// Where the lead time of a new order comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum LeadTimeModel {
    /// Every order takes the same number of days. `Fixed(0)` means the
    /// order lands at the start of the next day.
    Fixed(u32),
    /// Each order draws its lead time from an empirical distribution.
    Sampled(EmpiricalDistribution),
}

impl LeadTimeModel {
    /// Samples from `table` when one is given, otherwise uses `fixed_days`.
    pub fn from_table(table: Option<&FrequencyTable>, fixed_days: u32) -> KernelResult<Self> {
        match table {
            Some(t) => Ok(LeadTimeModel::Sampled(EmpiricalDistribution::from_table(t)?)),
            None => Ok(LeadTimeModel::Fixed(fixed_days)),
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> KernelResult<u32> {
        match self {
            LeadTimeModel::Fixed(days) => Ok(*days),
            LeadTimeModel::Sampled(dist) => dist.sample(rng),
        }
    }
}

/// One row of the per-day trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: u32,
    /// Phase at the start of the day, before any arrival.
    pub phase: InventoryPhase,
    pub arrived: u32,
    pub demand: u32,
    pub lost_sales: u32,
    /// Stock after demand was served.
    pub inventory: u32,
    pub order_placed: u32,
    pub lead_time: Option<u32>,
}

/// Per-day averages of a finished run, plus the totals they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationResult {
    pub average_ending_inventory: f64,
    pub average_lost_sales: f64,
    pub average_orders_per_day: f64,
    pub total_ending_inventory: u64,
    pub total_lost_sales: u64,
    pub orders_placed: u64,
    pub horizon_days: u32,
}

#[derive(Debug, Default)]
struct RunTotals {
    ending_inventory: u64,
    lost_sales: u64,
    orders_placed: u64,
}

/// Day-by-day simulation of a single stock point.
///
/// The simulator itself is never mutated by a run: each call to
/// [`run`](Self::run) builds a fresh [`SimulationState`] and owns it until
/// the result is computed.
#[derive(Debug)]
pub struct InventorySimulator {
    config: SimulationConfig,
    demand: EmpiricalDistribution,
    lead_time: LeadTimeModel,
    policy: Box<dyn ReorderPolicy>,
}

impl InventorySimulator {
    /// Validates the configuration up front; a zero-day horizon is rejected
    /// here rather than surfacing as a division by zero after the loop.
    pub fn new(
        config: SimulationConfig,
        demand: EmpiricalDistribution,
        lead_time: LeadTimeModel,
    ) -> KernelResult<Self> {
        config.validate_horizon()?;
        let policy = Box::new(ContinuousReviewPolicy::from_config(&config));
        Ok(Self {
            config,
            demand,
            lead_time,
            policy,
        })
    }

    /// Replaces the default (s, Q) policy.
    pub fn with_policy(mut self, policy: Box<dyn ReorderPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> KernelResult<SimulationResult> {
        self.simulate(rng, None)
    }

    /// Like [`run`](Self::run), also returning one [`DayRecord`] per day.
    pub fn run_with_trace<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> KernelResult<(SimulationResult, Vec<DayRecord>)> {
        let mut trace = Vec::with_capacity(self.config.horizon_days as usize);
        let result = self.simulate(rng, Some(&mut trace))?;
        Ok((result, trace))
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut trace: Option<&mut Vec<DayRecord>>,
    ) -> KernelResult<SimulationResult> {
        let mut state = SimulationState::new(self.config.starting_inventory);
        let mut totals = RunTotals::default();

        for day in 1..=self.config.horizon_days {
            let record = self.step(day, &mut state, &mut totals, rng)?;
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(record);
            }
        }

        let days = f64::from(self.config.horizon_days);
        let result = SimulationResult {
            average_ending_inventory: totals.ending_inventory as f64 / days,
            average_lost_sales: totals.lost_sales as f64 / days,
            average_orders_per_day: totals.orders_placed as f64 / days,
            total_ending_inventory: totals.ending_inventory,
            total_lost_sales: totals.lost_sales,
            orders_placed: totals.orders_placed,
            horizon_days: self.config.horizon_days,
        };

        info!(
            days = self.config.horizon_days,
            avg_ending_inventory = result.average_ending_inventory,
            avg_lost_sales = result.average_lost_sales,
            orders = result.orders_placed,
            "inventory simulation finished"
        );
        Ok(result)
    }

    fn step<R: Rng + ?Sized>(
        &self,
        day: u32,
        state: &mut SimulationState,
        totals: &mut RunTotals,
        rng: &mut R,
    ) -> KernelResult<DayRecord> {
        let phase = state.phase();

        // =================================================================
        // MORNING: the awaited order lands, then the countdown ticks.
        // The tick is unconditional; its value only matters while awaiting.
        // =================================================================
        let arrived = if phase == InventoryPhase::AwaitingOrder {
            let quantity = state.receive_order();
            if state.phase() == InventoryPhase::Idle {
                debug!(day, quantity, "replenishment order arrived");
            }
            quantity
        } else {
            0
        };
        state.tick();

        // =================================================================
        // DAY: serve demand, divert any shortfall into lost sales.
        // =================================================================
        let demand = self.demand.sample(rng)?;
        let lost_sales = state.fulfil_demand(demand);
        if lost_sales > 0 {
            totals.lost_sales += u64::from(lost_sales);
        } else {
            totals.ending_inventory += u64::from(state.inventory_on_hand);
        }

        // =================================================================
        // EVENING: review stock and reorder. Orders never stack, whatever
        // the policy asks for.
        // =================================================================
        let mut order_placed = 0;
        let mut lead_time = None;
        let requested = if state.awaiting_order {
            None
        } else {
            self.policy
                .calculate_order(state.inventory_on_hand, state.awaiting_order)
        };
        if let Some(quantity) = requested {
            let days = self.lead_time.draw(rng)?;
            state.place_order(quantity, days);
            totals.orders_placed += 1;
            order_placed = quantity;
            lead_time = Some(days);
            debug!(day, quantity, lead_time = days, "replenishment order placed");
        }

        trace!(
            day,
            demand,
            lost_sales,
            inventory = state.inventory_on_hand,
            "day simulated"
        );

        Ok(DayRecord {
            day,
            phase,
            arrived,
            demand,
            lost_sales,
            inventory: state.inventory_on_hand,
            order_placed,
            lead_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn constant_demand(value: u32) -> EmpiricalDistribution {
        EmpiricalDistribution::from_table(&FrequencyTable::from_pairs(&[(value, 1)]).unwrap())
            .unwrap()
    }

    fn config(start: u32, reorder_point: u32, order_quantity: u32, days: u32) -> SimulationConfig {
        SimulationConfig {
            starting_inventory: start,
            reorder_point,
            order_quantity,
            horizon_days: days,
            ..Default::default()
        }
    }

    fn simulator(
        config: SimulationConfig,
        demand: EmpiricalDistribution,
        lead_time: LeadTimeModel,
    ) -> InventorySimulator {
        InventorySimulator::new(config, demand, lead_time).unwrap()
    }

    #[test]
    fn test_zero_horizon_rejected_before_running() {
        let err = InventorySimulator::new(
            config(5, 0, 10, 0),
            constant_demand(1),
            LeadTimeModel::Fixed(0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KernelError::InvalidParameter {
                name: "horizon_days",
                ..
            }
        ));
    }

    #[test]
    fn test_immediate_lead_time_arrives_next_morning() {
        // Start 3, demand 2/day, reorder below 2, Q = 4, lead time 0.
        let sim = simulator(config(3, 2, 4, 4), constant_demand(2), LeadTimeModel::Fixed(0));
        let mut rng = StdRng::seed_from_u64(0);
        let (result, trace) = sim.run_with_trace(&mut rng).unwrap();

        let inventory: Vec<u32> = trace.iter().map(|d| d.inventory).collect();
        let arrived: Vec<u32> = trace.iter().map(|d| d.arrived).collect();
        let orders: Vec<u32> = trace.iter().map(|d| d.order_placed).collect();

        // Day 1: 3-2=1 -> order. Day 2: +4=5, 5-2=3. Day 3: 1 -> order. Day 4: +4, 3.
        assert_eq!(inventory, vec![1, 3, 1, 3]);
        assert_eq!(arrived, vec![0, 4, 0, 4]);
        assert_eq!(orders, vec![4, 0, 4, 0]);
        assert_eq!(result.orders_placed, 2);
        assert_eq!(result.total_ending_inventory, 8);
        assert!((result.average_orders_per_day - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_lead_time_delays_arrival() {
        // Lead time 2: placed on day 1, arrives on the morning of day 4.
        let sim = simulator(config(1, 1, 5, 5), constant_demand(1), LeadTimeModel::Fixed(2));
        let mut rng = StdRng::seed_from_u64(0);
        let (result, trace) = sim.run_with_trace(&mut rng).unwrap();

        let arrived: Vec<u32> = trace.iter().map(|d| d.arrived).collect();
        let lost: Vec<u32> = trace.iter().map(|d| d.lost_sales).collect();

        assert_eq!(arrived, vec![0, 0, 0, 5, 0]);
        assert_eq!(lost, vec![0, 1, 1, 0, 0]);
        assert_eq!(result.orders_placed, 1);
        assert_eq!(result.total_lost_sales, 2);
        assert_eq!(trace[1].phase, InventoryPhase::AwaitingOrder);
    }

    #[test]
    fn test_lost_sales_are_unmet_magnitude() {
        let sim = simulator(config(2, 0, 10, 2), constant_demand(5), LeadTimeModel::Fixed(0));
        let mut rng = StdRng::seed_from_u64(0);
        let result = sim.run(&mut rng).unwrap();

        // Day 1 loses 3, day 2 loses 5.
        assert_eq!(result.total_lost_sales, 8);
        assert!((result.average_lost_sales - 4.0).abs() < 1e-12);
        assert_eq!(result.total_ending_inventory, 0);
    }

    #[derive(Debug)]
    struct NeverOrder;

    impl ReorderPolicy for NeverOrder {
        fn calculate_order(&self, _inventory_on_hand: u32, _awaiting_order: bool) -> Option<u32> {
            None
        }
    }

    #[derive(Debug)]
    struct AlwaysOrder(u32);

    impl ReorderPolicy for AlwaysOrder {
        fn calculate_order(&self, _inventory_on_hand: u32, _awaiting_order: bool) -> Option<u32> {
            Some(self.0)
        }
    }

    #[test]
    fn test_greedy_policy_cannot_stack_orders() {
        // Placed on day 1 with lead time 2, lands on the morning of day 4.
        let sim = simulator(config(0, 0, 5, 4), constant_demand(0), LeadTimeModel::Fixed(2))
            .with_policy(Box::new(AlwaysOrder(5)));
        let mut rng = StdRng::seed_from_u64(0);
        let (result, trace) = sim.run_with_trace(&mut rng).unwrap();

        let orders: Vec<u32> = trace.iter().map(|d| d.order_placed).collect();
        let arrived: Vec<u32> = trace.iter().map(|d| d.arrived).collect();

        assert_eq!(orders, vec![5, 0, 0, 5]);
        assert_eq!(arrived, vec![0, 0, 0, 5]);
        assert_eq!(result.orders_placed, 2);
        assert_eq!(trace[3].inventory, 5);
    }

    #[test]
    fn test_every_order_arrives_under_greedy_policy() {
        let lead = FrequencyTable::from_pairs(&[(0, 1), (2, 1), (5, 1)]).unwrap();
        let lead_time = LeadTimeModel::from_table(Some(&lead), 0).unwrap();
        let sim = simulator(config(0, 0, 7, 120), constant_demand(1), lead_time)
            .with_policy(Box::new(AlwaysOrder(7)));
        let mut rng = StdRng::seed_from_u64(21);
        let (result, trace) = sim.run_with_trace(&mut rng).unwrap();

        let mut due: Option<u32> = None;
        for d in &trace {
            if d.phase == InventoryPhase::AwaitingOrder && d.arrived == 0 {
                assert_eq!(d.lead_time, None, "order stacked on day {}", d.day);
            }
            if let Some(day) = due {
                if day == d.day {
                    assert_eq!(d.arrived, 7, "order due on day {} did not arrive", day);
                    due = None;
                } else {
                    assert_eq!(d.arrived, 0);
                }
            }
            if let Some(lead) = d.lead_time {
                assert!(due.is_none());
                due = Some(d.day + lead + 1);
            }
        }

        let arrivals = trace.iter().filter(|d| d.arrived > 0).count() as u64;
        let outstanding = u64::from(due.is_some());
        assert_eq!(arrivals + outstanding, result.orders_placed);
    }

    #[test]
    fn test_simulator_ignores_sample_count() {
        let cfg = SimulationConfig {
            sample_count: 0,
            ..config(5, 0, 10, 3)
        };
        assert!(InventorySimulator::new(cfg, constant_demand(1), LeadTimeModel::Fixed(0)).is_ok());
    }

    #[test]
    fn test_custom_policy() {
        let sim = simulator(config(0, 100, 10, 30), constant_demand(1), LeadTimeModel::Fixed(0))
            .with_policy(Box::new(NeverOrder));
        let mut rng = StdRng::seed_from_u64(0);
        let result = sim.run(&mut rng).unwrap();
        assert_eq!(result.orders_placed, 0);
        assert_eq!(result.total_lost_sales, 30);
    }

    #[test]
    fn test_sampled_lead_time_is_recorded() {
        let lead = FrequencyTable::from_pairs(&[(3, 1)]).unwrap();
        let lead_time = LeadTimeModel::from_table(Some(&lead), 0).unwrap();
        let sim = simulator(config(0, 1, 5, 3), constant_demand(0), lead_time);
        let mut rng = StdRng::seed_from_u64(0);
        let (_, trace) = sim.run_with_trace(&mut rng).unwrap();
        assert_eq!(trace[0].lead_time, Some(3));
        assert_eq!(trace[1].lead_time, None);
    }

    #[test]
    fn test_lead_time_from_missing_table_is_fixed() {
        assert_eq!(
            LeadTimeModel::from_table(None, 1).unwrap(),
            LeadTimeModel::Fixed(1)
        );
    }
}
