// src/strategy/implementations.rs

use crate::simulation::config::SimulationConfig;
use crate::strategy::traits::ReorderPolicy;

/// Continuous-review (s, Q) policy.
///
/// Orders a fixed `order_quantity` as soon as stock drops below
/// `reorder_point`. While an order is in transit no further order is
/// placed, so orders never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuousReviewPolicy {
    reorder_point: u32,
    order_quantity: u32,
}

impl ContinuousReviewPolicy {
    pub fn new(reorder_point: u32, order_quantity: u32) -> Self {
        Self {
            reorder_point,
            order_quantity,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.reorder_point, config.order_quantity)
    }

    pub fn reorder_point(&self) -> u32 {
        self.reorder_point
    }

    pub fn order_quantity(&self) -> u32 {
        self.order_quantity
    }
}

impl ReorderPolicy for ContinuousReviewPolicy {
    fn calculate_order(&self, inventory_on_hand: u32, awaiting_order: bool) -> Option<u32> {
        if inventory_on_hand < self.reorder_point && !awaiting_order {
            Some(self.order_quantity)
        } else {
            None
        }
    }
}
