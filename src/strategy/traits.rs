// src/strategy/traits.rs

use std::fmt::Debug;

/// Decides when the stock point places a replenishment order.
///
/// `Send + Sync` so a simulator can be shared by independent runs on
/// different threads.
pub trait ReorderPolicy: Debug + Send + Sync {
    /// Called at the end of each simulated day, after demand was served.
    ///
    /// # Arguments
    /// * `inventory_on_hand` - Stock left after today's demand.
    /// * `awaiting_order` - Whether an earlier order is still in transit.
    ///
    /// Returns the quantity to order, or `None` to place no order today.
    fn calculate_order(&self, inventory_on_hand: u32, awaiting_order: bool) -> Option<u32>;
}
