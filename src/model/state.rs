// src/model/state.rs

use serde::Serialize;

/// Whether a replenishment order is in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InventoryPhase {
    Idle,
    AwaitingOrder,
}

/// The state of the stock point for a single simulation run.
///
/// Created with the starting inventory, mutated once per day, dropped when
/// the run ends. Nothing carries over between runs.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub inventory_on_hand: u32,
    /// Counts down every day. Only read while an order is awaited, so it
    /// is allowed to go negative.
    pub days_until_order_arrival: i64,
    pub awaiting_order: bool,
    pub quantity_in_transit: u32,
}

impl SimulationState {
    pub fn new(starting_inventory: u32) -> Self {
        Self {
            inventory_on_hand: starting_inventory,
            days_until_order_arrival: 0,
            awaiting_order: false,
            quantity_in_transit: 0,
        }
    }

    pub fn phase(&self) -> InventoryPhase {
        if self.awaiting_order {
            InventoryPhase::AwaitingOrder
        } else {
            InventoryPhase::Idle
        }
    }

    /// Step 1: the awaited order lands if its countdown has reached zero.
    ///
    /// Returns the quantity received (0 if nothing arrived).
    pub fn receive_order(&mut self) -> u32 {
        if self.awaiting_order && self.days_until_order_arrival == 0 {
            let quantity = self.quantity_in_transit;
            self.inventory_on_hand = self.inventory_on_hand.saturating_add(quantity);
            self.awaiting_order = false;
            self.quantity_in_transit = 0;
            quantity
        } else {
            0
        }
    }

    /// Step 2: the countdown ticks whether or not an order is awaited.
    pub fn tick(&mut self) {
        self.days_until_order_arrival -= 1;
    }

    /// Steps 3-4: serve the day's demand from stock.
    ///
    /// Returns the unmet part of the demand. Stock never goes below zero;
    /// whatever could not be served is lost.
    pub fn fulfil_demand(&mut self, demand: u32) -> u32 {
        if self.inventory_on_hand >= demand {
            self.inventory_on_hand -= demand;
            0
        } else {
            let lost = demand - self.inventory_on_hand;
            self.inventory_on_hand = 0;
            lost
        }
    }

    /// Step 5: an order has been placed and will arrive after `lead_time` days.
    pub fn place_order(&mut self, quantity: u32, lead_time: u32) {
        self.days_until_order_arrival = i64::from(lead_time);
        self.awaiting_order = true;
        self.quantity_in_transit = quantity;
    }
}
