//! Monte Carlo simulation of a single stock point under uncertain demand
//! and lead time.
//!
//! Empirical frequency tables become discrete distributions
//! ([`model::distribution`]), which are sampled by inverse transform
//! ([`sampling::sampler`]) to estimate expectations
//! ([`sampling::expectation`]) and to drive a day-by-day continuous-review
//! (s, Q) inventory simulation ([`simulation::engine`]).
//!
//! All randomness is passed in by the caller; see [`sampling::rng`].

pub mod error;
pub mod io;
pub mod model;
pub mod sampling;
pub mod simulation;
pub mod strategy;

pub use error::{KernelError, KernelResult};
pub use model::distribution::EmpiricalDistribution;
pub use model::frequency::{FrequencyRecord, FrequencyTable};
pub use sampling::rng::{RandomSource, SeedPolicy};
pub use simulation::analysis::{analyse_inventory, analyse_inventory_with_trace, InventoryAnalysis};
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{DayRecord, InventorySimulator, LeadTimeModel, SimulationResult};
