pub mod distribution;
pub mod frequency;
pub mod state;
