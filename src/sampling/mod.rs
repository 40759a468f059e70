pub mod expectation;
pub mod rng;
pub mod sampler;
