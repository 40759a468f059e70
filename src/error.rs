// src/error.rs

/// Errors raised by the simulation kernel.
///
/// Every variant is detected synchronously where the computation happens.
/// Nothing is defaulted or silently recovered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// Empty frequency table, or a table whose frequencies sum to zero.
    #[error("invalid distribution: {reason}")]
    InvalidDistribution { reason: String },

    /// A scalar or size argument outside its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A uniform draw outside (0, 1] reached the sampler.
    #[error("uniform draw {draw} is outside (0, 1]")]
    OutOfRangeSample { draw: f64 },
}

impl KernelError {
    pub(crate) fn distribution(reason: impl Into<String>) -> Self {
        KernelError::InvalidDistribution {
            reason: reason.into(),
        }
    }

    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        KernelError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type KernelResult<T> = Result<T, KernelError>;
