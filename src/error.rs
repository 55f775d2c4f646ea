// src/error.rs
use std::fmt;
use thiserror::Error;

/// Errors raised by the pricing engine.
///
/// Every variant means "bad input": the engine is pure and deterministic, so
/// nothing here is transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// Invalid market parameter value
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid simulation configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Numerical failure while building or reducing the path grid
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for pricing operations
pub type McResult<T> = Result<T, McError>;

/// Non-fatal conditions attached to a pricing result.
///
/// The computation still runs under the documented edge-case policy; callers
/// decide whether the numbers are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainWarning {
    /// Down-and-out barrier at or above spot: every path knocks out at t = 0.
    BarrierAtOrAboveSpot { barrier: f64, spot: f64 },
    /// Zero volatility: paths follow the drift deterministically.
    ZeroVolatility,
    /// Zero maturity: the ensemble collapses to the spot price.
    ZeroMaturity,
    /// A single path leaves the standard error undefined (NaN).
    UndefinedStandardError { paths: usize },
}

impl fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainWarning::BarrierAtOrAboveSpot { barrier, spot } => write!(
                f,
                "barrier {} is at or above spot {}: option knocks out immediately",
                barrier, spot
            ),
            DomainWarning::ZeroVolatility => {
                write!(f, "zero volatility: paths are deterministic")
            }
            DomainWarning::ZeroMaturity => {
                write!(f, "zero maturity: ensemble collapses to the spot price")
            }
            DomainWarning::UndefinedStandardError { paths } => write!(
                f,
                "standard error is undefined with {} simulated path(s)",
                paths
            ),
        }
    }
}

/// Validation utilities
pub mod validation {
    use super::{McError, McResult};

    pub const MAX_PATHS: usize = 1_000_000_000;
    pub const MAX_STEPS: usize = 100_000;

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> McResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(McError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> McResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(McError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> McResult<()> {
        if !value.is_finite() {
            Err(McError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> McResult<()> {
        if paths == 0 {
            Err(McError::InvalidConfiguration {
                field: "num_paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > MAX_PATHS {
            Err(McError::InvalidConfiguration {
                field: "num_paths".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> McResult<()> {
        if steps == 0 {
            Err(McError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > MAX_STEPS {
            Err(McError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
