// src/mc/config.rs
//! Market inputs and simulation settings.
//!
//! Both records are small `Copy` values. Sensitivity analysis never mutates a
//! record in place; it derives a bumped copy through the `with_*` builders.

use crate::error::{validation::*, McResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scalar market inputs for a single pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarketParameters {
    /// Spot price
    pub s0: f64,
    /// Strike
    pub k: f64,
    /// Time to maturity in years
    pub t: f64,
    /// Continuously compounded risk-free rate
    pub r: f64,
    /// Annualized volatility
    pub sigma: f64,
    /// Continuous dividend yield
    pub q: f64,
}

impl MarketParameters {
    pub fn new(s0: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64) -> Self {
        MarketParameters {
            s0,
            k,
            t,
            r,
            sigma,
            q,
        }
    }

    pub fn validate(&self) -> McResult<()> {
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_non_negative("t", self.t)?;
        validate_finite("r", self.r)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("q", self.q)?;
        Ok(())
    }

    pub fn with_spot(self, s0: f64) -> Self {
        MarketParameters { s0, ..self }
    }

    pub fn with_strike(self, k: f64) -> Self {
        MarketParameters { k, ..self }
    }

    pub fn with_maturity(self, t: f64) -> Self {
        MarketParameters { t, ..self }
    }

    pub fn with_rate(self, r: f64) -> Self {
        MarketParameters { r, ..self }
    }

    pub fn with_volatility(self, sigma: f64) -> Self {
        MarketParameters { sigma, ..self }
    }

    pub fn with_dividend_yield(self, q: f64) -> Self {
        MarketParameters { q, ..self }
    }

    /// e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }
}

impl Default for MarketParameters {
    fn default() -> Self {
        MarketParameters {
            s0: 100.0,
            k: 100.0,
            t: 1.0,
            r: 0.05,
            sigma: 0.2,
            q: 0.0,
        }
    }
}

/// Path count, time discretization and seed.
///
/// Identical configs and parameters always reproduce identical paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    pub num_paths: usize,
    pub num_steps: usize,
    pub seed: u64,
}

impl SimulationConfig {
    pub fn new(num_paths: usize, num_steps: usize, seed: u64) -> Self {
        SimulationConfig {
            num_paths,
            num_steps,
            seed,
        }
    }

    pub fn validate(&self) -> McResult<()> {
        validate_paths(self.num_paths)?;
        validate_steps(self.num_steps)?;
        Ok(())
    }

    /// Number of independent normal draws per step.
    pub fn num_pairs(&self) -> usize {
        self.num_paths / 2 + self.num_paths % 2
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_paths: 100_000,
            num_steps: 252,
            seed: 12345,
        }
    }
}
