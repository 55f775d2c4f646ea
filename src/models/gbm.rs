// src/models/gbm.rs
//! Geometric Brownian motion under the risk-neutral measure with a
//! continuous dividend yield:
//!
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! S_{t+dt} = S_t * exp((r - q - σ²/2)dt + σ√dt * Z)
//! ```
//!
//! The step is the exact solution over `dt`, so there is no discretization
//! bias at the observation dates.

use crate::mc::config::MarketParameters;

/// Per-step coefficients of the exact log-space GBM update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl Gbm {
    pub fn new(r: f64, q: f64, sigma: f64, dt: f64) -> Self {
        Gbm {
            drift_dt: (r - q - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        }
    }

    pub fn from_market(params: &MarketParameters, dt: f64) -> Self {
        Self::new(params.r, params.q, params.sigma, dt)
    }

    #[inline]
    pub fn log_increment(&self, normal_draw: f64) -> f64 {
        self.drift_dt + self.vol_sqrt_dt * normal_draw
    }

    #[inline]
    pub fn exact_step(&self, s_t: f64, normal_draw: f64) -> f64 {
        s_t * self.log_increment(normal_draw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_vol_is_pure_drift() {
        let gbm = Gbm::new(0.05, 0.01, 0.0, 0.5);
        let s1 = gbm.exact_step(100.0, 3.0);
        assert_relative_eq!(s1, 100.0 * (0.04_f64 * 0.5).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_mirrored_draws_share_drift() {
        let gbm = Gbm::new(0.05, 0.0, 0.2, 1.0 / 252.0);
        let up = gbm.log_increment(1.3);
        let down = gbm.log_increment(-1.3);
        assert_relative_eq!(0.5 * (up + down), gbm.log_increment(0.0), epsilon = 1e-15);
    }
}
