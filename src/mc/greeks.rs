// src/mc/greeks.rs
//! Finite-difference Greeks by full re-simulation
//!
//! Every bumped price re-runs simulation, payoff evaluation and estimation
//! with the *same* [`SimulationConfig`]. Because the normal draws depend only
//! on the seed, the family offset and the pair index, each bumped run reuses
//! the base run's draws (common random numbers). The remaining error is the
//! finite-difference truncation plus the Monte Carlo noise of the difference.
//!
//! # Bumps
//!
//! | Greek | Scheme                      | Bump         | Floor on the down leg |
//! |-------|-----------------------------|--------------|-----------------------|
//! | Delta | central                     | 1% of S0     | -                     |
//! | Gamma | central second difference   | 1% of S0     | -                     |
//! | Theta | backward in maturity        | 1/365 years  | T = 0.001             |
//! | Vega  | central                     | 0.01         | σ = 0.001             |
//! | Rho   | central                     | 1 bp         | r = 0                 |
//!
//! ```text
//! Θ = -(P(T) - P(max(T - ΔT, 0.001))) / ΔT
//! ν = (P(σ + Δσ) - P(max(σ - Δσ, 0.001))) / (2Δσ)
//! ρ = (P(r + Δr) - P(max(r - Δr, 0))) / (2Δr)
//! ```
//!
//! A floored leg is evaluated at the floor, even when the floor lies above
//! the base value; the divisor is always the nominal bump.

use crate::error::McResult;
use crate::mc::config::{MarketParameters, SimulationConfig};
use crate::mc::mc_engine::{check_inputs, price_option_quiet, OptionPrices};
use crate::mc::payoffs::Payoff;
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const SPOT_BUMP_FRACTION: f64 = 0.01;
pub const VOL_BUMP: f64 = 0.01;
pub const RATE_BUMP: f64 = 1e-4;
pub const TIME_BUMP: f64 = 1.0 / 365.0;

pub const MIN_MATURITY: f64 = 0.001;
pub const MIN_VOLATILITY: f64 = 0.001;
pub const MIN_RATE: f64 = 0.0;

bitflags! {
    /// Which sensitivities to compute.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreekSet: u32 {
        const DELTA = 1 << 0;
        const GAMMA = 1 << 1;
        const THETA = 1 << 2;
        const VEGA  = 1 << 3;
        const RHO   = 1 << 4;
        const ALL = Self::DELTA.bits()
            | Self::GAMMA.bits()
            | Self::THETA.bits()
            | Self::VEGA.bits()
            | Self::RHO.bits();
    }
}

/// Sensitivities of one option side. Greeks that were not requested are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl Default for Greeks {
    fn default() -> Self {
        Greeks {
            delta: f64::NAN,
            gamma: f64::NAN,
            theta: f64::NAN,
            vega: f64::NAN,
            rho: f64::NAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GreeksResult {
    pub call: Greeks,
    pub put: Greeks,
}

/// Down and up evaluation points around a base value.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bump {
    down: f64,
    up: f64,
}

impl Bump {
    /// `base ± h`, with the down leg clamped to `floor`.
    fn floored(base: f64, h: f64, floor: f64) -> Self {
        Bump {
            down: (base - h).max(floor),
            up: base + h,
        }
    }
}

/// (call, put) slope between two priced scenarios.
fn slope(high: &OptionPrices, low: &OptionPrices, width: f64) -> (f64, f64) {
    (
        (high.call_price() - low.call_price()) / width,
        (high.put_price() - low.put_price()) / width,
    )
}

/// European Greeks with the default bumps.
pub fn compute_greeks(
    params: &MarketParameters,
    config: &SimulationConfig,
) -> McResult<GreeksResult> {
    compute_greeks_for(&Payoff::European, params, config, GreekSet::ALL)
}

/// Finite-difference Greeks of any supported payoff.
///
/// Delta, gamma and theta share the base-case price, so the full set costs
/// eight pricing runs.
pub fn compute_greeks_for(
    payoff: &Payoff,
    params: &MarketParameters,
    config: &SimulationConfig,
    which: GreekSet,
) -> McResult<GreeksResult> {
    for warning in check_inputs(payoff, params, config)? {
        tracing::warn!(family = payoff.family().name(), "{}", warning);
    }

    let price_at = |bumped: MarketParameters, label: &str| -> McResult<OptionPrices> {
        tracing::trace!(scenario = label, ?bumped, "bumped pricing run");
        price_option_quiet(payoff, &bumped, config)
    };

    let mut result = GreeksResult::default();
    let base = price_at(*params, "base")?;

    if which.intersects(GreekSet::DELTA | GreekSet::GAMMA) {
        let h = SPOT_BUMP_FRACTION * params.s0;
        let up = price_at(params.with_spot(params.s0 + h), "spot up")?;
        let down = price_at(params.with_spot(params.s0 - h), "spot down")?;

        if which.contains(GreekSet::DELTA) {
            let (call, put) = slope(&up, &down, 2.0 * h);
            result.call.delta = call;
            result.put.delta = put;
        }
        if which.contains(GreekSet::GAMMA) {
            let curvature = |u: f64, c: f64, d: f64| (u - 2.0 * c + d) / (h * h);
            result.call.gamma =
                curvature(up.call_price(), base.call_price(), down.call_price());
            result.put.gamma = curvature(up.put_price(), base.put_price(), down.put_price());
        }
    }

    if which.contains(GreekSet::THETA) {
        let bump = Bump::floored(params.t, TIME_BUMP, MIN_MATURITY);
        let shorter = price_at(params.with_maturity(bump.down), "maturity down")?;
        let (call, put) = slope(&base, &shorter, TIME_BUMP);
        result.call.theta = -call;
        result.put.theta = -put;
    }

    if which.contains(GreekSet::VEGA) {
        let bump = Bump::floored(params.sigma, VOL_BUMP, MIN_VOLATILITY);
        let up = price_at(params.with_volatility(bump.up), "vol up")?;
        let down = price_at(params.with_volatility(bump.down), "vol down")?;
        let (call, put) = slope(&up, &down, 2.0 * VOL_BUMP);
        result.call.vega = call;
        result.put.vega = put;
    }

    if which.contains(GreekSet::RHO) {
        let bump = Bump::floored(params.r, RATE_BUMP, MIN_RATE);
        let up = price_at(params.with_rate(bump.up), "rate up")?;
        let down = price_at(params.with_rate(bump.down), "rate down")?;
        let (call, put) = slope(&up, &down, 2.0 * RATE_BUMP);
        result.call.rho = call;
        result.put.rho = put;
    }

    tracing::debug!(
        family = payoff.family().name(),
        call_delta = result.call.delta,
        call_vega = result.call.vega,
        "computed finite-difference greeks"
    );
    Ok(result)
}
