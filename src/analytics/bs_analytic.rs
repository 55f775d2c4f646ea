// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! With a continuous dividend yield q the underlying follows
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//! and European options have closed-form prices in terms of Φ(x). These are
//! validation oracles for the Monte Carlo engine; the Asian and barrier
//! pricers never consult them.
//!
//! Argument order everywhere: `(s, k, t, r, sigma, q)`.

use crate::math_utils::{norm_cdf, norm_pdf};
use crate::mc::payoffs::OptionSide;

/// d₁ and d₂
///
/// ```text
/// d₁ = [ln(S/K) + (r - q + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
fn d1_d2(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

fn is_degenerate(t: f64, sigma: f64) -> bool {
    t <= 0.0 || sigma <= 0.0
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C = S e^(-qT) Φ(d₁) - K e^(-rT) Φ(d₂)
/// P = K e^(-rT) Φ(-d₂) - S e^(-qT) Φ(-d₁)
/// ```
///
/// # Edge cases
/// - `t <= 0`: intrinsic value `max(S - K, 0)` / `max(K - S, 0)`
/// - `sigma <= 0`: the deterministic forward against the discounted strike,
///   `max(S e^(-qT) - K e^(-rT), 0)` and its put mirror
pub fn black_scholes(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64, side: OptionSide) -> f64 {
    if t <= 0.0 {
        return side.intrinsic(s, k);
    }
    let forward = s * (-q * t).exp();
    let strike_pv = k * (-r * t).exp();
    if sigma <= 0.0 {
        return side.intrinsic(forward, strike_pv);
    }

    let (d1, d2) = d1_d2(s, k, t, r, sigma, q);
    match side {
        OptionSide::Call => forward * norm_cdf(d1) - strike_pv * norm_cdf(d2),
        OptionSide::Put => strike_pv * norm_cdf(-d2) - forward * norm_cdf(-d1),
    }
}

pub fn bs_call_price(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64) -> f64 {
    black_scholes(s, k, t, r, sigma, q, OptionSide::Call)
}

pub fn bs_put_price(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64) -> f64 {
    black_scholes(s, k, t, r, sigma, q, OptionSide::Put)
}

/// Black-Scholes Delta (∂V/∂S)
///
/// ```text
/// Δ_call = e^(-qT) Φ(d₁)
/// Δ_put  = -e^(-qT) Φ(-d₁)
/// ```
///
/// NaN when `t <= 0` or `sigma <= 0`, as for every analytic Greek here.
pub fn bs_delta(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64, side: OptionSide) -> f64 {
    if is_degenerate(t, sigma) {
        return f64::NAN;
    }
    let (d1, _) = d1_d2(s, k, t, r, sigma, q);
    let carry = (-q * t).exp();
    match side {
        OptionSide::Call => carry * norm_cdf(d1),
        OptionSide::Put => -carry * norm_cdf(-d1),
    }
}

/// Black-Scholes Gamma (∂²V/∂S²), same for calls and puts
///
/// ```text
/// Γ = e^(-qT) φ(d₁) / (S σ √T)
/// ```
pub fn bs_gamma(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64) -> f64 {
    if is_degenerate(t, sigma) {
        return f64::NAN;
    }
    let (d1, _) = d1_d2(s, k, t, r, sigma, q);
    (-q * t).exp() * norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// Black-Scholes Vega (∂V/∂σ), same for calls and puts
///
/// ```text
/// ν = S e^(-qT) φ(d₁) √T
/// ```
///
/// Units: price change per 1.00 of volatility.
pub fn bs_vega(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64) -> f64 {
    if is_degenerate(t, sigma) {
        return f64::NAN;
    }
    let (d1, _) = d1_d2(s, k, t, r, sigma, q);
    s * (-q * t).exp() * norm_pdf(d1) * t.sqrt()
}

/// Black-Scholes Theta (∂V/∂t, calendar time, per year)
///
/// ```text
/// Θ_call = -S e^(-qT) φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂) + q S e^(-qT) Φ(d₁)
/// Θ_put  = -S e^(-qT) φ(d₁) σ / (2√T) + r K e^(-rT) Φ(-d₂) - q S e^(-qT) Φ(-d₁)
/// ```
pub fn bs_theta(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64, side: OptionSide) -> f64 {
    if is_degenerate(t, sigma) {
        return f64::NAN;
    }
    let (d1, d2) = d1_d2(s, k, t, r, sigma, q);
    let forward = s * (-q * t).exp();
    let strike_pv = k * (-r * t).exp();
    let decay = -forward * norm_pdf(d1) * sigma / (2.0 * t.sqrt());
    match side {
        OptionSide::Call => decay - r * strike_pv * norm_cdf(d2) + q * forward * norm_cdf(d1),
        OptionSide::Put => decay + r * strike_pv * norm_cdf(-d2) - q * forward * norm_cdf(-d1),
    }
}

/// Black-Scholes Rho (∂V/∂r)
///
/// ```text
/// ρ_call = K T e^(-rT) Φ(d₂)
/// ρ_put  = -K T e^(-rT) Φ(-d₂)
/// ```
pub fn bs_rho(s: f64, k: f64, t: f64, r: f64, sigma: f64, q: f64, side: OptionSide) -> f64 {
    if is_degenerate(t, sigma) {
        return f64::NAN;
    }
    let (_, d2) = d1_d2(s, k, t, r, sigma, q);
    let strike_pv = k * (-r * t).exp();
    match side {
        OptionSide::Call => t * strike_pv * norm_cdf(d2),
        OptionSide::Put => -t * strike_pv * norm_cdf(-d2),
    }
}
