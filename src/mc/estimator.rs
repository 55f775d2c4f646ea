// src/mc/estimator.rs
//! Reduction of a payoff vector to a price and its standard error.
//!
//! ```text
//! price = (1/n) Σ Y_i
//! SE    = sqrt( Σ (Y_i - price)² / (n - 1) ) / √n
//! ```
//!
//! With `n == 1` the sample variance is undefined and the standard error is
//! NaN; callers detect that with [`PricingResult::has_finite_error`].

use statrs::statistics::Statistics;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Monte Carlo point estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingResult {
    pub price: f64,
    pub std_error: f64,
}

impl PricingResult {
    /// Half-width of the 95% confidence interval, 1.96 × SE.
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    pub fn has_finite_error(&self) -> bool {
        self.std_error.is_finite()
    }
}

pub fn estimate(payoffs: &[f64]) -> PricingResult {
    let n = payoffs.len();
    let price = payoffs.mean();
    let std_error = payoffs.std_dev() / (n as f64).sqrt();
    PricingResult { price, std_error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_all_zero_payoffs() {
        let result = estimate(&[0.0; 1000]);
        assert_eq!(result.price, 0.0);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_known_sample() {
        // mean 2.5, sample variance 5/3
        let result = estimate(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(result.price, 2.5, epsilon = 1e-12);
        assert_relative_eq!(result.std_error, (5.0_f64 / 3.0).sqrt() / 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.confidence_95(), 1.96 * result.std_error);
    }

    #[test]
    fn test_single_sample_has_undefined_error() {
        let result = estimate(&[7.5]);
        assert_eq!(result.price, 7.5);
        assert!(result.std_error.is_nan());
        assert!(!result.has_finite_error());
    }

    proptest! {
        #[test]
        fn prop_constant_vector_has_zero_error(value in 0.0f64..1_000.0, n in 2usize..200) {
            let result = estimate(&vec![value; n]);
            prop_assert!((result.price - value).abs() <= 1e-9 * value.max(1.0));
            prop_assert!(result.std_error.abs() <= 1e-9 * value.max(1.0));
        }

        #[test]
        fn prop_error_is_non_negative(values in prop::collection::vec(0.0f64..100.0, 2..100)) {
            let result = estimate(&values);
            prop_assert!(result.std_error >= 0.0);
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(result.price >= min - 1e-9 && result.price <= max + 1e-9);
        }
    }
}
