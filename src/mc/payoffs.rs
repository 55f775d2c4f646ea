//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! ## European Options
//! - **Call**: max(S_T - K, 0)
//! - **Put**: max(K - S_T, 0)
//!
//! ## Path-Dependent Options
//! - **Asian**: arithmetic average over every observation, S_0 included
//! - **Down-and-out barrier**: European payoff unless min(S_t) <= H
//!
//! # Implementation Notes
//!
//! Payoffs are evaluated on [`PathSummary`] values, so the same code serves
//! a materialised [`PathEnsemble`] and the streaming pricer. Vectors returned
//! by [`Payoff::evaluate`] are already discounted by e^(-rT).

use crate::mc::config::MarketParameters;
use crate::mc::simulator::{PathEnsemble, PathSummary};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    pub const BOTH: [OptionSide; 2] = [OptionSide::Call, OptionSide::Put];

    #[inline]
    pub fn intrinsic(self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionSide::Call => (underlying - strike).max(0.0),
            OptionSide::Put => (strike - underlying).max(0.0),
        }
    }
}

/// Instrument families. Each family draws from its own offset of the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InstrumentFamily {
    European,
    Asian,
    Barrier,
}

impl InstrumentFamily {
    pub const fn seed_offset(self) -> u64 {
        match self {
            InstrumentFamily::European => 0,
            InstrumentFamily::Asian => 1,
            InstrumentFamily::Barrier => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            InstrumentFamily::European => "european",
            InstrumentFamily::Asian => "asian",
            InstrumentFamily::Barrier => "barrier",
        }
    }
}

/// Supported payoff types
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Payoff {
    /// Terminal price only
    European,
    /// Arithmetic average of the whole path
    Asian,
    /// Knocked out once the path touches or falls below `barrier`
    DownAndOut { barrier: f64 },
}

/// Discounted payoffs, one entry per simulated path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayoffVectors {
    pub call: Vec<f64>,
    pub put: Vec<f64>,
}

impl PayoffVectors {
    pub fn side(&self, side: OptionSide) -> &[f64] {
        match side {
            OptionSide::Call => &self.call,
            OptionSide::Put => &self.put,
        }
    }
}

/// Side-channel statistics of an evaluation. Not used for pricing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayoffDiagnostics {
    /// Range of simulated terminal prices
    FinalPriceRange { min: f64, max: f64 },
    /// Range of realised path averages
    AverageRange { min: f64, max: f64 },
    /// Knock-out statistics of a barrier evaluation
    KnockOuts { knocked_out: usize, survival_rate: f64 },
}

impl Payoff {
    pub fn family(&self) -> InstrumentFamily {
        match self {
            Payoff::European => InstrumentFamily::European,
            Payoff::Asian => InstrumentFamily::Asian,
            Payoff::DownAndOut { .. } => InstrumentFamily::Barrier,
        }
    }

    /// The path statistic the payoff settles on.
    #[inline]
    fn underlying(&self, summary: &PathSummary) -> f64 {
        match self {
            Payoff::Asian => summary.average,
            Payoff::European | Payoff::DownAndOut { .. } => summary.terminal,
        }
    }

    #[inline]
    pub fn is_knocked_out(&self, summary: &PathSummary) -> bool {
        match self {
            Payoff::DownAndOut { barrier } => summary.minimum <= *barrier,
            Payoff::European | Payoff::Asian => false,
        }
    }

    /// Undiscounted payoff of one path.
    pub fn calculate(&self, summary: &PathSummary, strike: f64, side: OptionSide) -> f64 {
        if self.is_knocked_out(summary) {
            0.0
        } else {
            side.intrinsic(self.underlying(summary), strike)
        }
    }

    /// Undiscounted payoff of a price path `[S_0, S_1, ..., S_T]`.
    pub fn calculate_path(&self, path: &[f64], strike: f64, side: OptionSide) -> f64 {
        self.calculate(&PathSummary::from_prices(path.iter().copied()), strike, side)
    }

    /// Discounted call and put payoffs for every column of `ensemble`.
    pub fn evaluate(&self, ensemble: &PathEnsemble, params: &MarketParameters) -> PayoffVectors {
        self.evaluate_summaries(&ensemble.summaries(), params)
    }

    pub fn evaluate_summaries(
        &self,
        summaries: &[PathSummary],
        params: &MarketParameters,
    ) -> PayoffVectors {
        let discount = params.discount_factor();
        let discounted = |side: OptionSide| -> Vec<f64> {
            summaries
                .iter()
                .map(|summary| discount * self.calculate(summary, params.k, side))
                .collect()
        };
        PayoffVectors {
            call: discounted(OptionSide::Call),
            put: discounted(OptionSide::Put),
        }
    }

    pub fn diagnostics(&self, summaries: &[PathSummary]) -> PayoffDiagnostics {
        match self {
            Payoff::European => {
                let (min, max) = range(summaries.iter().map(|s| s.terminal));
                PayoffDiagnostics::FinalPriceRange { min, max }
            }
            Payoff::Asian => {
                let (min, max) = range(summaries.iter().map(|s| s.average));
                PayoffDiagnostics::AverageRange { min, max }
            }
            Payoff::DownAndOut { .. } => {
                let knocked_out = summaries.iter().filter(|s| self.is_knocked_out(s)).count();
                let survival_rate = if summaries.is_empty() {
                    f64::NAN
                } else {
                    (summaries.len() - knocked_out) as f64 / summaries.len() as f64
                };
                PayoffDiagnostics::KnockOuts {
                    knocked_out,
                    survival_rate,
                }
            }
        }
    }
}

fn range<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    })
}
