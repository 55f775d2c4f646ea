// src/mc/mc_engine.rs
use crate::error::{validation::*, DomainWarning, McResult};
use crate::mc::config::{MarketParameters, SimulationConfig};
use crate::mc::estimator::{estimate, PricingResult};
use crate::mc::payoffs::{OptionSide, Payoff, PayoffDiagnostics};
use crate::mc::simulator::{PathEnsemble, PathSimulator};

/// Call and put estimates of one instrument on one ensemble.
#[derive(Debug, Clone)]
pub struct OptionPrices {
    pub call: PricingResult,
    pub put: PricingResult,
    pub diagnostics: PayoffDiagnostics,
    pub warnings: Vec<DomainWarning>,
    /// The simulated grid, when requested
    pub ensemble: Option<PathEnsemble>,
}

impl OptionPrices {
    pub fn call_price(&self) -> f64 {
        self.call.price
    }

    pub fn put_price(&self) -> f64 {
        self.put.price
    }

    pub fn call_std_err(&self) -> f64 {
        self.call.std_error
    }

    pub fn put_std_err(&self) -> f64 {
        self.put.std_error
    }

    pub fn side(&self, side: OptionSide) -> &PricingResult {
        match side {
            OptionSide::Call => &self.call,
            OptionSide::Put => &self.put,
        }
    }
}

/// Validates the inputs of a pricing call and lists its non-fatal conditions.
pub fn check_inputs(
    payoff: &Payoff,
    params: &MarketParameters,
    config: &SimulationConfig,
) -> McResult<Vec<DomainWarning>> {
    params.validate()?;
    config.validate()?;

    let mut warnings = Vec::new();
    if let Payoff::DownAndOut { barrier } = *payoff {
        validate_non_negative("barrier", barrier)?;
        if barrier >= params.s0 {
            warnings.push(DomainWarning::BarrierAtOrAboveSpot {
                barrier,
                spot: params.s0,
            });
        }
    }
    if params.sigma == 0.0 {
        warnings.push(DomainWarning::ZeroVolatility);
    }
    if params.t == 0.0 {
        warnings.push(DomainWarning::ZeroMaturity);
    }
    if config.num_paths == 1 {
        warnings.push(DomainWarning::UndefinedStandardError { paths: 1 });
    }
    Ok(warnings)
}

/// Monte Carlo pricing of `payoff` under geometric Brownian motion
///
/// # Pipeline
///
/// 1. Validate parameters and configuration; collect domain warnings
/// 2. Simulate antithetic GBM paths on the family's seed offset
/// 3. Reduce every path to its summary and evaluate discounted payoffs
/// 4. Estimate price and standard error for the call and the put
///
/// The grid is never materialised here; see [`price_option_with_paths`].
///
/// # Errors
///
/// Returns `McError` for invalid parameters or path/step counts. Domain
/// warnings do not fail the call; they are logged and attached to the result.
pub fn price_option(
    payoff: &Payoff,
    params: &MarketParameters,
    config: &SimulationConfig,
) -> McResult<OptionPrices> {
    run_pricing(payoff, params, config, false, false)
}

/// Same as [`price_option`], additionally returning the simulated grid.
///
/// Prices are bit-identical to the streaming variant.
pub fn price_option_with_paths(
    payoff: &Payoff,
    params: &MarketParameters,
    config: &SimulationConfig,
) -> McResult<OptionPrices> {
    run_pricing(payoff, params, config, true, false)
}

/// Pricing without logging warnings, for the many bumped runs of the
/// Greeks engine. Warnings are still attached to the result.
pub(crate) fn price_option_quiet(
    payoff: &Payoff,
    params: &MarketParameters,
    config: &SimulationConfig,
) -> McResult<OptionPrices> {
    run_pricing(payoff, params, config, false, true)
}

fn run_pricing(
    payoff: &Payoff,
    params: &MarketParameters,
    config: &SimulationConfig,
    retain_paths: bool,
    suppress_warnings: bool,
) -> McResult<OptionPrices> {
    let warnings = check_inputs(payoff, params, config)?;
    if !suppress_warnings {
        for warning in &warnings {
            tracing::warn!(family = payoff.family().name(), "{}", warning);
        }
    }

    let simulator = PathSimulator::new(params, config, payoff.family())?;
    let (summaries, ensemble) = if retain_paths {
        let ensemble = simulator.simulate()?;
        (ensemble.summaries(), Some(ensemble))
    } else {
        (simulator.path_summaries(), None)
    };

    let payoffs = payoff.evaluate_summaries(&summaries, params);
    let call = estimate(&payoffs.call);
    let put = estimate(&payoffs.put);
    let diagnostics = payoff.diagnostics(&summaries);

    tracing::debug!(
        family = payoff.family().name(),
        paths = config.num_paths,
        steps = config.num_steps,
        call = call.price,
        put = put.price,
        "priced option"
    );

    Ok(OptionPrices {
        call,
        put,
        diagnostics,
        warnings,
        ensemble,
    })
}

pub fn price_european(
    params: &MarketParameters,
    config: &SimulationConfig,
) -> McResult<OptionPrices> {
    price_option(&Payoff::European, params, config)
}

pub fn price_asian(params: &MarketParameters, config: &SimulationConfig) -> McResult<OptionPrices> {
    price_option(&Payoff::Asian, params, config)
}

/// Down-and-out barrier option.
pub fn price_barrier(
    params: &MarketParameters,
    config: &SimulationConfig,
    barrier: f64,
) -> McResult<OptionPrices> {
    price_option(&Payoff::DownAndOut { barrier }, params, config)
}
