// demos/demo.rs
use fast_mc::analytics::bs_analytic;
use fast_mc::mc::config::{MarketParameters, SimulationConfig};
use fast_mc::mc::greeks::compute_greeks;
use fast_mc::mc::mc_engine::{price_asian, price_barrier, price_european, OptionPrices};
use fast_mc::mc::payoffs::OptionSide;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_prices(label: &str, result: &OptionPrices, elapsed_ms: f64) {
    println!("--- {} ({:.1} ms) ---", label, elapsed_ms);
    for side in OptionSide::BOTH {
        let estimate = result.side(side);
        println!(
            "  {:?}: {:.6} ± {:.6} (95% CI half-width {:.6})",
            side,
            estimate.price,
            estimate.std_error,
            estimate.confidence_95()
        );
    }
    println!("  Diagnostics: {:?}", result.diagnostics);
    for warning in &result.warnings {
        println!("  Warning: {}", warning);
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info");

    let args: Vec<String> = std::env::args().collect();
    let num_paths = args
        .get(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(SimulationConfig::default().num_paths);

    println!("Running fast-mc Monte Carlo Demo\n");

    let params = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, 0.0);
    let config = SimulationConfig::new(num_paths, 252, 12345);
    let barrier = 90.0;

    println!(
        "S0 = {}, K = {}, T = {}, r = {}, σ = {}, q = {}",
        params.s0, params.k, params.t, params.r, params.sigma, params.q
    );
    println!(
        "{} paths × {} steps, seed {}\n",
        config.num_paths, config.num_steps, config.seed
    );

    let start = Instant::now();
    let european = price_european(&params, &config)?;
    print_prices("European", &european, start.elapsed().as_secs_f64() * 1e3);

    for side in OptionSide::BOTH {
        let analytic = bs_analytic::black_scholes(
            params.s0, params.k, params.t, params.r, params.sigma, params.q, side,
        );
        let mc = european.side(side);
        println!(
            "  {:?}: analytic {:.6}, error {:.6} ({:.2} SE)",
            side,
            analytic,
            mc.price - analytic,
            (mc.price - analytic) / mc.std_error
        );
    }
    println!();

    let start = Instant::now();
    let asian = price_asian(&params, &config)?;
    print_prices("Arithmetic Asian", &asian, start.elapsed().as_secs_f64() * 1e3);

    let start = Instant::now();
    let down_and_out = price_barrier(&params, &config, barrier)?;
    print_prices(
        &format!("Down-and-out, barrier {}", barrier),
        &down_and_out,
        start.elapsed().as_secs_f64() * 1e3,
    );

    let start = Instant::now();
    let greeks = compute_greeks(&params, &config)?;
    println!(
        "--- European Greeks ({:.1} ms) ---",
        start.elapsed().as_secs_f64() * 1e3
    );
    println!("{:>6} {:>12} {:>12} {:>12} {:>12}", "", "MC call", "BS call", "MC put", "BS put");

    let (s, k, t, r, sigma, q) = (params.s0, params.k, params.t, params.r, params.sigma, params.q);
    let rows = [
        (
            "delta",
            greeks.call.delta,
            bs_analytic::bs_delta(s, k, t, r, sigma, q, OptionSide::Call),
            greeks.put.delta,
            bs_analytic::bs_delta(s, k, t, r, sigma, q, OptionSide::Put),
        ),
        (
            "gamma",
            greeks.call.gamma,
            bs_analytic::bs_gamma(s, k, t, r, sigma, q),
            greeks.put.gamma,
            bs_analytic::bs_gamma(s, k, t, r, sigma, q),
        ),
        (
            "theta",
            greeks.call.theta,
            bs_analytic::bs_theta(s, k, t, r, sigma, q, OptionSide::Call),
            greeks.put.theta,
            bs_analytic::bs_theta(s, k, t, r, sigma, q, OptionSide::Put),
        ),
        (
            "vega",
            greeks.call.vega,
            bs_analytic::bs_vega(s, k, t, r, sigma, q),
            greeks.put.vega,
            bs_analytic::bs_vega(s, k, t, r, sigma, q),
        ),
        (
            "rho",
            greeks.call.rho,
            bs_analytic::bs_rho(s, k, t, r, sigma, q, OptionSide::Call),
            greeks.put.rho,
            bs_analytic::bs_rho(s, k, t, r, sigma, q, OptionSide::Put),
        ),
    ];
    for (name, mc_call, bs_call, mc_put, bs_put) in rows {
        println!(
            "{:>6} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            name, mc_call, bs_call, mc_put, bs_put
        );
    }

    Ok(())
}
