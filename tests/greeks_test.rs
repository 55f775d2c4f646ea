// tests/greeks_test.rs
use fast_mc::analytics::bs_analytic;
use fast_mc::mc::config::{MarketParameters, SimulationConfig};
use fast_mc::mc::greeks::{compute_greeks, compute_greeks_for, GreekSet};
use fast_mc::mc::payoffs::{OptionSide, Payoff};

fn base_case() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, 0.0)
}

#[test]
fn test_bs_call_gamma_analytic() {
    let analytic_gamma = bs_analytic::bs_gamma(100.0, 100.0, 1.0, 0.05, 0.20, 0.0);
    let expected_gamma = 0.018762017345847;

    let rel_error = (analytic_gamma - expected_gamma).abs() / expected_gamma;
    println!("\nAnalytic Gamma: {}", analytic_gamma);
    println!("Relative Error (Gamma): {}", rel_error);

    assert!(rel_error < 1e-7, "Relative error for Gamma exceeds tolerance: {}", rel_error);
}

#[test]
fn test_bs_call_vega_analytic() {
    let analytic_vega = bs_analytic::bs_vega(100.0, 100.0, 1.0, 0.05, 0.20, 0.0);
    let expected_vega = 37.524034691693792;

    let rel_error = (analytic_vega - expected_vega).abs() / expected_vega;
    println!("\nAnalytic Vega: {}", analytic_vega);
    println!("Relative Error (Vega): {}", rel_error);

    assert!(rel_error < 1e-7, "Relative error for Vega exceeds tolerance: {}", rel_error);
}

#[test]
fn test_bs_call_theta_analytic() {
    let analytic_theta =
        bs_analytic::bs_theta(100.0, 100.0, 1.0, 0.05, 0.20, 0.0, OptionSide::Call);
    let expected_theta = -6.414027546438197;

    let rel_error = ((analytic_theta - expected_theta) / expected_theta).abs();
    println!("\nAnalytic Theta: {}", analytic_theta);
    println!("Relative Error (Theta): {}", rel_error);

    assert!(rel_error < 1e-7, "Relative error for Theta exceeds tolerance: {}", rel_error);
}

#[test]
#[ignore]
fn test_mc_greeks_signs_on_reference_configuration() {
    // Reference configuration: 200 000 paths, 252 steps, seed 12345 (marked as ignore for CI)
    let config = SimulationConfig::new(200_000, 252, 12345);
    let greeks = compute_greeks(&base_case(), &config).expect("Valid configuration");

    println!("\nCall greeks: {:?}", greeks.call);
    println!("Put greeks: {:?}", greeks.put);

    assert!(greeks.call.delta > 0.0 && greeks.call.delta < 1.0);
    assert!(greeks.put.delta > -1.0 && greeks.put.delta < 0.0);
    assert!(greeks.call.vega > 0.0);
    assert!(greeks.put.vega > 0.0);
    assert!(greeks.call.gamma > 0.0);
    assert!(greeks.call.rho > 0.0);
    assert!(greeks.put.rho < 0.0);
    assert!(greeks.call.theta < 0.0);
}

#[test]
fn test_mc_greeks_vs_analytic() {
    let (s, k, t, r, sigma, q) = (100.0, 100.0, 1.0, 0.05, 0.2, 0.0);
    let config = SimulationConfig::new(20_000, 50, 42);
    let greeks = compute_greeks(&base_case(), &config).expect("Valid configuration");

    let call = OptionSide::Call;
    let checks = [
        ("delta", greeks.call.delta, bs_analytic::bs_delta(s, k, t, r, sigma, q, call), 0.03),
        ("gamma", greeks.call.gamma, bs_analytic::bs_gamma(s, k, t, r, sigma, q), 0.25),
        ("theta", greeks.call.theta, bs_analytic::bs_theta(s, k, t, r, sigma, q, call), 0.10),
        ("vega", greeks.call.vega, bs_analytic::bs_vega(s, k, t, r, sigma, q), 0.05),
        ("rho", greeks.call.rho, bs_analytic::bs_rho(s, k, t, r, sigma, q, call), 0.05),
    ];

    println!("\n=== MC Greeks vs Black-Scholes ===");
    for (name, mc, analytic, tolerance) in checks {
        let rel_error = ((mc - analytic) / analytic).abs();
        println!(
            "{:>5}: MC {:>10.6}  analytic {:>10.6}  rel {:.4}%",
            name,
            mc,
            analytic,
            rel_error * 100.0
        );
        assert!(
            rel_error < tolerance,
            "Relative error for {} exceeds {}: {}",
            name,
            tolerance,
            rel_error
        );
    }
}

#[test]
fn test_greeks_are_deterministic() {
    let config = SimulationConfig::new(2_000, 20, 7);
    let first = compute_greeks(&base_case(), &config).unwrap();
    let second = compute_greeks(&base_case(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_asian_greeks_subset() {
    let config = SimulationConfig::new(10_000, 50, 3);
    let greeks = compute_greeks_for(
        &Payoff::Asian,
        &base_case(),
        &config,
        GreekSet::DELTA | GreekSet::VEGA,
    )
    .expect("Valid configuration");

    let european_delta =
        bs_analytic::bs_delta(100.0, 100.0, 1.0, 0.05, 0.2, 0.0, OptionSide::Call);
    assert!(greeks.call.delta > 0.0 && greeks.call.delta < european_delta);
    assert!(greeks.call.vega > 0.0);
    assert!(greeks.call.gamma.is_nan());
    assert!(greeks.call.rho.is_nan());
}

#[test]
fn test_greeks_reject_invalid_inputs() {
    let config = SimulationConfig::new(0, 10, 1);
    assert!(compute_greeks(&base_case(), &config).is_err());

    let params = base_case().with_volatility(-0.1);
    assert!(compute_greeks(&params, &SimulationConfig::new(100, 10, 1)).is_err());
}

#[test]
#[ignore]
fn test_mc_greeks_base_case_full_size() {
    // Full-size run at the default configuration (marked as ignore for CI)
    let params = base_case();
    let config = SimulationConfig::default();
    let greeks = compute_greeks(&params, &config).expect("Valid configuration");

    let analytic_delta =
        bs_analytic::bs_delta(100.0, 100.0, 1.0, 0.05, 0.2, 0.0, OptionSide::Call);
    let analytic_vega = bs_analytic::bs_vega(100.0, 100.0, 1.0, 0.05, 0.2, 0.0);

    println!("\n=== Full-size MC Greeks ({} paths) ===", config.num_paths);
    println!("Call: {:?}", greeks.call);
    println!("Put:  {:?}", greeks.put);

    assert!((greeks.call.delta - analytic_delta).abs() < 0.01);
    assert!(((greeks.call.vega - analytic_vega) / analytic_vega).abs() < 0.02);
}
