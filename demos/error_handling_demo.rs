// demos/error_handling_demo.rs
use fast_mc::error::McError;
use fast_mc::mc::config::{MarketParameters, SimulationConfig};
use fast_mc::mc::mc_engine::{price_barrier, price_european};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("Error Handling Demo for fast-mc");
    println!("===============================\n");

    let params = MarketParameters::default();
    let config = SimulationConfig::new(10_000, 50, 42);

    // Test 1: Invalid market parameters
    println!("1. Testing negative spot price...");
    match price_european(&params.with_spot(-100.0), &config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Non-finite input
    println!("\n2. Testing NaN volatility...");
    match price_european(&params.with_volatility(f64::NAN), &config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Invalid simulation configuration
    println!("\n3. Testing zero paths...");
    match price_european(&params, &SimulationConfig::new(0, 50, 42)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Misconfigured barrier warns but prices
    println!("\n4. Testing barrier above spot...");
    match price_barrier(&params, &config, 110.0) {
        Ok(result) => {
            println!("   ✓ Priced: call = {:.4}, put = {:.4}", result.call_price(), result.put_price());
            for warning in &result.warnings {
                println!("   ✓ Warning: {}", warning);
            }
        }
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 5: Degenerate inputs are priced, not rejected
    println!("\n5. Testing zero volatility and zero maturity...");
    for (label, degenerate) in [
        ("σ = 0", params.with_volatility(0.0)),
        ("T = 0", params.with_maturity(0.0)),
    ] {
        match price_european(&degenerate, &config) {
            Ok(result) => println!(
                "   ✓ {}: call = {:.4}, warnings = {:?}",
                label,
                result.call_price(),
                result.warnings
            ),
            Err(e) => println!("   Unexpected error: {}", e),
        }
    }

    // Test 6: Single path has no standard error
    println!("\n6. Testing a single path...");
    match price_european(&params, &SimulationConfig::new(1, 50, 42)) {
        Ok(result) => println!(
            "   ✓ Price = {:.4}, std error = {}",
            result.call_price(),
            result.call_std_err()
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 7: Error type matching
    println!("\n7. Testing error type matching...");
    match price_european(&params.with_strike(-5.0), &config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(McError::InvalidParameters {
            parameter,
            value,
            constraint,
        }) => {
            println!("   ✓ Caught InvalidParameters: {} = {} ({})", parameter, value, constraint);
        }
        Err(e) => println!("   Different error: {}", e),
    }

    match price_european(&params, &SimulationConfig::new(10, 0, 42)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(McError::InvalidConfiguration { field, reason }) => {
            println!("   ✓ Caught InvalidConfiguration: {} ({})", field, reason);
        }
        Err(e) => println!("   Different error: {}", e),
    }

    println!("\n===============================");
    println!("Error handling demo completed!");
}
