// tests/simulator_test.rs
use fast_mc::mc::config::{MarketParameters, SimulationConfig};
use fast_mc::mc::mc_engine::price_asian;
use fast_mc::mc::payoffs::{InstrumentFamily, Payoff};
use fast_mc::mc::simulator::{simulate, PathSimulator};
use fast_mc::models::gbm::Gbm;
use proptest::prelude::*;

fn pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool")
}

#[test]
fn test_same_seed_same_ensemble() {
    let params = MarketParameters::default();
    let config = SimulationConfig::new(1_001, 30, 12345);

    let first = simulate(&params, &config, 0).unwrap();
    let second = simulate(&params, &config, 0).unwrap();
    assert_eq!(first, second);

    let other_family = simulate(&params, &config, 1).unwrap();
    assert_ne!(first, other_family);
}

#[test]
fn test_ensemble_independent_of_thread_count() {
    let params = MarketParameters::default();
    let config = SimulationConfig::new(4_099, 40, 777);

    let single = pool(1).install(|| simulate(&params, &config, 2).unwrap());
    let many = pool(4).install(|| simulate(&params, &config, 2).unwrap());
    assert_eq!(single, many);

    let single_price = pool(1).install(|| price_asian(&params, &config).unwrap());
    let many_price = pool(4).install(|| price_asian(&params, &config).unwrap());
    assert_eq!(single_price.call, many_price.call);
    assert_eq!(single_price.put, many_price.put);
}

#[test]
fn test_log_increments_follow_innovations() {
    let params = MarketParameters::new(95.0, 100.0, 0.5, 0.04, 0.3, 0.01);
    let config = SimulationConfig::new(9, 16, 5);

    let sim = PathSimulator::new(&params, &config, InstrumentFamily::European).unwrap();
    let z = sim.innovations();
    let ensemble = sim.simulate().unwrap();
    let prices = ensemble.prices();

    let dt = params.t / config.num_steps as f64;
    let gbm = Gbm::from_market(&params, dt);
    for path in 0..config.num_paths {
        for step in 0..config.num_steps {
            let observed = (prices[(step + 1, path)] / prices[(step, path)]).ln();
            let expected = gbm.log_increment(z[(step, path)]);
            assert!(
                (observed - expected).abs() < 1e-12,
                "path {} step {}: {} vs {}",
                path,
                step,
                observed,
                expected
            );
        }
    }
}

#[test]
fn test_draw_count_is_half_the_paths_rounded_up() {
    let params = MarketParameters::default();
    for (paths, pairs) in [(1usize, 1usize), (2, 1), (5, 3), (10, 5)] {
        let config = SimulationConfig::new(paths, 3, 1);
        assert_eq!(config.num_pairs(), pairs);

        let z = PathSimulator::with_offset(&params, &config, 0)
            .unwrap()
            .innovations();
        let mut distinct: Vec<f64> = z.row(0).iter().map(|v| v.abs()).collect();
        distinct.sort_by(|a, b| a.partial_cmp(b).unwrap());
        distinct.dedup();
        assert_eq!(distinct.len(), pairs, "paths = {}", paths);
    }
}

#[test]
fn test_antithetic_pairs_average_to_exact_drift() {
    // ln S_T of a pair averages to ln S0 + (r - q - σ²/2) T exactly
    let params = MarketParameters::default();
    let config = SimulationConfig::new(200, 25, 31);
    let ensemble = simulate(&params, &config, 0).unwrap();
    let terminal = ensemble.terminal_prices();

    let drift = (params.r - params.q - 0.5 * params.sigma * params.sigma) * params.t;
    for pair in 0..config.num_pairs() {
        let mean_log = 0.5 * (terminal[2 * pair].ln() + terminal[2 * pair + 1].ln());
        assert!((mean_log - params.s0.ln() - drift).abs() < 1e-10);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_barrier_payoff_never_exceeds_vanilla(
        seed in any::<u64>(),
        barrier in 60.0f64..100.0,
        paths in 1usize..200,
        steps in 1usize..40,
    ) {
        let params = MarketParameters::default();
        let config = SimulationConfig::new(paths, steps, seed);
        let ensemble = simulate(&params, &config, 2).unwrap();

        let knocked = Payoff::DownAndOut { barrier }.evaluate(&ensemble, &params);
        let vanilla = Payoff::European.evaluate(&ensemble, &params);
        for (b, v) in knocked.call.iter().zip(&vanilla.call) {
            prop_assert!(b <= v);
        }
        for (b, v) in knocked.put.iter().zip(&vanilla.put) {
            prop_assert!(b <= v);
        }
    }

    #[test]
    fn prop_asian_payoff_bounded_by_path_extremes(
        seed in any::<u64>(),
        paths in 1usize..100,
        steps in 1usize..30,
    ) {
        let params = MarketParameters::default();
        let config = SimulationConfig::new(paths, steps, seed);
        let ensemble = simulate(&params, &config, 1).unwrap();

        for summary in ensemble.summaries() {
            prop_assert!(summary.minimum <= summary.average + 1e-9);
            prop_assert!(summary.average <= summary.maximum + 1e-9);
            prop_assert!(summary.minimum <= params.s0 && params.s0 <= summary.maximum);
        }
    }
}
