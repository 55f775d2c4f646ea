// src/mc/simulator.rs
//! Antithetic GBM path generation
//!
//! # Layout
//!
//! A [`PathEnsemble`] is a dense `(num_steps + 1) × num_paths` grid: rows are
//! observation dates, columns are paths, row 0 is the spot price.
//!
//! # Antithetic pairing
//!
//! Paths are generated in pairs. Pair `j` draws `num_steps` standard normals
//! from its own sub-stream and feeds them to column `2j` as `Z` and to column
//! `2j + 1` as `-Z`. With an odd path count the last pair has no mirror, so a
//! run always consumes exactly `ceil(num_paths / 2)` draws per step.
//!
//! # Reproducibility
//!
//! Pairs are the unit of parallel work. Each pair's generator depends only on
//! `(seed + offset, j)`, so the grid is bit-identical for any rayon pool size.
//! The draws do not depend on the market parameters either, which means bumped
//! runs in the Greeks engine see the same normals as the base run.

use crate::error::{McError, McResult};
use crate::mc::config::{MarketParameters, SimulationConfig};
use crate::mc::payoffs::InstrumentFamily;
use crate::models::gbm::Gbm;
use crate::rng::{self, SeedStream};
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView1, Axis, ShapeBuilder};

/// Per-path statistics consumed by the payoff evaluators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSummary {
    pub terminal: f64,
    /// Arithmetic mean over every observation, t = 0 included
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
}

impl PathSummary {
    /// Summarise one path given in time order. An empty path yields NaNs.
    pub fn from_prices<I: IntoIterator<Item = f64>>(prices: I) -> Self {
        let mut iter = prices.into_iter();
        let Some(first) = iter.next() else {
            return PathSummary {
                terminal: f64::NAN,
                average: f64::NAN,
                minimum: f64::NAN,
                maximum: f64::NAN,
            };
        };

        let mut sum = first;
        let mut count = 1usize;
        let mut minimum = first;
        let mut maximum = first;
        let mut terminal = first;
        for price in iter {
            sum += price;
            count += 1;
            minimum = minimum.min(price);
            maximum = maximum.max(price);
            terminal = price;
        }

        PathSummary {
            terminal,
            average: sum / count as f64,
            minimum,
            maximum,
        }
    }
}

/// Dense grid of simulated asset prices.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    prices: Array2<f64>,
}

impl PathEnsemble {
    pub fn from_array(prices: Array2<f64>) -> Self {
        PathEnsemble { prices }
    }

    pub fn prices(&self) -> &Array2<f64> {
        &self.prices
    }

    pub fn into_array(self) -> Array2<f64> {
        self.prices
    }

    pub fn num_paths(&self) -> usize {
        self.prices.ncols()
    }

    /// Number of observation dates, spot included.
    pub fn num_rows(&self) -> usize {
        self.prices.nrows()
    }

    pub fn path(&self, index: usize) -> ArrayView1<'_, f64> {
        self.prices.column(index)
    }

    pub fn initial_prices(&self) -> ArrayView1<'_, f64> {
        self.prices.row(0)
    }

    pub fn terminal_prices(&self) -> ArrayView1<'_, f64> {
        self.prices.row(self.num_rows() - 1)
    }

    /// Column-wise summaries, in path order.
    pub fn summaries(&self) -> Vec<PathSummary> {
        let mut summaries = Vec::with_capacity(self.num_paths());
        self.prices
            .axis_iter(Axis(1))
            .into_par_iter()
            .map(|column| PathSummary::from_prices(column.iter().copied()))
            .collect_into_vec(&mut summaries);
        summaries
    }
}

/// Generates antithetic GBM ensembles for one parameter set.
#[derive(Debug, Clone)]
pub struct PathSimulator {
    params: MarketParameters,
    config: SimulationConfig,
    stream: SeedStream,
}

impl PathSimulator {
    /// Simulator whose stream is offset for the given instrument family.
    pub fn new(
        params: &MarketParameters,
        config: &SimulationConfig,
        family: InstrumentFamily,
    ) -> McResult<Self> {
        Self::with_offset(params, config, family.seed_offset())
    }

    pub fn with_offset(
        params: &MarketParameters,
        config: &SimulationConfig,
        offset: u64,
    ) -> McResult<Self> {
        params.validate()?;
        config.validate()?;
        Ok(PathSimulator {
            params: *params,
            config: *config,
            stream: SeedStream::new(config.seed, offset),
        })
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Zero maturity: no stochastic step is taken.
    fn is_degenerate(&self) -> bool {
        self.params.t == 0.0
    }

    fn num_rows(&self) -> usize {
        if self.is_degenerate() {
            1
        } else {
            self.config.num_steps + 1
        }
    }

    fn dynamics(&self) -> Gbm {
        let dt = self.params.t / self.config.num_steps as f64;
        Gbm::from_market(&self.params, dt)
    }

    /// Paths owned by pair `pair`: 2, or 1 for the unpaired tail.
    fn pair_width(&self, pair: usize) -> usize {
        (self.config.num_paths - 2 * pair).min(2)
    }

    /// Raw standard-normal draws of pair `pair`, one per step.
    fn pair_draws(&self, pair: usize) -> Vec<f64> {
        let mut rng = self.stream.substream(pair as u64);
        (0..self.config.num_steps)
            .map(|_| rng::get_normal_draw(&mut rng))
            .collect()
    }

    /// Writes one path into `out`, mirroring the draws when `mirrored`.
    fn trace_path(&self, gbm: &Gbm, draws: &[f64], mirrored: bool, out: &mut Vec<f64>) {
        out.clear();
        let mut s = self.params.s0;
        out.push(s);
        if self.is_degenerate() {
            return;
        }
        for &z in draws {
            let z = if mirrored { -z } else { z };
            s = gbm.exact_step(s, z);
            out.push(s);
        }
    }

    /// Calls `f` on every path of pair `pair`, in column order.
    fn for_each_path_in_pair<F: FnMut(&[f64])>(&self, gbm: &Gbm, pair: usize, mut f: F) {
        let draws = if self.is_degenerate() {
            Vec::new()
        } else {
            self.pair_draws(pair)
        };
        let mut buffer = Vec::with_capacity(self.num_rows());
        for lane in 0..self.pair_width(pair) {
            self.trace_path(gbm, &draws, lane == 1, &mut buffer);
            f(&buffer);
        }
    }

    /// Standard-normal innovation grid, `num_steps × num_paths`.
    ///
    /// Column `2j + 1` is the exact negation of column `2j`. A zero-maturity
    /// simulator has no innovations and returns an empty grid.
    pub fn innovations(&self) -> Array2<f64> {
        let rows = self.num_rows() - 1;
        let mut grid = Array2::zeros((rows, self.config.num_paths));
        if rows == 0 {
            return grid;
        }
        for pair in 0..self.config.num_pairs() {
            let draws = self.pair_draws(pair);
            for lane in 0..self.pair_width(pair) {
                let mut column = grid.column_mut(2 * pair + lane);
                for (cell, &z) in column.iter_mut().zip(draws.iter()) {
                    *cell = if lane == 1 { -z } else { z };
                }
            }
        }
        grid
    }

    /// Builds the full price grid.
    ///
    /// # Errors
    ///
    /// `NumericalInstability` when a simulated price overflows or underflows
    /// to zero, e.g. for extreme volatilities.
    pub fn simulate(&self) -> McResult<PathEnsemble> {
        let gbm = self.dynamics();
        let rows = self.num_rows();

        // Column-major, so every pair owns one contiguous block of two columns.
        let mut prices = Array2::<f64>::zeros((rows, self.config.num_paths).f());
        prices
            .axis_chunks_iter_mut(Axis(1), 2)
            .into_par_iter()
            .enumerate()
            .for_each(|(pair, mut block)| {
                let mut lane = 0;
                self.for_each_path_in_pair(&gbm, pair, |path| {
                    block
                        .column_mut(lane)
                        .iter_mut()
                        .zip(path)
                        .for_each(|(cell, &s)| *cell = s);
                    lane += 1;
                });
            });

        if let Some(bad) = prices.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(McError::NumericalInstability {
                method: "path simulation".to_string(),
                reason: format!("simulated price {} is not a positive finite number", bad),
            });
        }

        tracing::debug!(
            paths = self.config.num_paths,
            rows,
            seed = self.stream.seed(),
            "simulated path ensemble"
        );
        Ok(PathEnsemble::from_array(prices))
    }

    /// Per-path summaries without materialising the grid.
    ///
    /// Bit-identical to `self.simulate()?.summaries()`.
    pub fn path_summaries(&self) -> Vec<PathSummary> {
        let gbm = self.dynamics();
        (0..self.config.num_pairs())
            .into_par_iter()
            .flat_map_iter(|pair| {
                let mut summaries = Vec::with_capacity(2);
                self.for_each_path_in_pair(&gbm, pair, |path| {
                    summaries.push(PathSummary::from_prices(path.iter().copied()))
                });
                summaries
            })
            .collect()
    }
}

/// Simulates an ensemble with an explicit stream offset.
pub fn simulate(
    params: &MarketParameters,
    config: &SimulationConfig,
    offset: u64,
) -> McResult<PathEnsemble> {
    PathSimulator::with_offset(params, config, offset)?.simulate()
}
