pub mod config;
pub mod estimator;
pub mod greeks;
pub mod mc_engine;
pub mod payoffs;
pub mod simulator;
