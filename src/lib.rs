//! Trialboard - data helpers for machine-learning experiment dashboards
//!
//! Decodes and normalizes trial metric records, sorts trial tables with
//! unorderable cells kept at the bottom, formats durations and timestamps,
//! and talks to the experiment manager's REST API.

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod manager;
pub mod metrics;
pub mod pages;
pub mod table;
pub mod telemetry;
pub mod tensorboard;
