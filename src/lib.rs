//! Core library for the `httpt` CLI.
//!
//! `httpt` repeats one HTTP request from a fixed number of concurrent workers,
//! logs every response, and optionally reports per-category counts and mean
//! durations. The library exposes the building blocks the binary uses:
//! argument types, configuration, request dispatch, the worker engine, and
//! statistics.
pub mod args;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod http;
pub mod stats;
mod system;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
