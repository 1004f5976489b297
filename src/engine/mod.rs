//! Worker/monitor concurrency engine.
//!
//! Each worker repeats the request on its own task and hands results to a
//! paired monitor through a bounded queue. Monitors classify results into the
//! shared [`StatsAggregator`](crate::stats::StatsAggregator), and the
//! orchestrator reports once every monitor is done.
mod monitor;
mod orchestrator;
mod types;
mod worker;


pub use monitor::Monitor;
pub use orchestrator::Orchestrator;
pub use types::{AttemptResult, RunConfig, RunReport};
pub use worker::Worker;
