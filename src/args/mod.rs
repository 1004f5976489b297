//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::ClientArgs;
pub use types::{LogFormatter, LogLevel, PositiveU64, PositiveUsize};

pub(crate) use parsers::parse_header;
