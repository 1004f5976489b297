//! Outcome classification and the shared statistics aggregator.
mod aggregator;
mod report;


pub use aggregator::StatsAggregator;
pub use report::{CategorySummary, MeanDisplay, StatsReport, summary_lines};

/// Bucket an attempt is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Success,
    RequestError,
    ReadError,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::RequestError,
        Category::ReadError,
        Category::Success,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::RequestError => "request_error",
            Category::ReadError => "read_error",
        }
    }
}
