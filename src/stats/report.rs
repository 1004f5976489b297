use std::fmt;
use std::time::Duration;

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub count: usize,
    pub mean: Option<Duration>,
}

/// Snapshot of a finished run, taken after every monitor has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsReport {
    pub failed_requests: CategorySummary,
    pub failed_response_reads: CategorySummary,
    pub successes: CategorySummary,
}

impl StatsReport {
    #[must_use]
    pub const fn get(&self, category: Category) -> CategorySummary {
        match category {
            Category::Success => self.successes,
            Category::RequestError => self.failed_requests,
            Category::ReadError => self.failed_response_reads,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.failed_requests
            .count
            .saturating_add(self.failed_response_reads.count)
            .saturating_add(self.successes.count)
    }
}

/// Renders a mean, showing `n/a` for an empty category.
#[derive(Debug, Clone, Copy)]
pub struct MeanDisplay(pub Option<Duration>);

impl fmt::Display for MeanDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(mean) => write!(f, "{:?}", mean),
            None => f.write_str("n/a"),
        }
    }
}

const fn count_label(category: Category) -> &'static str {
    match category {
        Category::RequestError => "no of failed requests",
        Category::ReadError => "no of failed response reads",
        Category::Success => "no of successful requests",
    }
}

const fn mean_label(category: Category) -> &'static str {
    match category {
        Category::RequestError => "mean time for failed requests",
        Category::ReadError => "mean time for failed body reads",
        Category::Success => "mean time for successful requests",
    }
}

/// Counts for every category, then means, in [`Category::ALL`] order.
#[must_use]
pub fn summary_lines(report: &StatsReport) -> Vec<String> {
    let counts = Category::ALL
        .iter()
        .map(|category| format!("{}: {}", count_label(*category), report.get(*category).count));
    let means = Category::ALL.iter().map(|category| {
        format!(
            "{}: {}",
            mean_label(*category),
            MeanDisplay(report.get(*category).mean)
        )
    });
    counts.chain(means).collect()
}
