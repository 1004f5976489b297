use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::DispatchError;

use super::Category;
use super::report::{CategorySummary, StatsReport};

#[derive(Debug, Default)]
struct Recorded {
    success_durations: Vec<Duration>,
    request_error_durations: Vec<Duration>,
    request_errors: Vec<DispatchError>,
    read_error_durations: Vec<Duration>,
    read_errors: Vec<DispatchError>,
}

impl Recorded {
    fn durations(&self, category: Category) -> &[Duration] {
        match category {
            Category::Success => &self.success_durations,
            Category::RequestError => &self.request_error_durations,
            Category::ReadError => &self.read_error_durations,
        }
    }

    fn errors(&self, category: Category) -> &[DispatchError] {
        match category {
            Category::Success => &[],
            Category::RequestError => &self.request_errors,
            Category::ReadError => &self.read_errors,
        }
    }
}

/// Append-only per-category record of attempt durations and failures.
///
/// One instance is created per run and shared by every monitor. Writers only
/// ever hold the internal lock for a single append; nothing outside this type
/// touches it. When constructed disabled, every `record_*` call returns
/// without locking and all categories stay empty.
#[derive(Debug)]
pub struct StatsAggregator {
    enabled: bool,
    recorded: Mutex<Recorded>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            recorded: Mutex::new(Recorded::default()),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record_success(&self, duration: Duration) {
        if !self.enabled {
            return;
        }
        self.lock().success_durations.push(duration);
    }

    pub fn record_request_error(&self, err: DispatchError, duration: Duration) {
        if !self.enabled {
            return;
        }
        let mut recorded = self.lock();
        recorded.request_errors.push(err);
        recorded.request_error_durations.push(duration);
    }

    pub fn record_read_error(&self, err: DispatchError, duration: Duration) {
        if !self.enabled {
            return;
        }
        let mut recorded = self.lock();
        recorded.read_errors.push(err);
        recorded.read_error_durations.push(duration);
    }

    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.lock().durations(category).len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        let recorded = self.lock();
        Category::ALL
            .iter()
            .map(|category| recorded.durations(*category).len())
            .fold(0usize, usize::saturating_add)
    }

    /// Arithmetic mean of the recorded durations, or `None` for an empty category.
    #[must_use]
    pub fn mean_duration(&self, category: Category) -> Option<Duration> {
        mean_of(self.lock().durations(category))
    }

    /// Rendered failures recorded for a category, in recording order.
    #[must_use]
    pub fn errors(&self, category: Category) -> Vec<String> {
        self.lock()
            .errors(category)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Final per-category counts and means; `None` when recording is disabled.
    #[must_use]
    pub fn report(&self) -> Option<StatsReport> {
        if !self.enabled {
            return None;
        }
        let recorded = self.lock();
        let summarize = |category: Category| {
            let durations = recorded.durations(category);
            CategorySummary {
                count: durations.len(),
                mean: mean_of(durations),
            }
        };
        Some(StatsReport {
            failed_requests: summarize(Category::RequestError),
            failed_response_reads: summarize(Category::ReadError),
            successes: summarize(Category::Success),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(super) fn mean_of(durations: &[Duration]) -> Option<Duration> {
    let count = u128::try_from(durations.len()).ok()?;
    let total = durations
        .iter()
        .fold(0u128, |acc, duration| acc.saturating_add(duration.as_nanos()));
    let mean = total.checked_div(count)?;
    Some(Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX)))
}
