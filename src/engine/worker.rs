use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{trace, warn};

use crate::args::{PositiveU64, PositiveUsize};
use crate::http::{Dispatch, RequestSpec};

use super::types::AttemptResult;

/// A running worker: the receiving end of its result queue and its task.
///
/// The queue yields exactly `times` results in production order and then
/// closes. It cannot be restarted.
pub struct Worker {
    id: usize,
    results: mpsc::Receiver<AttemptResult>,
    handle: JoinHandle<u64>,
}

impl Worker {
    /// Starts issuing attempts right away on a new task.
    ///
    /// Once `monitor_buffer` results are waiting unread, the next send
    /// suspends until the monitor takes one.
    #[must_use]
    pub fn spawn(
        id: usize,
        dispatcher: Arc<dyn Dispatch>,
        spec: Arc<RequestSpec>,
        times: PositiveU64,
        wait: Duration,
        monitor_buffer: PositiveUsize,
    ) -> Self {
        let (results_tx, results) = mpsc::channel(monitor_buffer.get());
        let handle = tokio::spawn(run_attempts(
            id,
            dispatcher,
            spec,
            times.get(),
            wait,
            results_tx,
        ));
        Self {
            id,
            results,
            handle,
        }
    }

    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Splits into the result queue and the task, which yields the number of
    /// attempts issued.
    #[must_use]
    pub fn into_parts(self) -> (mpsc::Receiver<AttemptResult>, JoinHandle<u64>) {
        (self.results, self.handle)
    }
}

async fn run_attempts(
    id: usize,
    dispatcher: Arc<dyn Dispatch>,
    spec: Arc<RequestSpec>,
    times: u64,
    wait: Duration,
    results_tx: mpsc::Sender<AttemptResult>,
) -> u64 {
    let mut issued: u64 = 0;
    while issued < times {
        if issued > 0 && !wait.is_zero() {
            sleep(wait).await;
        }

        let result = attempt(dispatcher.as_ref(), &spec).await;
        issued = issued.saturating_add(1);
        trace!(worker = id, attempt = issued, "attempt finished");

        if results_tx.send(result).await.is_err() {
            warn!(
                worker = id,
                "monitor stopped listening after {} of {} attempts", issued, times
            );
            break;
        }
    }
    issued
}

async fn attempt(dispatcher: &dyn Dispatch, spec: &RequestSpec) -> AttemptResult {
    let start = Utc::now();
    let started = Instant::now();
    let outcome = dispatcher.dispatch(spec).await;
    AttemptResult {
        start,
        duration: started.elapsed(),
        outcome,
    }
}
