//! Periodic execution of background tasks.
//!
//! A task runs once per interval under a wall-clock budget. A failed or
//! timed-out run is logged and the next tick proceeds normally; runs never
//! overlap because ticks missed during a slow run are delayed, not bursted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::error::AppError;

/// Work that can be triggered on a schedule.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self) -> Result<(), AppError>;
}

/// Handle to a spawned periodic task.
pub struct PeriodicHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl PeriodicHandle {
    /// Signals the loop to stop and waits for the current run to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.join.await {
            warn!(error = %e, "Scheduled task ended abnormally");
        }
    }
}

/// Spawns `task` to run every `interval`, each run bounded by `budget`.
///
/// The first run happens one full interval after spawning.
pub fn spawn_periodic(
    task: Arc<dyn ScheduledTask>,
    interval: Duration,
    budget: Duration,
) -> PeriodicHandle {
    let (shutdown, mut stop_rx) = watch::channel(false);

    let join = tokio::spawn(async move {
        let name = task.name();
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(task = name, interval_seconds = interval.as_secs(), "Scheduled task started");

        loop {
            tokio::select! {
                _ = ticker.tick() => run_once(task.as_ref(), budget).await,
                _ = stop_rx.changed() => break,
            }
        }

        info!(task = name, "Scheduled task stopped");
    });

    PeriodicHandle { shutdown, join }
}

/// Executes a single run of `task` under `budget`.
pub async fn run_once(task: &dyn ScheduledTask, budget: Duration) {
    let name = task.name();
    debug!(task = name, "Executing scheduled task");

    match tokio::time::timeout(budget, task.run()).await {
        Ok(Ok(())) => debug!(task = name, "Scheduled task completed"),
        Ok(Err(e)) => error!(task = name, error = %e, "Scheduled task failed"),
        Err(_) => error!(
            task = name,
            budget_seconds = budget.as_secs(),
            "Scheduled task exceeded its time budget"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTask {
        runs: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl CountingTask {
        fn new(fail: bool, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                runs: AtomicUsize::new(0),
                fail,
                delay,
            })
        }

        fn runs(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScheduledTask for CountingTask {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self) -> Result<(), AppError> {
            tokio::time::sleep(self.delay).await;
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::internal("boom", json!({})))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_once_per_interval() {
        let task = CountingTask::new(false, Duration::ZERO);
        let handle = spawn_periodic(task.clone(), Duration::from_secs(60), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(task.runs(), 0);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(task.runs(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(task.runs(), 2);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_stop_schedule() {
        let task = CountingTask::new(true, Duration::ZERO);
        let handle = spawn_periodic(task.clone(), Duration::from_secs(10), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(35)).await;

        assert_eq!(task.runs(), 3);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_once_enforces_budget() {
        let task = CountingTask::new(false, Duration::from_secs(120));

        run_once(task.as_ref(), Duration::from_secs(1)).await;

        assert_eq!(task.runs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_loop() {
        let task = CountingTask::new(false, Duration::ZERO);
        let handle = spawn_periodic(task.clone(), Duration::from_secs(10), Duration::from_secs(5));

        handle.stop().await;
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(task.runs(), 0);
    }
}
