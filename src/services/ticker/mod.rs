//! Cancellable periodic task driving countdown refreshes.
//!
//! Each ticker samples its [`Clock`] once per tick and hands that instant to
//! the callback. Views own the returned [`TickerHandle`]; stopping or dropping
//! it tears the task down, so no recurring callback outlives its view.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Local};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;

use crate::utils::clock::Clock;

pub struct Ticker;

impl Ticker {
    /// Spawn a ticker on the current tokio runtime. The first tick fires
    /// immediately, then once per `period`.
    pub fn spawn<F>(
        name: &'static str,
        period: StdDuration,
        clock: Arc<dyn Clock>,
        mut on_tick: F,
    ) -> TickerHandle
    where
        F: FnMut(DateTime<Local>) + Send + 'static,
    {
        let period = period.max(StdDuration::from_millis(1));
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            log::info!("Ticker `{}` started with period {:?}", name, period);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => on_tick(clock.now()),
                }
            }

            log::info!("Ticker `{}` stopped", name);
        });

        TickerHandle {
            name,
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }
}

/// Owner side of a running ticker.
pub struct TickerHandle {
    name: &'static str,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Ask the ticker to stop and wait until its task has exited.
    pub async fn stop(mut self) -> Result<(), JoinError> {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The receiver is gone only if the task already exited.
            let _ = stop_tx.send(());
        }
        match self.task.take() {
            Some(task) => task.await,
            None => Ok(()),
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            log::debug!("Ticker `{}` dropped without stop(), aborting", self.name);
            task.abort();
        }
    }
}
