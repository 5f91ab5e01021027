use std::{sync::Arc, time::Duration};

use anyhow::ensure;
use chrono::Utc;
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::dispatcher::BroadcastDispatcher;

#[derive(Debug, Clone, Copy)]
pub struct BroadcastSchedule {
    pub first_delay: Duration,
    pub interval: Duration,
}

/// Runs broadcast cycles on a fixed interval.
///
/// Cycles run inline in a single task, so at most one is in flight. Ticks
/// missed while a long cycle runs are delayed rather than fired back to back.
pub struct BroadcastScheduler {
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl BroadcastScheduler {
    pub fn start(
        dispatcher: Arc<BroadcastDispatcher>,
        schedule: BroadcastSchedule,
    ) -> anyhow::Result<Self> {
        ensure!(
            !schedule.interval.is_zero(),
            "Broadcast interval must be greater than zero."
        );

        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        log::info!(
            "Scheduling broadcast every {:?}, first run in {:?}",
            schedule.interval,
            schedule.first_delay
        );

        let task_handle = tokio::spawn(async move {
            Self::run(task_cancellation_token, dispatcher, schedule).await
        });

        Ok(Self {
            task_handle,
            cancellation_token,
        })
    }

    /// Stops scheduling further cycles. A cycle that is already running is
    /// allowed to finish, bounded by `timeout`.
    pub async fn stop(self, timeout: Duration) {
        self.cancellation_token.cancel();
        if time::timeout(timeout, self.task_handle).await.is_err() {
            log::warn!("Broadcast task did not stop within {:?}", timeout);
        }
    }

    async fn run(
        cancellation_token: CancellationToken,
        dispatcher: Arc<BroadcastDispatcher>,
        schedule: BroadcastSchedule,
    ) {
        let mut ticks = time::interval_at(Instant::now() + schedule.first_delay, schedule.interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Broadcast scheduler stopped");
                    break;
                },
                _ = ticks.tick() => {
                    dispatcher.run_cycle().await;
                    if let Ok(interval) = chrono::Duration::from_std(schedule.interval) {
                        log::info!("Next broadcast at {}", Utc::now() + interval);
                    }
                }
            }
        }
    }
}
