
use std::{sync::Arc, time::Duration};

use crate::registry::RecipientRegistry;

use super::delivery::{DeliveryOutcome, PromotionDeliveryChannel, PromotionPayload};

pub const DEFAULT_PACING: Duration = Duration::from_millis(50);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub attempted: usize,
    pub delivered: usize,
    pub removed: usize,
    pub failed: usize,
}

pub struct BroadcastDispatcher {
    registry: Arc<RecipientRegistry>,
    channel: Arc<dyn PromotionDeliveryChannel>,
    payload: PromotionPayload,
    pacing: Duration,
}

impl BroadcastDispatcher {
    pub fn new(
        registry: Arc<RecipientRegistry>,
        channel: Arc<dyn PromotionDeliveryChannel>,
        payload: PromotionPayload,
    ) -> Self {
        Self {
            registry,
            channel,
            payload,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sends the payload once to every recipient registered when the cycle
    /// starts. Recipients registered while the cycle runs wait for the next one.
    pub async fn run_cycle(&self) -> BroadcastReport {
        let recipients = self.registry.snapshot().await;
        let mut report = BroadcastReport::default();
        if recipients.is_empty() {
            log::info!("No recipients registered, skipping broadcast");
            return report;
        }

        log::info!("Starting broadcast to {} recipients", recipients.len());

        let total = recipients.len();
        for recipient in recipients {
            report.attempted += 1;
            match self.channel.deliver(recipient, &self.payload).await {
                DeliveryOutcome::Delivered => {
                    report.delivered += 1;
                }
                DeliveryOutcome::PermanentFailure(reason) => {
                    log::info!(
                        "Removing unreachable recipient. [recipient = {}, reason = {}]",
                        recipient,
                        reason
                    );
                    if self.registry.remove(recipient).await {
                        report.removed += 1;
                    }
                }
                DeliveryOutcome::TransientFailure(reason) => {
                    log::warn!(
                        "Could not deliver broadcast. [recipient = {}, reason = {}]",
                        recipient,
                        reason
                    );
                    report.failed += 1;
                }
            }

            if report.attempted < total {
                tokio::time::sleep(self.pacing).await;
            }
        }

        if report.removed > 0 {
            self.registry.persist().await;
        }

        log::info!(
            "Broadcast finished. [attempted = {}, delivered = {}, removed = {}, failed = {}]",
            report.attempted,
            report.delivered,
            report.removed,
            report.failed
        );

        report
    }
}
