use async_trait::async_trait;

use crate::recipient::RecipientId;

/// Promotional message sent to every recipient of a broadcast cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPayload {
    pub text: String,
    pub button_label: String,
    pub button_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The recipient can not be reached again until it contacts the bot.
    PermanentFailure(String),
    TransientFailure(String),
}

#[async_trait]
pub trait PromotionDeliveryChannel: Send + Sync + 'static {
    async fn deliver(&self, recipient: RecipientId, payload: &PromotionPayload) -> DeliveryOutcome;
}
