use async_trait::async_trait;
use teloxide::{
    ApiError, RequestError,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};

use crate::{
    broadcast::{DeliveryOutcome, PromotionDeliveryChannel, PromotionPayload},
    recipient::RecipientId,
};

pub struct TelegramDeliveryChannel {
    bot: Bot,
}

impl TelegramDeliveryChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl PromotionDeliveryChannel for TelegramDeliveryChannel {
    async fn deliver(&self, recipient: RecipientId, payload: &PromotionPayload) -> DeliveryOutcome {
        let url = match payload.button_url.parse() {
            Ok(url) => url,
            Err(error) => {
                return DeliveryOutcome::TransientFailure(format!(
                    "invalid button url {}: {}",
                    payload.button_url, error
                ));
            }
        };
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
            payload.button_label.clone(),
            url,
        )]]);

        let result = self
            .bot
            .send_message(recipient.chat_id(), payload.text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await;

        match result {
            Ok(_) => DeliveryOutcome::Delivered,
            Err(error) => classify_error(&error),
        }
    }
}

/// Telegram answers "Forbidden" when the chat is gone for good; everything
/// else may succeed on a later cycle.
pub fn classify_error(error: &RequestError) -> DeliveryOutcome {
    match error {
        RequestError::Api(
            ApiError::BotBlocked
            | ApiError::BotKicked
            | ApiError::BotKickedFromSupergroup
            | ApiError::UserDeactivated
            | ApiError::CantInitiateConversation,
        ) => DeliveryOutcome::PermanentFailure(error.to_string()),
        _ => DeliveryOutcome::TransientFailure(error.to_string()),
    }
}
