use teloxide::{
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::html,
};

use crate::broadcast::PromotionPayload;

pub const START_BUTTON_LABEL: &str = "🔥 CLICK HERE FOR MAIN BOT 🔥";
pub const GO_BUTTON_LABEL: &str = "🔥 GO TO MAIN BOT 🔥";
pub const CALLBACK_NOTICE: &str = "Redirecting to main bot...";

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━";

/// The bot every reply points to, e.g. `@polyssightsbot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    bot_name: String,
}

impl RedirectTarget {
    pub fn new(bot_name: impl Into<String>) -> Self {
        let bot_name = bot_name.into();
        let bot_name = if bot_name.starts_with('@') {
            bot_name
        } else {
            format!("@{}", bot_name)
        };

        Self { bot_name }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn url(&self) -> String {
        format!("https://t.me/{}", self.bot_name.trim_start_matches('@'))
    }

    pub fn keyboard(&self, label: &str) -> anyhow::Result<InlineKeyboardMarkup> {
        let url = self.url().parse()?;
        Ok(InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::url(label, url),
        ]]))
    }

    fn highlighted_name(&self) -> String {
        format!("👉 <b>{}</b> 👈", html::escape(&self.bot_name))
    }

    pub fn welcome_text(&self) -> String {
        format!(
            "🌟 <b>MAIN BOT</b> 🌟\n\n{SEPARATOR}\n\n🔥 <b>Click below to visit our main bot:</b>\n\n{}\n\n{SEPARATOR}\n\n<i>This bot only redirects to our main analytics bot.</i>",
            self.highlighted_name()
        )
    }

    pub fn help_text(&self) -> String {
        format!(
            "ℹ️ <b>HELP</b>\n\nThis bot redirects you to our main analytics bot:\n\n{}\n\nClick the button below or use /start",
            self.highlighted_name()
        )
    }

    pub fn redirect_text(&self) -> String {
        format!(
            "💡 <b>Looking for our main bot?</b>\n\n{}\n\nClick below or use /start",
            self.highlighted_name()
        )
    }

    pub fn fallback_text(&self) -> String {
        format!("Error. Please visit: {}", self.bot_name)
    }

    pub fn default_promotion_text(&self) -> String {
        format!(
            "📣 <b>Don't miss the latest insights!</b>\n\nOur main analytics bot is waiting for you:\n\n{}",
            self.highlighted_name()
        )
    }

    pub fn promotion_payload(&self, text: Option<String>) -> PromotionPayload {
        PromotionPayload {
            text: text.unwrap_or_else(|| self.default_promotion_text()),
            button_label: GO_BUTTON_LABEL.to_string(),
            button_url: self.url(),
        }
    }
}

/// Plain text that does not look like a command gets the redirect reply.
pub fn should_redirect(text: Option<&str>) -> bool {
    text.is_some_and(|text| !text.starts_with('/'))
}
