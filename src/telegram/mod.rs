mod delivery_channel;
mod messages;
#[cfg(test)]
mod tests;

pub use delivery_channel::{TelegramDeliveryChannel, classify_error};
pub use messages::RedirectTarget;

use std::sync::Arc;

use teloxide::{
    dispatching::UpdateHandler, dptree::case, prelude::*, types::ParseMode,
    utils::command::BotCommands,
};

use crate::registry::RecipientRegistry;
use messages::{CALLBACK_NOTICE, GO_BUTTON_LABEL, START_BUTTON_LABEL, should_redirect};

type HandlerResult = anyhow::Result<()>;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum RedirectCommand {
    #[command(description = "show the link to the main bot")]
    Start,
    #[command(description = "show help")]
    Help,
}

pub struct TelegramInteractionInterface;
impl TelegramInteractionInterface {
    pub async fn start(bot: Bot, registry: Arc<RecipientRegistry>, target: RedirectTarget) {
        log::info!(
            "Starting Telegram interaction interface, redirecting to {}",
            target.bot_name()
        );

        prepare_bot(&bot).await;

        Dispatcher::builder(bot, schema())
            .dependencies(dptree::deps![registry, target])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await
    }
}

/// Long polling conflicts with a configured webhook, and updates queued while
/// the bot was down are not worth answering.
async fn prepare_bot(bot: &Bot) {
    match bot.delete_webhook().drop_pending_updates(true).await {
        Ok(_) => log::info!("Webhook removed, pending updates dropped"),
        Err(error) => log::error!("Could not remove webhook. error = {}", error),
    }

    if let Err(error) = bot.set_my_commands(RedirectCommand::bot_commands()).await {
        log::error!("Could not publish bot commands. error = {}", error);
    }
}

pub fn schema() -> UpdateHandler<anyhow::Error> {
    let command_handler = teloxide::filter_command::<RedirectCommand, _>()
        .branch(case![RedirectCommand::Start].endpoint(start))
        .branch(case![RedirectCommand::Help].endpoint(help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(redirect));

    let callback_handler = Update::filter_callback_query().endpoint(answer_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn start(
    bot: Bot,
    msg: Message,
    registry: Arc<RecipientRegistry>,
    target: RedirectTarget,
) -> HandlerResult {
    log::info!("Chat {} started the bot", msg.chat.id);
    registry.register(msg.chat.id.into()).await;
    reply_with_link(&bot, &msg, &target, target.welcome_text(), START_BUTTON_LABEL).await
}

async fn help(
    bot: Bot,
    msg: Message,
    registry: Arc<RecipientRegistry>,
    target: RedirectTarget,
) -> HandlerResult {
    registry.register(msg.chat.id.into()).await;
    reply_with_link(&bot, &msg, &target, target.help_text(), GO_BUTTON_LABEL).await
}

async fn redirect(
    bot: Bot,
    msg: Message,
    registry: Arc<RecipientRegistry>,
    target: RedirectTarget,
) -> HandlerResult {
    registry.register(msg.chat.id.into()).await;
    if !should_redirect(msg.text()) {
        return Ok(());
    }

    reply_with_link(&bot, &msg, &target, target.redirect_text(), GO_BUTTON_LABEL).await
}

async fn answer_callback(bot: Bot, query: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(query.id)
        .text(CALLBACK_NOTICE)
        .await?;
    Ok(())
}

async fn reply_with_link(
    bot: &Bot,
    msg: &Message,
    target: &RedirectTarget,
    text: String,
    button_label: &str,
) -> HandlerResult {
    let result = async {
        let keyboard = target.keyboard(button_label)?;
        bot.send_message(msg.chat.id, text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;
        anyhow::Ok(())
    }
    .await;

    if let Err(error) = result {
        log::error!(
            "Could not send reply. [chat = {}, error = {}]",
            msg.chat.id,
            error
        );
        bot.send_message(msg.chat.id, target.fallback_text()).await?;
    }

    Ok(())
}
