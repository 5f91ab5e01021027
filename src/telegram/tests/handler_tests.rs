use teloxide_tests::{MockBot, MockCallbackQuery, MockMessagePhoto, MockMessageText};

use super::test_utils::*;
use crate::telegram::schema;

#[tokio::test]
async fn start_registers_chat_and_replies_with_link() {
    let registry = registry().await;
    let message = MockMessageText::new().text("/start");
    let chat_id = message.chat.id;
    let mut bot = with_dependencies(MockBot::new(message, schema()), &registry);

    bot.dispatch().await;

    assert!(registry.contains(recipient(chat_id)).await);
    let responses = bot.get_responses();
    let reply = responses
        .sent_messages
        .last()
        .expect("The bot should reply to /start.");
    assert!(reply.text().unwrap_or_default().contains(TARGET_BOT));
    assert!(reply.reply_markup().is_some(), "The reply should carry the link button.");
}

#[tokio::test]
async fn help_registers_chat_and_replies_with_link() {
    let registry = registry().await;
    let message = MockMessageText::new().text("/help");
    let chat_id = message.chat.id;
    let mut bot = with_dependencies(MockBot::new(message, schema()), &registry);

    bot.dispatch().await;

    assert!(registry.contains(recipient(chat_id)).await);
    let texts = sent_texts(&bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("HELP"));
}

#[tokio::test]
async fn plain_text_registers_chat_and_gets_redirect() {
    let registry = registry().await;
    let message = MockMessageText::new().text("where is the main bot?");
    let chat_id = message.chat.id;
    let mut bot = with_dependencies(MockBot::new(message, schema()), &registry);

    bot.dispatch().await;

    assert!(registry.contains(recipient(chat_id)).await);
    let texts = sent_texts(&bot);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Looking for our main bot?"));
}

#[tokio::test]
async fn unknown_command_registers_chat_without_reply() {
    let registry = registry().await;
    let message = MockMessageText::new().text("/subscribe");
    let chat_id = message.chat.id;
    let mut bot = with_dependencies(MockBot::new(message, schema()), &registry);

    bot.dispatch().await;

    assert!(registry.contains(recipient(chat_id)).await);
    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
async fn non_text_message_registers_chat_without_reply() {
    let registry = registry().await;
    let message = MockMessagePhoto::new();
    let chat_id = message.chat.id;
    let mut bot = with_dependencies(MockBot::new(message, schema()), &registry);

    bot.dispatch().await;

    assert!(registry.contains(recipient(chat_id)).await);
    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
async fn repeated_messages_register_chat_once() {
    let registry = registry().await;
    let message = MockMessageText::new().text("hello");
    let mut bot = with_dependencies(MockBot::new(message, schema()), &registry);

    bot.dispatch().await;
    bot.update(MockMessageText::new().text("/start"));
    bot.dispatch().await;

    assert_eq!(registry.len().await, 1);
}

#[tokio::test]
async fn callback_query_is_answered() {
    let registry = registry().await;
    let query = MockCallbackQuery::new().data("redirect");
    let mut bot = with_dependencies(MockBot::new(query, schema()), &registry);

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.answered_callback_queries.len(), 1);
    assert!(responses.sent_messages.is_empty());
    assert_eq!(registry.len().await, 0);
}
