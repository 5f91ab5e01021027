use std::sync::Arc;

use teloxide::{dptree::deps, types::ChatId};
use teloxide_tests::{MockBot, mock_bot::DistributionKey};

use crate::{
    recipient::RecipientId,
    registry::RecipientRegistry,
    storage::InMemoryRegistryStorage,
    telegram::RedirectTarget,
};

pub type TestBot = MockBot<anyhow::Error, DistributionKey>;

pub const TARGET_BOT: &str = "@polyssightsbot";

pub async fn registry() -> Arc<RecipientRegistry> {
    let storage = Arc::new(InMemoryRegistryStorage::new());
    Arc::new(RecipientRegistry::restore(storage).await.unwrap())
}

pub fn with_dependencies(mut bot: TestBot, registry: &Arc<RecipientRegistry>) -> TestBot {
    bot.dependencies(deps![Arc::clone(registry), RedirectTarget::new(TARGET_BOT)]);
    bot
}

pub fn sent_texts(bot: &TestBot) -> Vec<String> {
    bot.get_responses()
        .sent_messages
        .iter()
        .filter_map(|message| message.text().map(str::to_string))
        .collect()
}

pub fn recipient(chat_id: ChatId) -> RecipientId {
    chat_id.into()
}
