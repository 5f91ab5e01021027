use std::{sync::Arc, time::Duration};

use anyhow::ensure;
use redirect_bot::{
    appsettings::AppSettings,
    broadcast::{BroadcastDispatcher, BroadcastSchedule, BroadcastScheduler},
    registry::RecipientRegistry,
    storage::{InMemoryRegistryStorage, JsonFileRegistryStorage, RegistryStorage},
    telegram::{RedirectTarget, TelegramDeliveryChannel, TelegramInteractionInterface},
};
use teloxide::Bot;

const SCHEDULER_STOP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let settings = AppSettings::new()?;
    ensure!(
        !settings.telegram.token.trim().is_empty(),
        "telegram.token is not configured."
    );

    let bot = Bot::new(&settings.telegram.token);
    let target = RedirectTarget::new(settings.redirect.target_bot.clone());
    let registry = Arc::new(RecipientRegistry::restore(registry_storage(&settings.storage.registry_path)).await?);

    let scheduler = if settings.broadcast.enabled {
        let channel = Arc::new(TelegramDeliveryChannel::new(bot.clone()));
        let payload = target.promotion_payload(settings.broadcast.text.clone());
        let dispatcher = BroadcastDispatcher::new(Arc::clone(&registry), channel, payload)
            .with_pacing(settings.broadcast.pacing());
        let schedule = BroadcastSchedule {
            first_delay: settings.broadcast.first_delay(),
            interval: settings.broadcast.interval(),
        };

        Some(BroadcastScheduler::start(Arc::new(dispatcher), schedule)?)
    } else {
        log::info!("Broadcast is disabled");
        None
    };

    TelegramInteractionInterface::start(bot, Arc::clone(&registry), target).await;

    if let Some(scheduler) = scheduler {
        scheduler.stop(SCHEDULER_STOP_TIMEOUT).await;
    }
    registry.persist().await;
    log::info!("Bot stopped with {} registered recipients", registry.len().await);

    Ok(())
}

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

fn registry_storage(path: &str) -> Arc<dyn RegistryStorage> {
    if path.is_empty() {
        log::warn!("storage.registry_path is empty, the registry will not survive restarts");
        return Arc::new(InMemoryRegistryStorage::new());
    }

    let storage = JsonFileRegistryStorage::new(path);
    log::info!("Using registry file {}", storage.path().display());
    Arc::new(storage)
}
