mod delivery;
mod dispatcher;
mod scheduler;

pub use delivery::{DeliveryOutcome, PromotionDeliveryChannel, PromotionPayload};
pub use dispatcher::{BroadcastDispatcher, BroadcastReport};
pub use scheduler::{BroadcastSchedule, BroadcastScheduler};
