pub mod appsettings;
pub mod broadcast;
pub mod recipient;
pub mod registry;
pub mod storage;
pub mod telegram;
