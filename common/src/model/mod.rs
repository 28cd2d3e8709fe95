pub mod account;
pub mod attendance;
pub mod logbook;
pub mod report;
pub mod rich_text;
