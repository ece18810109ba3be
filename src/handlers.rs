pub mod dashboard;
pub mod database;
pub mod inventory;
pub mod obras;
pub mod settings;
