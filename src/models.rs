pub mod dashboard;
pub mod inventory;
pub mod obras;
pub mod settings;
