pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod data_service;
pub use data_service::DataService;
pub mod theme_service;
pub use theme_service::ThemeService;
