pub mod admin;
pub mod charts;
pub mod dashboard;

pub use admin::AdminPanel;
pub use dashboard::Dashboard;
