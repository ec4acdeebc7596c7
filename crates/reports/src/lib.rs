pub mod aggregation;
pub mod command;
pub mod format;
pub mod growth;
pub mod service;
pub mod settings;
pub mod store;
pub mod vaccination;

pub use service::{ChatInfo, Reports};
pub use settings::Settings;
pub use store::StatsStore;
