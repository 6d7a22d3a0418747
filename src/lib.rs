pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::Defaults;
pub use domain::model::{MaintenanceEntry, MaintenanceReport};
pub use utils::error::{MaintenanceError, Result};
