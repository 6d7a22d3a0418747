pub mod error;
pub mod logger;
pub mod validation;

use chrono::Utc;

/// Current UTC time, second precision, `Z` suffix.
pub fn iso_time_now() -> String {
    Utc::now().format(validation::TIMESTAMP_FORMAT).to_string()
}
