//! Utility functions

pub mod logger;

pub use logger::{init_logger, init_logger_with_file};

/// Current instant as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
