#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod events;
pub mod infra;
pub mod repos;
pub mod scheduler;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use db::connect_db;
pub use domain::{BlindLevel, BlindStructure, Clock, ManualClock, SystemClock};
pub use error::AppError;
pub use events::{EventBus, MatchNotification, MatchObserver};
pub use services::match_flow::MatchDetails;
pub use services::{MatchFlowService, RegistrationService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
