pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{FileStateStore, HttpPageFetcher, SmtpSender};
pub use config::CheckerConfig;
pub use crate::core::checker::{is_available, CheckSettings, Checker};
pub use domain::model::{Availability, Notification, RunOutcome};
pub use utils::error::{CheckerError, Result};
