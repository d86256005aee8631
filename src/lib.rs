pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "aws")]
pub use adapters::DynamoDbStore;

pub use adapters::{InMemoryStore, LocalStore};
pub use app::handle_add_accounts;
pub use crate::core::merger::AccountBreachMerger;
pub use domain::model::{AccountRecord, AddAccountsRequest, ApiResponse, EmailIdentity, RecordKey};
pub use domain::ports::AccountStore;
pub use utils::error::{BreachError, Result, StoreError};
