#[cfg(feature = "cli")]
pub mod cli;
pub mod file;
pub mod lambda;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use file::{AppConfig, StoreBackend, StoreConfig};
pub use lambda::LambdaConfig;
