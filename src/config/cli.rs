use crate::config::file::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::validate_path;
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "breach-accounts")]
#[command(about = "Record which accounts appear in which data breaches")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the JSON file used by the local store
    #[arg(long, global = true)]
    pub store_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add accounts to a breach
    Add {
        /// Breach name
        #[arg(short, long)]
        breach: String,

        /// Email addresses to add
        emails: Vec<String>,

        /// File with one email address per line
        #[arg(long)]
        accounts_file: Option<String>,
    },
    /// Show the breaches recorded for an account
    Show { email: String },
}

impl CliConfig {
    /// Configuration file (or defaults) with command-line overrides applied.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(store_path) = &self.store_path {
            config.store.path = store_path.clone();
        }

        Ok(config)
    }
}

/// Reads newline-separated addresses, skipping blank lines and `#` comments.
pub fn read_accounts_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    validate_path("accounts_file", &path.as_ref().to_string_lossy())?;
    let content = std::fs::read_to_string(path)?;
    Ok(parse_accounts_list(&content))
}

pub fn parse_accounts_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::{StoreBackend, DEFAULT_STORE_PATH};

    #[test]
    fn test_parse_add_command() {
        let cli = CliConfig::try_parse_from([
            "breach-accounts",
            "add",
            "--breach",
            "BigLeak",
            "a@example.com",
            "b@example.com",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Add { breach, emails, accounts_file } => {
                assert_eq!(breach, "BigLeak");
                assert_eq!(emails, vec!["a@example.com", "b@example.com"]);
                assert!(accounts_file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_breach() {
        assert!(CliConfig::try_parse_from(["breach-accounts", "add", "a@example.com"]).is_err());
    }

    #[test]
    fn test_store_path_override() {
        let cli = CliConfig::try_parse_from([
            "breach-accounts",
            "--store-path",
            "/tmp/override.json",
            "show",
            "a@example.com",
        ])
        .unwrap();

        let config = cli.app_config().unwrap();
        assert_eq!(config.store.backend, StoreBackend::Local);
        assert_eq!(config.store.path, "/tmp/override.json");

        let cli = CliConfig::try_parse_from(["breach-accounts", "show", "a@example.com"]).unwrap();
        assert_eq!(cli.app_config().unwrap().store.path, DEFAULT_STORE_PATH);
    }

    #[test]
    fn test_parse_accounts_list() {
        let accounts = parse_accounts_list("# leaked list\na@example.com\n\n  b@example.com  \n");
        assert_eq!(accounts, vec!["a@example.com", "b@example.com"]);
    }
}
