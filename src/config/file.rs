use crate::utils::error::{BreachError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_path, validate_required_field, validate_table_name, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_STORE_PATH: &str = "./data/breaches.json";
pub const DEFAULT_TABLE_NAME: &str = "Breaches";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Local,
    Dynamodb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_store_path")]
    pub path: String,
    pub table_name: Option<String>,
    pub region: Option<String>,
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            table_name: None,
            region: None,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，`${VAR}` 會以環境變數取代
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| BreachError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn table_name(&self) -> &str {
        self.store.table_name.as_deref().unwrap_or(DEFAULT_TABLE_NAME)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        match self.store.backend {
            StoreBackend::Local => validate_path("store.path", &self.store.path)?,
            StoreBackend::Dynamodb => {
                let table_name =
                    validate_required_field("store.table_name", &self.store.table_name)?;
                validate_table_name("store.table_name", table_name)?;
            }
        }

        if let Some(region) = &self.store.region {
            validate_aws_region("store.region", region)?;
        }

        Ok(())
    }
}
