use crate::config::file::DEFAULT_TABLE_NAME;
use crate::utils::error::Result;
use crate::utils::validation::{validate_aws_region, validate_table_name, Validate};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub table_name: String,
    pub region: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            table_name: lookup("TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            region: lookup("AWS_REGION").filter(|r| !r.is_empty()),
        }
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_table_name("TABLE_NAME", &self.table_name)?;
        if let Some(region) = &self.region {
            validate_aws_region("AWS_REGION", region)?;
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
