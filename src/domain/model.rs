use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Discriminator stored in every account item's `Type` attribute.
pub const ACCOUNT_ENTITY_TYPE: &str = "Account";

/// Prefix shared by the partition and sort keys of account items.
pub const EMAIL_KEY_PREFIX: &str = "EMAIL#";

/// A validated `alias@domain` pair. Build it with [`crate::core::email::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailIdentity {
    pub(crate) alias: String,
    pub(crate) domain: String,
}

impl EmailIdentity {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn account_string(&self) -> String {
        format!("{}@{}", self.alias, self.domain)
    }

    pub fn partition_key(&self) -> String {
        format!("{}{}", EMAIL_KEY_PREFIX, self.domain)
    }

    pub fn sort_key(&self) -> String {
        format!("{}{}", EMAIL_KEY_PREFIX, self.alias)
    }

    pub fn record_key(&self) -> RecordKey {
        RecordKey {
            partition_key: self.partition_key(),
            sort_key: self.sort_key(),
        }
    }
}

impl fmt::Display for EmailIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.alias, self.domain)
    }
}

/// Composite primary key of a stored item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub partition_key: String,
    pub sort_key: String,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.sort_key)
    }
}

/// One account-to-breaches association as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "PK")]
    pub partition_key: String,
    #[serde(rename = "SK")]
    pub sort_key: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Breaches", default)]
    pub breaches: BTreeSet<String>,
}

impl AccountRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            partition_key: self.partition_key.clone(),
            sort_key: self.sort_key.clone(),
        }
    }

    pub fn has_breach(&self, breach_name: &str) -> bool {
        self.breaches.contains(breach_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathParameters {
    #[serde(
        rename = "BreachName",
        alias = "breachName",
        alias = "breach_name",
        default,
        deserialize_with = "null_as_default"
    )]
    pub breach_name: String,
}

/// Inbound event as delivered by API Gateway: the account list in the body
/// and the breach name as a path parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddAccountsEvent {
    #[serde(
        rename = "Accounts",
        alias = "accounts",
        default,
        deserialize_with = "null_as_default"
    )]
    pub accounts: Vec<String>,
    #[serde(
        rename = "PathParameters",
        alias = "pathParameters",
        alias = "path_parameters",
        default,
        deserialize_with = "null_as_default"
    )]
    pub path_parameters: PathParameters,
}

// API Gateway 會送出明確的 null（例如沒有路徑參數時）
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Transport-neutral request consumed by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAccountsRequest {
    pub accounts: Vec<String>,
    pub breach_name: String,
}

impl From<AddAccountsEvent> for AddAccountsRequest {
    fn from(event: AddAccountsEvent) -> Self {
        Self {
            accounts: event.accounts,
            breach_name: event.path_parameters.breach_name,
        }
    }
}

/// API Gateway proxy integration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    pub fn json(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
