use crate::domain::model::{AccountRecord, RecordKey};
use crate::domain::ports::AccountStore;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::collections::{BTreeSet, HashMap};

const ATTR_PK: &str = "PK";
const ATTR_SK: &str = "SK";
const ATTR_TYPE: &str = "Type";
const ATTR_ACCOUNT: &str = "Account";
const ATTR_BREACHES: &str = "Breaches";

#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Builds a client from the default AWS credential chain.
    pub async fn connect(table_name: String, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        tracing::info!("🔌 Using DynamoDB table {}", table_name);
        Self::new(DynamoDbClient::new(&config), table_name)
    }
}

#[async_trait]
impl AccountStore for DynamoDbStore {
    async fn get(&self, key: &RecordKey) -> StoreResult<Option<AccountRecord>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ATTR_PK, AttributeValue::S(key.partition_key.clone()))
            .key(ATTR_SK, AttributeValue::S(key.sort_key.clone()))
            .send()
            .await
            .map_err(|e| {
                StoreError::Backend(format!("GetItem failed: {}", DisplayErrorContext(&e)))
            })?;

        output.item().map(item_to_record).transpose()
    }

    async fn put(&self, record: &AccountRecord) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| {
                StoreError::Backend(format!("PutItem failed: {}", DisplayErrorContext(&e)))
            })?;
        Ok(())
    }
}

/// `Breaches` goes out as a list of strings so an empty set is still writable.
pub fn record_to_item(record: &AccountRecord) -> HashMap<String, AttributeValue> {
    let breaches = record
        .breaches
        .iter()
        .map(|b| AttributeValue::S(b.clone()))
        .collect();

    HashMap::from([
        (ATTR_PK.to_string(), AttributeValue::S(record.partition_key.clone())),
        (ATTR_SK.to_string(), AttributeValue::S(record.sort_key.clone())),
        (ATTR_TYPE.to_string(), AttributeValue::S(record.entity_type.clone())),
        (ATTR_ACCOUNT.to_string(), AttributeValue::S(record.account.clone())),
        (ATTR_BREACHES.to_string(), AttributeValue::L(breaches)),
    ])
}

pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> StoreResult<AccountRecord> {
    Ok(AccountRecord {
        partition_key: string_attr(item, ATTR_PK)?,
        sort_key: string_attr(item, ATTR_SK)?,
        entity_type: string_attr(item, ATTR_TYPE)?,
        account: string_attr(item, ATTR_ACCOUNT)?,
        breaches: breaches_attr(item)?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> StoreResult<String> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(other) => Err(StoreError::MalformedItem(format!(
            "attribute {} is not a string: {:?}",
            name, other
        ))),
        None => Err(StoreError::MalformedItem(format!("missing attribute {}", name))),
    }
}

fn breaches_attr(item: &HashMap<String, AttributeValue>) -> StoreResult<BTreeSet<String>> {
    match item.get(ATTR_BREACHES) {
        None | Some(AttributeValue::Null(_)) => Ok(BTreeSet::new()),
        Some(AttributeValue::Ss(values)) => Ok(values.iter().cloned().collect()),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| match value {
                AttributeValue::S(name) => Ok(name.clone()),
                other => Err(StoreError::MalformedItem(format!(
                    "breach entry is not a string: {:?}",
                    other
                ))),
            })
            .collect(),
        Some(other) => Err(StoreError::MalformedItem(format!(
            "attribute {} is not a list: {:?}",
            ATTR_BREACHES, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::email::parse;
    use crate::core::merge::build_record;

    #[test]
    fn test_item_round_trip_keeps_attribute_names() {
        let identity = parse("bob@example.org").unwrap();
        let record = build_record(
            &identity,
            BTreeSet::from(["LeakA".to_string(), "LeakB".to_string()]),
        );

        let item = record_to_item(&record);
        assert_eq!(item.get("PK"), Some(&AttributeValue::S("EMAIL#example.org".into())));
        assert_eq!(item.get("SK"), Some(&AttributeValue::S("EMAIL#bob".into())));
        assert_eq!(item.get("Type"), Some(&AttributeValue::S("Account".into())));
        assert_eq!(item_to_record(&item).unwrap(), record);
    }

    #[test]
    fn test_string_set_breaches_are_accepted() {
        let mut item = record_to_item(&build_record(
            &parse("bob@example.org").unwrap(),
            BTreeSet::new(),
        ));
        item.insert(
            "Breaches".to_string(),
            AttributeValue::Ss(vec!["LeakA".into(), "LeakA".into()]),
        );

        let record = item_to_record(&item).unwrap();
        assert_eq!(record.breaches, BTreeSet::from(["LeakA".to_string()]));
    }

    #[test]
    fn test_absent_or_null_breaches_read_as_empty() {
        let mut item = record_to_item(&build_record(
            &parse("bob@example.org").unwrap(),
            BTreeSet::from(["LeakA".to_string()]),
        ));

        item.remove("Breaches");
        assert!(item_to_record(&item).unwrap().breaches.is_empty());

        item.insert("Breaches".to_string(), AttributeValue::Null(true));
        assert!(item_to_record(&item).unwrap().breaches.is_empty());

        item.insert("Breaches".to_string(), AttributeValue::S("LeakA".into()));
        assert!(item_to_record(&item).is_err());
    }

    #[test]
    fn test_malformed_item_is_rejected() {
        let mut item = record_to_item(&build_record(
            &parse("bob@example.org").unwrap(),
            BTreeSet::new(),
        ));
        item.insert("Account".to_string(), AttributeValue::N("1".into()));
        assert!(matches!(
            item_to_record(&item),
            Err(StoreError::MalformedItem(_))
        ));

        item.remove("Account");
        assert!(item_to_record(&item).is_err());
    }
}
