use crate::domain::model::{AccountRecord, EmailIdentity, ACCOUNT_ENTITY_TYPE};
use std::collections::BTreeSet;

/// Breach set after adding `breach_name` to whatever is already stored.
pub fn merge_breach(existing: Option<&AccountRecord>, breach_name: &str) -> BTreeSet<String> {
    let mut breaches = existing
        .map(|record| record.breaches.clone())
        .unwrap_or_default();
    breaches.insert(breach_name.to_string());
    breaches
}

pub fn build_record(identity: &EmailIdentity, breaches: BTreeSet<String>) -> AccountRecord {
    AccountRecord {
        partition_key: identity.partition_key(),
        sort_key: identity.sort_key(),
        entity_type: ACCOUNT_ENTITY_TYPE.to_string(),
        account: identity.account_string(),
        breaches,
    }
}
