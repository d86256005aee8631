use crate::core::email;
use crate::core::merge::{build_record, merge_breach};
use crate::domain::model::AccountRecord;
use crate::domain::ports::AccountStore;
use crate::utils::error::{BreachError, Result};
use tracing::Instrument;

/// Adds a breach to a batch of accounts, one read-merge-write per account.
///
/// The cycle is not conditional: a concurrent writer on the same account
/// between our `get` and `put` is overwritten.
pub struct AccountBreachMerger<S: AccountStore> {
    store: S,
}

impl<S: AccountStore> AccountBreachMerger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the number of accounts processed.
    ///
    /// Every email is validated before the store is touched. Store failures
    /// abort the batch; accounts written before the failure stay written.
    pub async fn apply<T: AsRef<str>>(
        &self,
        raw_emails: &[T],
        breach_name: &str,
    ) -> Result<usize> {
        let span = tracing::info_span!("apply", breach = %breach_name, batch = raw_emails.len());
        self.apply_batch(raw_emails, breach_name)
            .instrument(span)
            .await
    }

    async fn apply_batch<T: AsRef<str>>(
        &self,
        raw_emails: &[T],
        breach_name: &str,
    ) -> Result<usize> {
        let identities = email::parse_all(raw_emails)?;

        for identity in &identities {
            let account = identity.account_string();
            let key = identity.record_key();

            let existing = self
                .store
                .get(&key)
                .await
                .map_err(|source| BreachError::StoreRead {
                    account: account.clone(),
                    source,
                })?;

            let already_listed = existing
                .as_ref()
                .is_some_and(|record| record.has_breach(breach_name));
            let record = build_record(identity, merge_breach(existing.as_ref(), breach_name));

            self.store
                .put(&record)
                .await
                .map_err(|source| BreachError::StoreWrite {
                    account: account.clone(),
                    source,
                })?;

            tracing::debug!(
                account = %account,
                created = existing.is_none(),
                already_listed,
                "account updated"
            );
        }

        tracing::info!("✅ Added {} accounts to breach {}", identities.len(), breach_name);
        Ok(identities.len())
    }

    /// Current record for one account, if any.
    pub async fn lookup(&self, raw_email: &str) -> Result<Option<AccountRecord>> {
        let identity = email::parse(raw_email)?;
        self.store
            .get(&identity.record_key())
            .await
            .map_err(|source| BreachError::StoreRead {
                account: identity.account_string(),
                source,
            })
    }
}

pub fn success_message(count: usize, breach_name: &str) -> String {
    format!(
        "Successfully added/updated {} accounts to the {} breach.",
        count, breach_name
    )
}
