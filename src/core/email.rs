use crate::domain::model::EmailIdentity;
use crate::utils::error::{BreachError, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

// 本地部分允許常見標點；網域每段 1-63 字元，連字號不可在首尾
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Validates `raw` and splits it into alias and domain.
pub fn parse(raw: &str) -> Result<EmailIdentity> {
    let invalid = || BreachError::InvalidEmail {
        email: raw.to_string(),
    };

    if !EMAIL_RE.is_match(raw) {
        return Err(invalid());
    }

    let (alias, domain) = raw.split_once('@').ok_or_else(invalid)?;
    Ok(EmailIdentity {
        alias: alias.to_string(),
        domain: domain.to_string(),
    })
}

/// Parses the whole batch, stopping at the first invalid address.
pub fn parse_all<T: AsRef<str>>(raw_emails: &[T]) -> Result<Vec<EmailIdentity>> {
    raw_emails.iter().map(|raw| parse(raw.as_ref())).collect()
}

impl FromStr for EmailIdentity {
    type Err = BreachError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
