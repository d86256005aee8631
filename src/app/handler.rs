use crate::core::merger::{success_message, AccountBreachMerger};
use crate::domain::model::{AddAccountsRequest, ApiResponse, MessageBody};
use crate::domain::ports::AccountStore;
use crate::utils::error::{BreachError, Result};

/// Runs one add-accounts request and always answers with a response; failures
/// become a JSON error body with the matching status code.
pub async fn handle_add_accounts<S: AccountStore>(
    merger: &AccountBreachMerger<S>,
    request: AddAccountsRequest,
) -> ApiResponse {
    match add_accounts(merger, &request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                "❌ Adding accounts to {} failed: {} (Category: {:?})",
                request.breach_name,
                e,
                e.category()
            );
            error_response(&e)
        }
    }
}

async fn add_accounts<S: AccountStore>(
    merger: &AccountBreachMerger<S>,
    request: &AddAccountsRequest,
) -> Result<ApiResponse> {
    let count = merger
        .apply(&request.accounts, &request.breach_name)
        .await?;

    let body = serde_json::to_string(&MessageBody {
        message: success_message(count, &request.breach_name),
    })?;
    Ok(ApiResponse::json(200, body))
}

pub fn error_response(error: &BreachError) -> ApiResponse {
    let message = match error {
        BreachError::InvalidEmail { .. } => format!("Invalid email: {}", error),
        BreachError::StoreRead { .. } => format!("Error reading existing Account: {}", error),
        BreachError::StoreWrite { .. } => format!("Error adding Account to breach: {}", error),
        _ => error.to_string(),
    };

    // MessageBody 只有一個字串欄位，序列化不會失敗
    let body = serde_json::to_string(&MessageBody { message })
        .unwrap_or_else(|_| r#"{"message":"internal error"}"#.to_string());
    ApiResponse::json(error.status_code(), body)
}
