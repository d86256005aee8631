use breach_accounts::config::LambdaConfig;
use breach_accounts::domain::model::AddAccountsEvent;
use breach_accounts::utils::{logger, validation::Validate};
use breach_accounts::{handle_add_accounts, AccountBreachMerger, ApiResponse, DynamoDbStore};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(
    merger: &AccountBreachMerger<DynamoDbStore>,
    event: LambdaEvent<AddAccountsEvent>,
) -> Result<ApiResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Adding accounts to breach");
    Ok(handle_add_accounts(merger, event.payload.into()).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env();
    lambda_config.validate()?;

    // 每個執行環境只建立一次 DynamoDB 客戶端
    let store = DynamoDbStore::connect(lambda_config.table_name, lambda_config.region).await;
    let merger = AccountBreachMerger::new(store);
    let merger = &merger;

    run(service_fn(move |event: LambdaEvent<AddAccountsEvent>| async move {
        function_handler(merger, event).await
    }))
    .await
}
