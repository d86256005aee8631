use breach_accounts::config::cli::read_accounts_file;
use breach_accounts::config::{CliConfig, Command, StoreBackend};
use breach_accounts::core::merger::success_message;
use breach_accounts::utils::error::ErrorCategory;
use breach_accounts::utils::{logger, validation::Validate};
use breach_accounts::{AccountBreachMerger, AccountStore, BreachError, LocalStore, Result};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting breach-accounts CLI");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => 1,
            ErrorCategory::Storage | ErrorCategory::Internal => 2,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.app_config()?;

    // 驗證配置
    config.validate()?;

    match config.store.backend {
        StoreBackend::Local => {
            tracing::info!("📁 Using local store at {}", config.store.path);
            let merger = AccountBreachMerger::new(LocalStore::new(&config.store.path));
            run_command(&merger, &cli.command).await
        }
        #[cfg(feature = "aws")]
        StoreBackend::Dynamodb => {
            let store = breach_accounts::DynamoDbStore::connect(
                config.table_name().to_string(),
                config.store.region.clone(),
            )
            .await;
            run_command(&AccountBreachMerger::new(store), &cli.command).await
        }
        #[cfg(not(feature = "aws"))]
        StoreBackend::Dynamodb => Err(BreachError::Config {
            message: "the dynamodb backend requires building with the `aws` feature".to_string(),
        }),
    }
}

async fn run_command<S: AccountStore>(
    merger: &AccountBreachMerger<S>,
    command: &Command,
) -> Result<()> {
    match command {
        Command::Add {
            breach,
            emails,
            accounts_file,
        } => {
            let mut accounts = emails.clone();
            if let Some(path) = accounts_file {
                accounts.extend(read_accounts_file(path)?);
            }

            if accounts.is_empty() {
                return Err(BreachError::MissingConfig {
                    field: "emails or --accounts-file".to_string(),
                });
            }

            let count = merger.apply(&accounts, breach).await?;
            println!("✅ {}", success_message(count, breach));
        }
        Command::Show { email } => match merger.lookup(email).await? {
            Some(record) => {
                println!("{}", record.account);
                for breach in &record.breaches {
                    println!("  - {}", breach);
                }
            }
            None => println!("No breaches recorded for {}", email),
        },
    }

    Ok(())
}
