use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "breach_accounts=info";
const VERBOSE_DIRECTIVE: &str = "breach_accounts=debug,info";

/// `RUST_LOG` wins over the built-in directive.
fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

// CLI 與 Lambda 共用的輸出欄位設定
fn base_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    let directive = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };

    tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(base_layer().compact())
        .init();
}

pub fn init_lambda_logger() {
    // CloudWatch 自帶時間戳，JSON 方便查詢
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVE))
        .with(base_layer().without_time().json())
        .init();
}
