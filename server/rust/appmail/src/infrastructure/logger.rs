//! 構造化ログの初期化。
//! tracing-subscriber を使用し、JSON またはテキスト形式で出力する。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// default_filter は環境名からデフォルトのログレベルを決定する。
///
/// - dev: debug
/// - staging: info
/// - その他: warn
pub fn default_filter(env: &str) -> &'static str {
    match env {
        "dev" => "debug",
        "staging" => "info",
        _ => "warn",
    }
}

/// init_logger は tracing-subscriber を初期化する。
/// level が指定されていればそれを優先し、RUST_LOG が設定されていればさらに優先する。
/// format が "text" の場合はプレーンテキスト出力、それ以外は JSON 出力。
pub fn init_logger(env: &str, format: &str, level: Option<&str>) {
    let fallback = level.unwrap_or_else(|| default_filter(env));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "text" {
        registry.with(fmt::layer().with_target(true)).init();
    } else {
        registry.with(fmt::layer().json().with_target(true)).init();
    }
}
