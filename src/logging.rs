//! ログ初期化

use tracing_subscriber::EnvFilter;

/// 標準エラー出力へのログを初期化
///
/// `RUST_LOG` が設定されていればそれを優先する。
/// 未設定の場合は `warn`、詳細モードでは `momentum=debug`。
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info,momentum=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
