//! # 日志初始化
//!
//! 基于 `tracing-subscriber`，输出到 stderr。级别来自 `QSUBMIT_LOG`
//! （`EnvFilter` 语法，默认 `warn`），`-v` / `-vv` 覆盖为 debug / trace。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `utils/output.rs` 报告无效的过滤表达式

use tracing_subscriber::EnvFilter;

use super::output;

/// 日志级别环境变量
pub const LOG_ENV: &str = "QSUBMIT_LOG";

fn filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => {}
        1 => return EnvFilter::new("debug"),
        _ => return EnvFilter::new("trace"),
    }

    match std::env::var(LOG_ENV) {
        Ok(spec) => EnvFilter::try_new(&spec).unwrap_or_else(|e| {
            output::print_warning(&format!("Ignoring invalid {}={:?}: {}", LOG_ENV, spec, e));
            EnvFilter::new("warn")
        }),
        Err(_) => EnvFilter::new("warn"),
    }
}

/// 安装全局 subscriber
pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
