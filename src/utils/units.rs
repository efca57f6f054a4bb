//! # 内存数量格式
//!
//! 把 `1g`、`512m` 之类的写法统一成调度器接受的 `1G`、`512M`。
//!
//! ## 依赖关系
//! - 被 `engine/slurm.rs`, `engine/sge.rs` 使用

use regex::Regex;
use std::sync::OnceLock;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i)\s*(?P<num>\d+(?:\.\d+)?)\s*(?P<unit>[kmgt])b?\s*$")
            .expect("memory amount pattern is valid")
    })
}

/// 规范化内存数量；无法识别的写法原样返回
pub fn normalize_mem(amount: &str) -> String {
    match amount_pattern().captures(amount) {
        Some(caps) => format!("{}{}", &caps["num"], caps["unit"].to_ascii_uppercase()),
        None => amount.to_string(),
    }
}
