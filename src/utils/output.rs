//! # 美化输出工具
//!
//! 提供统一的终端输出样式。qsubmit 的所有诊断信息都写到 stderr，
//! stdout 留给被运行的命令。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}
