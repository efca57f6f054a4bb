//! # 工具函数模块
//!
//! 提供美化输出、日志初始化、shell 引用与内存单位处理等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `engine/` 模块使用
//! - 子模块: logging, output, shell, units

pub mod logging;
pub mod output;
pub mod shell;
pub mod units;
