//! # 命令执行模块
//!
//! 实现 qsubmit 的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli.rs`, `engine/`, `location.rs`, `models/`
//! - 子模块: submit

pub mod submit;

use crate::cli::Cli;
use crate::error::Result;
use crate::location::HostLocation;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    submit::execute(cli, &HostLocation)
}
