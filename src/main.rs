//! # qsubmit - 批处理引擎作业提交包装器
//!
//! 把命令行选项（队列、CPU/GPU、内存、日志目录、依赖、交互模式）
//! 规范化后交给批处理引擎，并报告作业 ID。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli.rs      (命令行参数定义)
//!   ├── commands/   (规范化与提交逻辑)
//!   │     ├── location.rs (位置检测)
//!   │     ├── engine/     (slurm, sge, console)
//!   │     └── models/     (提交请求)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod engine;
mod error;
mod location;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }

    utils::logging::init(cli.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(e.exit_code());
    }
}
