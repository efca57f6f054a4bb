//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。qsubmit 没有子命令，所有选项位于顶层，
//! 第一个位置参数之后的内容全部属于要提交的命令。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/submit.rs`

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

use crate::models::{DEFAULT_JOB_NAME, DEFAULT_MEM};

/// qsubmit - 批处理引擎作业提交包装器
#[derive(Parser, Debug, Clone)]
#[command(name = "qsubmit")]
#[command(version)]
#[command(about = "Batch engine script submission wrapper", long_about = None)]
pub struct Cli {
    /// Override location detection
    #[arg(long, env = "QSUBMIT_LOCATION")]
    pub location: Option<String>,

    /// Use the given batch engine (instead of location default)
    #[arg(long, env = "QSUBMIT_ENGINE")]
    pub engine: Option<String>,

    /// Run interactive shell instead of batch command
    #[arg(short, long)]
    pub interactive: bool,

    /// Job name
    #[arg(short, long, visible_alias = "jobname", default_value = DEFAULT_JOB_NAME)]
    pub name: String,

    /// Name of the queue to send the command to
    #[arg(short, long)]
    pub queue: Option<String>,

    /// Number of CPU cores to use
    #[arg(short, long, visible_alias = "cores", default_value_t = 1)]
    pub cpus: u32,

    /// Number of GPUs to use
    #[arg(short, long, default_value_t = 0)]
    pub gpus: u32,

    /// Amount of GPU memory to use
    #[arg(short = 'M', long)]
    pub gpu_mem: Option<String>,

    /// Amount of memory to use
    #[arg(short, long, default_value = DEFAULT_MEM)]
    pub mem: String,

    /// Directory where the log file will be stored
    #[arg(short, long)]
    pub logdir: Option<PathBuf>,

    /// Hold until jobs with the given IDs are completed
    #[arg(
        short = 'w',
        long,
        visible_alias = "wait",
        value_name = "JOB_ID",
        num_args = 0..,
        action = ArgAction::Append
    )]
    pub hold: Vec<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// The arguments for the command to be run
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// 唯一的必填检查：非交互模式必须给出命令
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.command.is_empty() && !self.interactive {
            return Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "Cannot run with an empty batch job (use -i or input command).",
            ));
        }
        Ok(())
    }
}
