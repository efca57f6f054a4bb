//! # 作业提交请求数据模型
//!
//! 规范化之后交给批处理引擎的参数集合。
//!
//! ## 依赖关系
//! - 由 `commands/submit.rs` 构造
//! - 被 `engine/` 各实现消费

use std::fmt;
use std::path::PathBuf;

/// 默认作业名
pub const DEFAULT_JOB_NAME: &str = "qsubmit";

/// 默认内存 / GPU 内存
pub const DEFAULT_MEM: &str = "1g";

/// 要运行的命令
///
/// 只有一个参数时按标量处理（交给 shell 解释），多个参数时按 argv 原样执行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobCommand {
    /// 单个字符串，由 `bash -c` 执行
    Shell(String),
    /// 程序及其参数
    Argv(Vec<String>),
}

impl JobCommand {
    /// 从命令行参数构造；空列表返回 `None`
    pub fn from_tokens(mut tokens: Vec<String>) -> Option<Self> {
        match tokens.len() {
            0 => None,
            1 => tokens.pop().map(JobCommand::Shell),
            _ => Some(JobCommand::Argv(tokens)),
        }
    }

    /// 作为进程参数列表（标量命令包装成 `bash -c`）
    pub fn to_argv(&self) -> Vec<String> {
        match self {
            JobCommand::Shell(line) => vec!["bash".to_string(), "-c".to_string(), line.clone()],
            JobCommand::Argv(args) => args.clone(),
        }
    }

    /// 作为单行 shell 命令（用于 `sbatch --wrap` 等）
    pub fn to_shell_line(&self) -> String {
        match self {
            JobCommand::Shell(line) => line.clone(),
            JobCommand::Argv(args) => crate::utils::shell::join(args),
        }
    }
}

impl fmt::Display for JobCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_shell_line())
    }
}

/// 规范化后的作业提交请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// 位置覆盖（集群名）
    pub location: Option<String>,

    /// 引擎覆盖
    pub engine: Option<String>,

    /// 作业名
    pub name: String,

    /// 队列 / 分区
    pub queue: Option<String>,

    /// CPU 核数
    pub cpus: u32,

    /// GPU 数量；纯 CPU 作业为 `None`
    pub gpus: Option<u32>,

    /// GPU 内存；纯 CPU 作业为 `None`
    pub gpu_mem: Option<String>,

    /// 内存
    pub mem: String,

    /// 日志目录
    pub log_dir: Option<PathBuf>,

    /// 需要等待完成的作业 ID
    pub dependencies: Vec<u64>,

    /// 批处理命令；交互模式下为 `None`
    pub command: Option<JobCommand>,
}

impl SubmissionRequest {
    /// 交互式会话（没有批处理命令）
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// 是否请求了 GPU
    pub fn uses_gpu(&self) -> bool {
        self.gpus.is_some()
    }
}
