//! # 统一错误处理模块
//!
//! 定义 qsubmit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// qsubmit 统一错误类型
#[derive(Error, Debug)]
pub enum QsubmitError {
    // ─────────────────────────────────────────────────────────────
    // 日志目录
    // ─────────────────────────────────────────────────────────────
    #[error("Logdir {path} could not be created due to permission error. Exiting.")]
    LogDirPermission { path: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误（不做分类，原样向上传递）
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 批处理引擎
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown batch engine '{0}' (expected one of: slurm, sge, console)")]
    UnknownEngine(String),

    #[error("External command '{command}' not found in PATH")]
    EngineNotFound { command: String },

    #[error("Submission failed: {command}\n{stderr}")]
    SubmissionFailed { command: String, stderr: String },

    #[error("Could not read a job ID from the engine output: {output:?}")]
    InvalidJobId { output: String },

    #[error("Local command exited with {status}")]
    LocalCommandFailed { status: std::process::ExitStatus },
}

impl QsubmitError {
    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            QsubmitError::LocalCommandFailed { status } => match status.code() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            _ => 1,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, QsubmitError>;
