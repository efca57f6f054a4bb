//! # 批处理引擎模块
//!
//! 把规范化后的提交请求交给具体的调度器。
//!
//! ## 引擎
//! - `slurm`   - `sbatch` / `srun --pty`
//! - `sge`     - `qsub` / `qrsh`
//! - `console` - 本地前台运行，没有调度器
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 使用
//! - 使用 `models/request.rs`, `utils/shell.rs`, `location.rs`
//! - 子模块: slurm, sge, console

pub mod console;
pub mod sge;
pub mod slurm;

pub use console::ConsoleEngine;
pub use sge::SgeEngine;
pub use slurm::SlurmEngine;

use crate::error::{QsubmitError, Result};
use crate::location::{self, LocationDetector};
use crate::models::SubmissionRequest;
use crate::utils::shell;

use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::str::FromStr;

/// 调度器返回的作业 ID
pub type JobId = String;

/// 作业提交能力
pub trait Submitter {
    /// 提交请求；`echo` 接收将要执行的命令行。
    /// 交互式会话和本地运行没有作业 ID。
    fn submit(&self, request: &SubmissionRequest, echo: &mut dyn Write) -> Result<Option<JobId>>;
}

/// 引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Slurm,
    Sge,
    Console,
}

impl EngineKind {
    /// 位置的默认引擎
    pub fn default_for(location: &str) -> Self {
        match location {
            location::UFAL | location::SLURM => EngineKind::Slurm,
            location::SGE => EngineKind::Sge,
            _ => EngineKind::Console,
        }
    }

    /// 按名称（若给出）或位置选择引擎；给出名称时不检测位置
    pub fn select(name: Option<&str>, location: &dyn LocationDetector) -> Result<Self> {
        match name {
            Some(name) => name.parse(),
            None => Ok(Self::default_for(&location.detect())),
        }
    }

    /// 构造对应的提交器；只有 Slurm 需要位置
    pub fn build(self, location: &dyn LocationDetector) -> Box<dyn Submitter> {
        match self {
            EngineKind::Slurm => Box::new(SlurmEngine::new(&location.detect())),
            EngineKind::Sge => Box::new(SgeEngine),
            EngineKind::Console => Box::new(ConsoleEngine),
        }
    }
}

impl FromStr for EngineKind {
    type Err = QsubmitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slurm" => Ok(EngineKind::Slurm),
            "sge" => Ok(EngineKind::Sge),
            "console" | "local" => Ok(EngineKind::Console),
            _ => Err(QsubmitError::UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Slurm => write!(f, "slurm"),
            EngineKind::Sge => write!(f, "sge"),
            EngineKind::Console => write!(f, "console"),
        }
    }
}

/// 启动失败时区分“命令不存在”和其他 I/O 错误
fn spawn_error(cmd: &Command, e: io::Error) -> QsubmitError {
    if e.kind() == io::ErrorKind::NotFound {
        QsubmitError::EngineNotFound {
            command: cmd.get_program().to_string_lossy().into_owned(),
        }
    } else {
        QsubmitError::Io(e)
    }
}

fn command_line(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    shell::join(&parts)
}

/// 运行提交命令并返回其标准输出
pub(crate) fn run_capture(cmd: &mut Command, echo: &mut dyn Write) -> Result<String> {
    shell::echo_command(echo, cmd)?;
    tracing::debug!(command = %command_line(cmd), "running submission command");

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(cmd, e))?;

    if !output.status.success() {
        return Err(QsubmitError::SubmissionFailed {
            command: command_line(cmd),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// 前台运行（继承终端），返回退出状态
pub(crate) fn run_foreground(
    cmd: &mut Command,
    echo: &mut dyn Write,
) -> Result<std::process::ExitStatus> {
    shell::echo_command(echo, cmd)?;
    tracing::debug!(command = %command_line(cmd), "running in foreground");

    cmd.status().map_err(|e| spawn_error(cmd, e))
}

/// 交互式会话：退出状态只记录，不视为提交失败
pub(crate) fn run_interactive(cmd: &mut Command, echo: &mut dyn Write) -> Result<Option<JobId>> {
    let status = run_foreground(cmd, echo)?;
    if !status.success() {
        tracing::warn!(%status, "interactive session ended with non-zero status");
    }
    Ok(None)
}
