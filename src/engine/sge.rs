//! # SGE 引擎
//!
//! 批处理作业用 `qsub -terse -b y`，交互式会话用 `qrsh -pty y`。
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 使用
//! - 使用 `utils/units.rs`, `utils/shell.rs`

use super::{run_capture, run_interactive, JobId, Submitter};
use crate::error::{QsubmitError, Result};
use crate::models::SubmissionRequest;
use crate::utils::{shell, units};

use std::io::Write;
use std::process::Command;

/// SGE 提交器
#[derive(Debug, Clone, Copy, Default)]
pub struct SgeEngine;

impl SgeEngine {
    fn resource_args(req: &SubmissionRequest, cmd: &mut Command) {
        cmd.arg("-N").arg(&req.name);

        if req.cpus > 1 {
            cmd.arg("-pe").arg("smp").arg(req.cpus.to_string());
        }

        let mem = units::normalize_mem(&req.mem);
        cmd.arg("-l").arg(format!("mem_free={},h_vmem={}", mem, mem));

        if let Some(ref queue) = req.queue {
            cmd.arg("-q").arg(queue);
        }

        if let Some(gpus) = req.gpus {
            let mut resources = format!("gpu={}", gpus);
            if let Some(ref gpu_mem) = req.gpu_mem {
                resources.push_str(&format!(",gpu_ram={}", units::normalize_mem(gpu_mem)));
            }
            cmd.arg("-l").arg(resources);
        }
    }

    /// 构造 `qsub` 命令
    pub fn batch_command(req: &SubmissionRequest) -> Command {
        let mut cmd = Command::new("qsub");
        cmd.args(["-terse", "-cwd", "-V", "-b", "y"]);
        Self::resource_args(req, &mut cmd);

        if let Some(ref dir) = req.log_dir {
            cmd.arg("-o").arg(dir);
            cmd.arg("-e").arg(dir);
        }

        if !req.dependencies.is_empty() {
            let ids = req
                .dependencies
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            cmd.arg("-hold_jid").arg(ids);
        }

        // qsub 会把 `-b y` 的参数重新拼成 shell 命令行
        if let Some(ref command) = req.command {
            cmd.args(command.to_argv().iter().map(|a| shell::quote(a)));
        }
        cmd
    }

    /// 构造 `qrsh` 命令
    pub fn interactive_command(req: &SubmissionRequest) -> Command {
        let mut cmd = Command::new("qrsh");
        cmd.args(["-pty", "y"]);
        Self::resource_args(req, &mut cmd);
        cmd.arg(shell::login_shell());
        cmd
    }
}

/// `-terse` 输出形如 `12345` 或数组作业的 `12345.1-10:1`
pub fn parse_qsub_output(stdout: &str) -> Result<JobId> {
    let first = stdout.lines().next().unwrap_or_default().trim();
    let id = first.split('.').next().unwrap_or_default();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(QsubmitError::InvalidJobId {
            output: stdout.to_string(),
        });
    }
    Ok(id.to_string())
}

impl Submitter for SgeEngine {
    fn submit(&self, req: &SubmissionRequest, echo: &mut dyn Write) -> Result<Option<JobId>> {
        if req.is_interactive() {
            return run_interactive(&mut Self::interactive_command(req), echo);
        }
        let stdout = run_capture(&mut Self::batch_command(req), echo)?;
        parse_qsub_output(&stdout).map(Some)
    }
}
