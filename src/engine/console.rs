//! # 本地运行引擎
//!
//! 没有调度器时在前台直接运行命令。资源与依赖参数无法生效，只记录警告。
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 使用
//! - 使用 `utils/shell.rs`

use super::{run_foreground, run_interactive, JobId, Submitter};
use crate::error::{QsubmitError, Result};
use crate::models::{SubmissionRequest, DEFAULT_MEM};
use crate::utils::shell;

use std::fs::File;
use std::io::Write;
use std::process::Command;

/// 本地提交器
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEngine;

impl ConsoleEngine {
    fn warn_ignored(req: &SubmissionRequest) {
        if req.queue.is_some() {
            tracing::warn!("console engine ignores the queue");
        }
        if req.cpus != 1 || req.mem != DEFAULT_MEM {
            tracing::warn!(cpus = req.cpus, mem = %req.mem, "console engine does not limit resources");
        }
        if req.uses_gpu() {
            tracing::warn!("console engine does not allocate GPUs");
        }
        if !req.dependencies.is_empty() {
            tracing::warn!(dependencies = ?req.dependencies, "console engine does not wait for other jobs");
        }
    }

    /// 构造本地命令；有日志目录时输出重定向到 `<log_dir>/<name>.out|err`
    pub fn batch_command(req: &SubmissionRequest) -> Result<Option<Command>> {
        let argv = match req.command {
            Some(ref command) => command.to_argv(),
            None => return Ok(None),
        };
        let (program, rest) = match argv.split_first() {
            Some(split) => split,
            None => return Ok(None),
        };

        let mut cmd = Command::new(program);
        cmd.args(rest);

        if let Some(ref dir) = req.log_dir {
            cmd.stdout(File::create(dir.join(format!("{}.out", req.name)))?);
            cmd.stderr(File::create(dir.join(format!("{}.err", req.name)))?);
        }
        Ok(Some(cmd))
    }
}

impl Submitter for ConsoleEngine {
    fn submit(&self, req: &SubmissionRequest, echo: &mut dyn Write) -> Result<Option<JobId>> {
        Self::warn_ignored(req);

        let mut cmd = match Self::batch_command(req)? {
            Some(cmd) => cmd,
            None => return run_interactive(&mut Command::new(shell::login_shell()), echo),
        };

        let status = run_foreground(&mut cmd, echo)?;
        if !status.success() {
            return Err(QsubmitError::LocalCommandFailed { status });
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobCommand;
    use std::fs;
    use std::io;

    fn request(command: JobCommand) -> SubmissionRequest {
        SubmissionRequest {
            location: None,
            engine: None,
            name: "local".to_string(),
            queue: None,
            cpus: 1,
            gpus: None,
            gpu_mem: None,
            mem: DEFAULT_MEM.to_string(),
            log_dir: None,
            dependencies: vec![],
            command: Some(command),
        }
    }

    #[test]
    fn test_runs_locally_without_job_id() {
        let req = request(JobCommand::Argv(vec!["true".to_string()]));
        let mut echo = Vec::new();
        let id = ConsoleEngine.submit(&req, &mut echo).unwrap();
        assert_eq!(id, None);
        assert_eq!(String::from_utf8(echo).unwrap(), "$ true\n");
    }

    #[test]
    fn test_failure_is_reported() {
        let req = request(JobCommand::Shell("exit 4".to_string()));
        let err = ConsoleEngine.submit(&req, &mut io::sink()).unwrap_err();
        assert!(matches!(err, QsubmitError::LocalCommandFailed { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_output_goes_to_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(JobCommand::Shell("echo out; echo err >&2".to_string()));
        req.log_dir = Some(dir.path().to_path_buf());

        ConsoleEngine.submit(&req, &mut io::sink()).unwrap();

        let out = fs::read_to_string(dir.path().join("local.out")).unwrap();
        let err = fs::read_to_string(dir.path().join("local.err")).unwrap();
        assert_eq!(out, "out\n");
        assert_eq!(err, "err\n");
    }
}
