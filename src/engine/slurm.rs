//! # Slurm 引擎
//!
//! 批处理作业用 `sbatch --parsable --wrap`，交互式会话用 `srun --pty`。
//!
//! ## 依赖关系
//! - 被 `engine/mod.rs` 使用
//! - 使用 `utils/units.rs`, `utils/shell.rs`

use super::{run_capture, run_interactive, JobId, Submitter};
use crate::error::{QsubmitError, Result};
use crate::location;
use crate::models::SubmissionRequest;
use crate::utils::{shell, units};

use std::io::Write;
use std::process::Command;

/// Slurm 提交器
#[derive(Debug, Clone)]
pub struct SlurmEngine {
    /// ÚFAL 上 GPU 内存通过 `gpuram*` 约束表达
    gpu_ram_constraint: bool,
}

impl SlurmEngine {
    pub fn new(location: &str) -> Self {
        SlurmEngine {
            gpu_ram_constraint: location == location::UFAL,
        }
    }

    /// 两种模式共用的资源参数
    fn resource_args(&self, req: &SubmissionRequest, cmd: &mut Command) {
        cmd.arg("--job-name").arg(&req.name);
        cmd.arg("--cpus-per-task").arg(req.cpus.to_string());
        cmd.arg("--mem").arg(units::normalize_mem(&req.mem));

        if let Some(ref queue) = req.queue {
            cmd.arg("--partition").arg(queue);
        }

        if let Some(gpus) = req.gpus {
            cmd.arg(format!("--gres=gpu:{}", gpus));
            match req.gpu_mem {
                Some(ref mem) if self.gpu_ram_constraint => {
                    cmd.arg(format!("--constraint=gpuram{}", units::normalize_mem(mem)));
                }
                Some(ref mem) => {
                    cmd.arg("--mem-per-gpu").arg(units::normalize_mem(mem));
                }
                None => {}
            }
        }
    }

    /// 构造 `sbatch` 命令
    pub fn batch_command(&self, req: &SubmissionRequest) -> Command {
        let mut cmd = Command::new("sbatch");
        cmd.arg("--parsable");
        self.resource_args(req, &mut cmd);

        if let Some(ref dir) = req.log_dir {
            cmd.arg("--output").arg(dir.join("%x.%j.out"));
            cmd.arg("--error").arg(dir.join("%x.%j.err"));
        }

        if !req.dependencies.is_empty() {
            let ids = req
                .dependencies
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(":");
            cmd.arg(format!("--dependency=afterany:{}", ids));
        }

        if let Some(ref command) = req.command {
            cmd.arg("--wrap").arg(command.to_shell_line());
        }
        cmd
    }

    /// 构造 `srun --pty` 命令
    pub fn interactive_command(&self, req: &SubmissionRequest) -> Command {
        let mut cmd = Command::new("srun");
        self.resource_args(req, &mut cmd);
        cmd.arg("--pty").arg(shell::login_shell());
        cmd
    }
}

/// `--parsable` 的输出形如 `12345` 或 `12345;cluster`
pub fn parse_sbatch_output(stdout: &str) -> Result<JobId> {
    let id = stdout.trim().split(';').next().unwrap_or_default().trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(QsubmitError::InvalidJobId {
            output: stdout.to_string(),
        });
    }
    Ok(id.to_string())
}

impl Submitter for SlurmEngine {
    fn submit(&self, req: &SubmissionRequest, echo: &mut dyn Write) -> Result<Option<JobId>> {
        if req.is_interactive() {
            return run_interactive(&mut self.interactive_command(req), echo);
        }
        let stdout = run_capture(&mut self.batch_command(req), echo)?;
        parse_sbatch_output(&stdout).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobCommand, DEFAULT_JOB_NAME, DEFAULT_MEM};
    use std::path::PathBuf;

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            location: None,
            engine: None,
            name: DEFAULT_JOB_NAME.to_string(),
            queue: None,
            cpus: 1,
            gpus: None,
            gpu_mem: None,
            mem: DEFAULT_MEM.to_string(),
            log_dir: None,
            dependencies: vec![],
            command: Some(JobCommand::Shell("run.sh".to_string())),
        }
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_cpu_batch_command() {
        let cmd = SlurmEngine::new("slurm").batch_command(&request());
        assert_eq!(cmd.get_program(), "sbatch");
        assert_eq!(
            args(&cmd),
            vec![
                "--parsable",
                "--job-name",
                "qsubmit",
                "--cpus-per-task",
                "1",
                "--mem",
                "1G",
                "--wrap",
                "run.sh"
            ]
        );
    }

    #[test]
    fn test_gpu_queue_logs_and_dependencies() {
        let mut req = request();
        req.queue = Some("gpu-ms".to_string());
        req.gpus = Some(2);
        req.gpu_mem = Some("16g".to_string());
        req.log_dir = Some(PathBuf::from("logs"));
        req.dependencies = vec![11, 12];
        req.command = Some(JobCommand::Argv(vec![
            "python".to_string(),
            "train.py".to_string(),
            "--lr".to_string(),
            "0.1 0.2".to_string(),
        ]));

        let a = args(&SlurmEngine::new("ufal").batch_command(&req));
        assert!(a.windows(2).any(|w| w == ["--partition", "gpu-ms"]));
        assert!(a.contains(&"--gres=gpu:2".to_string()));
        assert!(a.contains(&"--constraint=gpuram16G".to_string()));
        assert!(a.windows(2).any(|w| w == ["--output", "logs/%x.%j.out"]));
        assert!(a.windows(2).any(|w| w == ["--error", "logs/%x.%j.err"]));
        assert!(a.contains(&"--dependency=afterany:11:12".to_string()));
        assert_eq!(a.last().unwrap(), "python train.py --lr '0.1 0.2'");
    }

    #[test]
    fn test_gpu_mem_is_mem_per_gpu_outside_ufal() {
        let mut req = request();
        req.gpus = Some(1);
        req.gpu_mem = Some("8g".to_string());
        let a = args(&SlurmEngine::new("slurm").batch_command(&req));
        assert!(a.contains(&"--gres=gpu:1".to_string()));
        assert!(a.windows(2).any(|w| w == ["--mem-per-gpu", "8G"]));
        assert!(!a.iter().any(|x| x.starts_with("--constraint")));
    }

    #[test]
    fn test_interactive_command() {
        let mut req = request();
        req.command = None;
        let cmd = SlurmEngine::new("slurm").interactive_command(&req);
        assert_eq!(cmd.get_program(), "srun");
        let a = args(&cmd);
        assert_eq!(a[a.len() - 2], "--pty");
        assert!(!a.contains(&"--wrap".to_string()));
    }

    #[test]
    fn test_parse_sbatch_output() {
        assert_eq!(parse_sbatch_output("12345\n").unwrap(), "12345");
        assert_eq!(parse_sbatch_output("678;cluster\n").unwrap(), "678");
        assert!(parse_sbatch_output("").is_err());
        assert!(parse_sbatch_output("sbatch: error").is_err());
    }
}
