//! # submit 命令实现
//!
//! 把原始命令行参数规范化为提交请求，并交给批处理引擎。
//!
//! ## 功能
//! - 交互模式丢弃命令
//! - GPU 默认值推断（`gpu_mem`、ÚFAL 的 gpu 队列）
//! - 创建日志目录（权限错误单独报告）
//! - 单个命令参数折叠为标量
//! - 报告作业 ID
//!
//! ## 依赖关系
//! - 使用 `cli.rs` 定义的参数
//! - 使用 `location.rs`, `engine/`, `models/request.rs`

use crate::cli::Cli;
use crate::engine::{EngineKind, JobId, Submitter};
use crate::error::{QsubmitError, Result};
use crate::location::{self, CachedLocation, LocationDetector};
use crate::models::{JobCommand, SubmissionRequest, DEFAULT_MEM};

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;

/// 执行 submit
///
/// 位置最多检测一次，且只在 GPU 规则或引擎选择需要时检测。
pub fn execute(args: Cli, detector: &dyn LocationDetector) -> Result<()> {
    let location = CachedLocation::new(args.location.clone(), detector);
    let request = normalize(args, &location)?;

    if let Some(ref dir) = request.log_dir {
        ensure_log_dir(dir)?;
    }

    let engine = EngineKind::select(request.engine.as_deref(), &location)?;
    tracing::info!(%engine, "submitting");

    let submitter = engine.build(&location);
    let mut stderr = io::stderr();
    let job_id = submit(submitter.as_ref(), &request, &mut stderr)?;
    report(&mut stderr, job_id.as_deref())?;
    Ok(())
}

/// 规范化命令行参数
///
/// 规则顺序固定，后面的规则读取前面规则修改过的字段。
pub fn normalize(args: Cli, detector: &dyn LocationDetector) -> Result<SubmissionRequest> {
    let Cli {
        location,
        engine,
        interactive,
        name,
        queue,
        cpus,
        mut gpus,
        mut gpu_mem,
        mem,
        logdir,
        hold,
        verbose: _,
        command,
    } = args;

    // 交互式会话忽略命令
    let command = if interactive { Vec::new() } else { command };

    if gpu_requested(gpu_mem.as_deref(), queue.as_deref(), location.as_deref(), detector)
        && gpus == 0
    {
        tracing::debug!("GPU requested implicitly, defaulting to 1 GPU");
        gpus = 1;
    }

    let gpus = if gpus == 0 {
        gpu_mem = None;
        None
    } else {
        if gpu_mem.is_none() {
            gpu_mem = Some(DEFAULT_MEM.to_string());
        }
        Some(gpus)
    };

    Ok(SubmissionRequest {
        location,
        engine,
        name,
        queue,
        cpus,
        gpus,
        gpu_mem,
        mem,
        log_dir: logdir,
        dependencies: hold,
        command: JobCommand::from_tokens(command),
    })
}

/// GPU 信号：显式 GPU 内存，或 ÚFAL 集群上的 gpu 队列。
/// 只有没给 GPU 内存且给了队列时才需要检测位置。
fn gpu_requested(
    gpu_mem: Option<&str>,
    queue: Option<&str>,
    location_override: Option<&str>,
    detector: &dyn LocationDetector,
) -> bool {
    if gpu_mem.is_some() {
        return true;
    }
    match queue {
        Some(queue) if queue.contains("gpu") => {
            location::resolve(location_override, detector) == location::UFAL
        }
        _ => false,
    }
}

/// 创建日志目录（含父目录）
pub fn ensure_log_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| log_dir_error(dir, e))
}

/// 权限错误单独报告，其他 I/O 错误原样传递
fn log_dir_error(dir: &Path, e: io::Error) -> QsubmitError {
    match e.kind() {
        ErrorKind::PermissionDenied => QsubmitError::LogDirPermission {
            path: dir.display().to_string(),
        },
        _ => QsubmitError::Io(e),
    }
}

/// 提交并返回作业 ID
pub fn submit(
    submitter: &dyn Submitter,
    request: &SubmissionRequest,
    echo: &mut dyn Write,
) -> Result<Option<JobId>> {
    submitter.submit(request, echo)
}

/// 有作业 ID 时打印 `Submitted job ID: <id>`
pub fn report(out: &mut dyn Write, job_id: Option<&str>) -> Result<()> {
    match job_id {
        Some(id) if !id.is_empty() => writeln!(out, "Submitted job ID: {}", id)?,
        _ => {}
    }
    Ok(())
}
