//! # 位置检测
//!
//! 判断当前运行在哪个集群上。位置只影响两件事：
//! GPU 队列的默认推断（ÚFAL 集群）以及默认批处理引擎的选择。
//!
//! ## 依赖关系
//! - 被 `commands/submit.rs` 和 `engine/mod.rs` 使用
//! - 使用 `hostname` crate 和 `utils/shell.rs`

use crate::utils::shell;

use std::cell::OnceCell;

/// ÚFAL 集群的位置标识
pub const UFAL: &str = "ufal";

/// 有 Slurm 的一般集群
pub const SLURM: &str = "slurm";

/// 有 SGE 的一般集群
pub const SGE: &str = "sge";

/// 没有调度器，本地运行
pub const CONSOLE: &str = "console";

const UFAL_DOMAINS: &[&str] = &[".ms.mff.cuni.cz", ".ufal.hide"];

/// 位置检测能力
pub trait LocationDetector {
    fn detect(&self) -> String;
}

impl<F> LocationDetector for F
where
    F: Fn() -> String,
{
    fn detect(&self) -> String {
        self()
    }
}

/// 基于主机名和 PATH 的默认检测
#[derive(Debug, Default, Clone, Copy)]
pub struct HostLocation;

impl LocationDetector for HostLocation {
    fn detect(&self) -> String {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_default();
        classify(
            &host,
            shell::which("sbatch").is_some(),
            shell::which("qsub").is_some(),
        )
        .to_string()
    }
}

/// 按主机名与可用的提交命令归类
fn classify(host: &str, has_sbatch: bool, has_qsub: bool) -> &'static str {
    let host = host.to_ascii_lowercase();
    if UFAL_DOMAINS.iter().any(|d| host.ends_with(d)) {
        UFAL
    } else if has_sbatch {
        SLURM
    } else if has_qsub {
        SGE
    } else {
        CONSOLE
    }
}

/// 解析位置：显式覆盖优先，否则调用检测器
pub fn resolve(explicit: Option<&str>, detector: &dyn LocationDetector) -> String {
    match explicit {
        Some(loc) => loc.to_string(),
        None => {
            let loc = detector.detect();
            tracing::debug!(location = %loc, "detected location");
            loc
        }
    }
}

/// 至多解析一次的位置：显式覆盖优先，检测推迟到第一次需要时
pub struct CachedLocation<'a> {
    explicit: Option<String>,
    detector: &'a dyn LocationDetector,
    resolved: OnceCell<String>,
}

impl<'a> CachedLocation<'a> {
    pub fn new(explicit: Option<String>, detector: &'a dyn LocationDetector) -> Self {
        CachedLocation {
            explicit,
            detector,
            resolved: OnceCell::new(),
        }
    }

    pub fn get(&self) -> &str {
        self.resolved
            .get_or_init(|| resolve(self.explicit.as_deref(), self.detector))
    }
}

impl LocationDetector for CachedLocation<'_> {
    fn detect(&self) -> String {
        self.get().to_string()
    }
}
