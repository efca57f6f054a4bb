//! # 数据模型模块
//!
//! 定义规范化后的作业提交请求。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `engine/` 使用
//! - 子模块: request

pub mod request;

pub use request::{JobCommand, SubmissionRequest, DEFAULT_JOB_NAME, DEFAULT_MEM};
