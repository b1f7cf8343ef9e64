//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 通知trait定义

use async_trait::async_trait;

use crate::error::Result;
use crate::report::MaintenanceReport;

pub mod smtp;

pub use smtp::SmtpNotifier;

/// 通知trait
///
/// 报告非空时编排器在每次运行中恰好调用一次
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 递送聚合后的变更报告
    async fn notify(&self, report: &MaintenanceReport) -> Result<()>;
}

/// 仅写日志的通知实现，用于未配置邮件的部署
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, report: &MaintenanceReport) -> Result<()> {
        tracing::info!(
            "Maintenance report ({} change(s)):\n{}",
            report.len(),
            report
        );
        Ok(())
    }
}
