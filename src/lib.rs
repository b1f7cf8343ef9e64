//! oxpart - MySQL时间范围分区维护工具
//!
//! 检查配置表的最新分区，按月滚动补齐到覆盖视野，
//! 并把变更汇总成报告通过邮件通知运维。

#![doc(html_root_url = "https://docs.rs/oxpart/0.1.0")]

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod partition;
pub mod report;
pub mod runner;

// Re-export commonly used items
pub use config::Config;
pub use error::{PartitionError, Result};
pub use report::MaintenanceReport;
pub use runner::{Clock, MaintenanceRunner, SystemClock, TablePlan};

/// oxpart 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
