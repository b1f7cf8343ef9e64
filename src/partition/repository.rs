//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 分区仓储trait定义

use async_trait::async_trait;

use super::{PartitionInfo, PlanEntry};
use crate::error::Result;

/// 分区仓储trait
///
/// 核心对目录的全部依赖收敛在这两个操作上，便于用内存伪实现测试
#[async_trait]
pub trait PartitionRepository: Send + Sync {
    /// 读取表当前最新的分区（序号最高者，排除溢出哨兵分区）
    ///
    /// 表没有任何合格分区时返回 `NotFound`，对本次运行是致命错误
    async fn latest_partition(&self, schema: &str, table: &str) -> Result<PartitionInfo>;

    /// 创建一个分区，上界为计划条目的边界日期（天数编码）
    ///
    /// 失败返回 `Create`，对本次运行是致命错误；已创建的分区不回滚
    async fn create_partition(&self, schema: &str, table: &str, entry: &PlanEntry) -> Result<()>;
}
