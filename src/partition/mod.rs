//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 分区域模块
//!
//! 提供按日期范围分区的边界计算、滚动规划与MySQL目录适配

pub mod boundary;
pub mod mysql;
pub mod planner;
pub mod repository;

pub use boundary::{decode_boundary, months_after, next_boundary, to_day_count};
pub use mysql::MySqlPartitionRepository;
pub use planner::{partition_name, plan, HorizonPlan, PlanEntry};
pub use repository::PartitionRepository;

/// 分区信息
///
/// 从目录中读取的一行现有分区快照，每次查询创建，用后即弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInfo {
    /// 库名
    pub schema_name: String,
    /// 表名
    pub table_name: String,
    /// 分区名称
    pub partition_name: String,
    /// 分区上界原始值（天数编码，来自 PARTITION_DESCRIPTION）
    pub boundary_raw: String,
}
