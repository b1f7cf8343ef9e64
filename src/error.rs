//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了分区维护工具的错误类型和处理机制。

use thiserror::Error;

/// 分区维护错误类型枚举
///
/// 所有错误在发生处即为致命错误，会中止整个维护运行，不做重试或降级
#[derive(Error, Debug)]
pub enum PartitionError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 分区边界值解码失败
    #[error("Invalid partition boundary '{raw}': {reason}")]
    Decode { raw: String, reason: String },

    /// 表没有任何合格的分区（表未分区或配置错误）
    #[error("No partitions found for table {schema}.{table}")]
    NotFound { schema: String, table: String },

    /// 分区创建DDL失败
    #[error("Failed to create partition {partition} on {schema}.{table}: {source}")]
    Create {
        schema: String,
        table: String,
        partition: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// 数据库连接错误
    #[error("Database error: {0}")]
    Database(String),

    /// Sea-ORM数据库错误
    #[error("Sea-ORM error: {0}")]
    SeaOrm(#[from] sea_orm::DbErr),

    /// 邮件通知发送失败
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 分区维护操作结果类型别名
pub type Result<T> = std::result::Result<T, PartitionError>;
