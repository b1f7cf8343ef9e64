//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了分区仓储的MySQL实现。

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use secrecy::ExposeSecret;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::boundary::to_day_count;
use super::{PartitionInfo, PartitionRepository, PlanEntry};
use crate::config::DatabaseConfig;
use crate::error::{PartitionError, Result};

/// 读取表最新分区的目录查询：按序号取最高者，排除溢出哨兵分区
const LATEST_PARTITION_SQL: &str = "SELECT \
     p.TABLE_SCHEMA, p.TABLE_NAME, p.PARTITION_NAME, p.PARTITION_DESCRIPTION \
     FROM information_schema.PARTITIONS p \
     WHERE p.PARTITION_NAME IS NOT NULL \
     AND p.PARTITION_NAME <> ? \
     AND p.TABLE_SCHEMA = ? \
     AND p.TABLE_NAME = ? \
     ORDER BY p.PARTITION_ORDINAL_POSITION DESC \
     LIMIT 1";

/// MySQL分区仓储
pub struct MySqlPartitionRepository {
    connection: DatabaseConnection,
    overflow_partition: String,
}

impl MySqlPartitionRepository {
    /// 建立MySQL连接并创建仓储
    pub async fn connect(config: &DatabaseConfig, overflow_partition: &str) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.expose_secret().to_string());
        opt.max_connections(5)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(10));

        let start = Instant::now();
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
        let connection = match timeout(connect_timeout, Database::connect(opt)).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => {
                return Err(PartitionError::Database(format!(
                    "Failed to connect to MySQL: {}. Please check your connection string and ensure the database server is running.",
                    e
                )));
            }
            Err(_) => {
                return Err(PartitionError::Database(format!(
                    "Connection timeout: MySQL server not responding within {} seconds.",
                    config.connect_timeout_secs
                )));
            }
        };

        let acquire_duration = start.elapsed();
        info!("MySQL connection established in {:?}", acquire_duration);

        if acquire_duration > Duration::from_secs(3) {
            warn!(
                "MySQL connection took longer than expected: {:?}",
                acquire_duration
            );
        }

        Ok(Self {
            connection,
            overflow_partition: overflow_partition.to_string(),
        })
    }

    /// 验证 SQL 标识符是否安全（防止 SQL 注入）
    ///
    /// 标识符只能包含字母、数字、下划线，必须以字母或下划线开头
    fn validate_identifier(&self, identifier: &str) -> Result<()> {
        if identifier.is_empty() {
            return Err(PartitionError::Database(
                "Identifier cannot be empty".to_string(),
            ));
        }

        if identifier.len() > 64 {
            return Err(PartitionError::Database(format!(
                "Identifier '{}' exceeds maximum length of 64 characters",
                identifier
            )));
        }

        if !identifier.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(PartitionError::Database(format!(
                "Invalid identifier '{}': only alphanumeric characters and underscores are allowed",
                identifier
            )));
        }

        let first_char = identifier
            .chars()
            .next()
            .ok_or_else(|| PartitionError::Database("Invalid identifier: empty".to_string()))?;
        if !first_char.is_alphabetic() && first_char != '_' {
            return Err(PartitionError::Database(format!(
                "Invalid identifier '{}': must start with a letter or underscore",
                identifier
            )));
        }

        Ok(())
    }

    /// 转义 SQL 标识符（使用反引号）
    fn escape_identifier(&self, identifier: &str) -> String {
        format!("`{}`", identifier)
    }
}

#[async_trait]
impl PartitionRepository for MySqlPartitionRepository {
    async fn latest_partition(&self, schema: &str, table: &str) -> Result<PartitionInfo> {
        let statement = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::MySql,
            LATEST_PARTITION_SQL,
            [
                self.overflow_partition.clone().into(),
                schema.to_string().into(),
                table.to_string().into(),
            ],
        );

        let row = self
            .connection
            .query_one(statement)
            .await?
            .ok_or_else(|| PartitionError::NotFound {
                schema: schema.to_string(),
                table: table.to_string(),
            })?;

        let schema_name: String = row.try_get("", "TABLE_SCHEMA")?;
        let table_name: String = row.try_get("", "TABLE_NAME")?;
        let partition_name: String = row.try_get("", "PARTITION_NAME")?;
        let boundary_raw: Option<String> = row.try_get("", "PARTITION_DESCRIPTION")?;

        debug!(
            "Latest partition for {}.{}: {} (boundary {:?})",
            schema_name, table_name, partition_name, boundary_raw
        );

        Ok(PartitionInfo {
            schema_name,
            table_name,
            partition_name,
            boundary_raw: boundary_raw.unwrap_or_default(),
        })
    }

    async fn create_partition(&self, schema: &str, table: &str, entry: &PlanEntry) -> Result<()> {
        self.validate_identifier(schema)?;
        self.validate_identifier(table)?;
        self.validate_identifier(&entry.name)?;

        let day_count = to_day_count(entry.boundary);
        let sql = format!(
            "ALTER TABLE {}.{} ADD PARTITION (PARTITION {} VALUES LESS THAN ({}))",
            self.escape_identifier(schema),
            self.escape_identifier(table),
            self.escape_identifier(&entry.name),
            day_count
        );

        debug!("Generated SQL: {}", sql);

        self.connection
            .execute(Statement::from_string(sea_orm::DatabaseBackend::MySql, sql))
            .await
            .map_err(|e| PartitionError::Create {
                schema: schema.to_string(),
                table: table.to_string(),
                partition: entry.name.clone(),
                source: e,
            })?;

        Ok(())
    }
}
