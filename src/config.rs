//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了分区维护工具的配置结构和解析逻辑。

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

use crate::error::{PartitionError, Result};

/// 顶层配置
///
/// 从TOML配置文件反序列化，进程启动时加载一次
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// 数据库连接配置
    pub database: DatabaseConfig,
    /// 分区维护配置
    pub maintenance: MaintenanceConfig,
    /// 邮件通知配置（缺省时仅写日志，不发邮件）
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

/// 数据库连接配置
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// MySQL连接字符串（使用 SecretString 保护）
    pub url: SecretString,
    /// 连接建立超时时间（秒）
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// 分区维护配置
#[derive(Debug, Deserialize, Clone)]
pub struct MaintenanceConfig {
    /// 目标库名
    pub schema: String,
    /// 需要维护的分区表列表
    pub tables: Vec<String>,
    /// 相邻分区边界之间的月数
    pub step_months: u32,
    /// 覆盖视野：从当前时间向未来看多少个月
    #[serde(default = "default_lookahead_months")]
    pub lookahead_months: u32,
    /// 溢出哨兵分区名，查询最新分区时排除
    #[serde(default = "default_overflow_partition")]
    pub overflow_partition: String,
}

/// 邮件通知配置
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// SMTP服务器地址
    pub host: String,
    /// SMTP端口（隐式TLS）
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// 发件人账号
    pub username: String,
    /// SMTP密码（使用 SecretString 保护）
    pub password: SecretString,
    /// 收件人列表
    pub recipients: Vec<String>,
    /// 邮件主题
    pub subject: String,
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_lookahead_months() -> u32 {
    12
}

fn default_overflow_partition() -> String {
    "p_nulls".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

impl Config {
    /// 从TOML文件加载配置
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PartitionError::Config(format!(
                "Cannot read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| PartitionError::Config(format!("Cannot parse config file: {}", e)))?;
        config.validate().map_err(PartitionError::Config)?;
        Ok(config)
    }

    /// 验证配置
    ///
    /// 检查配置的有效性，确保所有必需的字段都已设置，并且值在合理范围内
    pub fn validate(&self) -> std::result::Result<(), String> {
        let url = self.database.url.expose_secret();
        if !url.starts_with("mysql://") {
            return Err("database.url must be a mysql:// connection string".to_string());
        }

        if self.database.connect_timeout_secs == 0 {
            return Err("database.connect_timeout_secs cannot be zero".to_string());
        }

        if self.maintenance.schema.is_empty() {
            return Err("maintenance.schema cannot be empty".to_string());
        }

        if self.maintenance.schema.len() > 64 {
            return Err("maintenance.schema exceeds maximum length of 64 characters".to_string());
        }

        if self.maintenance.tables.is_empty() {
            return Err("maintenance.tables cannot be empty".to_string());
        }

        for table in &self.maintenance.tables {
            if table.is_empty() {
                return Err("maintenance.tables entries cannot be empty".to_string());
            }

            if table.len() > 64 {
                return Err(format!(
                    "Table name '{}' exceeds maximum length of 64 characters",
                    table
                ));
            }
        }

        if self.maintenance.step_months == 0 {
            return Err("maintenance.step_months must be at least 1".to_string());
        }

        if self.maintenance.step_months > 120 {
            return Err("maintenance.step_months cannot exceed 120".to_string());
        }

        if self.maintenance.lookahead_months == 0 {
            return Err("maintenance.lookahead_months must be at least 1".to_string());
        }

        if self.maintenance.overflow_partition.is_empty() {
            return Err("maintenance.overflow_partition cannot be empty".to_string());
        }

        if let Some(mail) = &self.mail {
            if mail.host.is_empty() {
                return Err("mail.host cannot be empty".to_string());
            }

            if mail.port == 0 {
                return Err("mail.port cannot be zero".to_string());
            }

            if mail.username.is_empty() {
                return Err("mail.username cannot be empty".to_string());
            }

            if mail.recipients.is_empty() {
                return Err("mail.recipients cannot be empty".to_string());
            }

            if mail.subject.is_empty() {
                return Err("mail.subject cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
