//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了维护运行的编排器。
//!
//! 每次运行按配置顺序逐表处理：读最新分区、解码边界、规划滚动、逐个
//! 建分区、累积报告。任何一步失败立即中止整次运行，已创建的分区保留。

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::MaintenanceConfig;
use crate::error::Result;
use crate::notify::Notifier;
use crate::partition::{boundary, decode_boundary, plan, HorizonPlan, PartitionRepository};
use crate::report::MaintenanceReport;

/// 时钟trait
///
/// 视野从注入的时钟计算，规划本身不读墙钟，便于测试
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 系统时钟（UTC）
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// 单个表的预演结果，供 plan 子命令展示
#[derive(Debug, Clone)]
pub struct TablePlan {
    pub table: String,
    pub current_boundary: NaiveDate,
    pub plan: HorizonPlan,
}

/// 维护编排器
///
/// 协作者全部通过构造注入，不依赖全局状态
pub struct MaintenanceRunner {
    repository: Arc<dyn PartitionRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: MaintenanceConfig,
}

impl MaintenanceRunner {
    pub fn new(
        repository: Arc<dyn PartitionRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: MaintenanceConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            clock,
            config,
        }
    }

    /// 覆盖视野：当前日期向后推 lookahead_months 个月，每次运行计算一次
    fn horizon(&self) -> NaiveDate {
        boundary::months_after(self.clock.today(), self.config.lookahead_months)
    }

    /// 执行一次维护运行
    ///
    /// 报告非空时恰好通知一次；返回累积的报告
    pub async fn run(&self) -> Result<MaintenanceReport> {
        let horizon = self.horizon();
        let schema = &self.config.schema;
        info!(
            "Starting partition maintenance for {} table(s) in schema {} (horizon {})",
            self.config.tables.len(),
            schema,
            horizon
        );

        let mut report = MaintenanceReport::new();

        for table in &self.config.tables {
            let latest = self.repository.latest_partition(schema, table).await?;
            let current = decode_boundary(&latest.boundary_raw).map_err(|e| {
                error!(
                    "Failed to decode boundary of partition {} on {}.{}: {}",
                    latest.partition_name, schema, table, e
                );
                e
            })?;

            let table_plan = plan(current, self.config.step_months, horizon);
            if table_plan.is_empty() {
                debug!(
                    "Table {}.{} already covers the horizon (latest boundary {})",
                    schema, table, current
                );
                continue;
            }

            for entry in table_plan.entries() {
                self.repository.create_partition(schema, table, entry).await?;
                info!(
                    "Added partition (schema: {}, table: {}, partition: {})",
                    schema, table, entry.name
                );
                report.push(format!(
                    "Added partition (schema: {}, table: {}, partition: {})",
                    schema, table, entry.name
                ));
            }
        }

        if !report.is_empty() {
            self.notifier.notify(&report).await?;
        } else {
            info!("All tables cover the horizon, nothing to do");
        }

        Ok(report)
    }

    /// 预演：与 run 相同的读取与规划，不执行DDL也不发通知
    pub async fn preview(&self) -> Result<Vec<TablePlan>> {
        let horizon = self.horizon();
        let schema = &self.config.schema;
        let mut plans = Vec::with_capacity(self.config.tables.len());

        for table in &self.config.tables {
            let latest = self.repository.latest_partition(schema, table).await?;
            let current = decode_boundary(&latest.boundary_raw)?;
            plans.push(TablePlan {
                table: table.clone(),
                current_boundary: current,
                plan: plan(current, self.config.step_months, horizon),
            });
        }

        Ok(plans)
    }
}
