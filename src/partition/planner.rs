//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了分区滚动规划算法。
//!
//! 给定当前分区边界、步长（月）与覆盖视野，产出需要创建的分区序列。
//! 算法是纯函数：视野由调用方计算并传入，同样的输入永远产出同样的计划。

use chrono::NaiveDate;

use super::boundary::next_boundary;

/// 一个待创建的分区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// 分区名称，由边界日期确定性导出
    pub name: String,
    /// 分区上界日期，总是某个月的第一天
    pub boundary: NaiveDate,
}

/// 单个表的分区滚动计划
///
/// 不变式：边界日期严格递增，相邻条目恰好相差步长个月，全部不超过视野
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HorizonPlan {
    entries: Vec<PlanEntry>,
}

impl HorizonPlan {
    /// 计划中的条目，按边界日期升序
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// 计划是否为空（空计划表示该表无需任何动作，不是错误）
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 计划条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 由边界日期导出分区名称
///
/// 格式：前缀 `p` 加8位日期，例如 2025-03-01 对应 `p20250301`
pub fn partition_name(boundary: NaiveDate) -> String {
    format!("p{}", boundary.format("%Y%m%d"))
}

/// 计算分区滚动计划
///
/// 从 `current_boundary` 出发反复步进：候选边界一旦严格超过 `horizon`
/// 即停止（不含该候选）。`current_boundary` 已不小于视野时计划为空。
/// `step_months` 为正由配置层保证。
pub fn plan(current_boundary: NaiveDate, step_months: u32, horizon: NaiveDate) -> HorizonPlan {
    let mut entries = Vec::new();
    let mut current = current_boundary;

    loop {
        let next = next_boundary(current, step_months);
        if next > horizon {
            break;
        }
        entries.push(PlanEntry {
            name: partition_name(next),
            boundary: next,
        });
        current = next;
    }

    HorizonPlan { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_partition_name_format() {
        assert_eq!(partition_name(date(2025, 3, 1)), "p20250301");
        assert_eq!(partition_name(date(2025, 11, 1)), "p20251101");
    }

    /// orders 场景：边界2025-01-01，步长1，视野2025-04-15
    #[test]
    fn test_monthly_rollover_up_to_horizon() {
        let result = plan(date(2025, 1, 1), 1, date(2025, 4, 15));
        let entries = result.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], PlanEntry { name: "p20250201".into(), boundary: date(2025, 2, 1) });
        assert_eq!(entries[1], PlanEntry { name: "p20250301".into(), boundary: date(2025, 3, 1) });
        assert_eq!(entries[2], PlanEntry { name: "p20250401".into(), boundary: date(2025, 4, 1) });
    }

    /// 步长3：2025-07-01超出视野2025-06-01，只产出一个分区
    #[test]
    fn test_quarterly_step_excludes_candidate_past_horizon() {
        let result = plan(date(2025, 1, 1), 3, date(2025, 6, 1));
        let entries = result.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "p20250401");
        assert_eq!(entries[0].boundary, date(2025, 4, 1));
    }

    /// 视野早于当前边界时计划为空，属于正常的"无需动作"
    #[test]
    fn test_horizon_before_current_boundary_yields_empty_plan() {
        let result = plan(date(2025, 6, 1), 1, date(2025, 3, 31));
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_first_candidate_past_horizon_yields_empty_plan() {
        let result = plan(date(2025, 1, 1), 6, date(2025, 5, 1));
        assert!(result.is_empty());
    }

    /// 候选恰好等于视野时包含在计划内（上界严格大于才排除）
    #[test]
    fn test_candidate_equal_to_horizon_is_included() {
        let result = plan(date(2025, 1, 1), 1, date(2025, 2, 1));
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries()[0].boundary, date(2025, 2, 1));
    }

    /// 当前边界落在月中时，首个候选仍对齐到月初
    #[test]
    fn test_mid_month_boundary_realigns_to_month_start() {
        let result = plan(date(2025, 1, 20), 1, date(2025, 3, 15));
        let entries = result.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].boundary, date(2025, 2, 1));
        assert_eq!(entries[1].boundary, date(2025, 3, 1));
    }

    /// 不变式：条目严格递增，恰好相差步长个月，全部不超过视野
    #[test]
    fn test_plan_invariants_hold_across_step_sizes() {
        let horizon = date(2027, 8, 15);
        for step in [1u32, 2, 3, 6, 12] {
            let result = plan(date(2025, 1, 1), step, horizon);
            let entries = result.entries();
            assert!(!entries.is_empty(), "step {} should produce entries", step);
            let mut previous = date(2025, 1, 1);
            for entry in entries {
                assert!(entry.boundary <= horizon);
                assert!(entry.boundary > previous);
                assert_eq!(entry.boundary.day(), 1);
                let gap = (entry.boundary.year() - previous.year()) * 12
                    + entry.boundary.month() as i32
                    - previous.month() as i32;
                assert_eq!(gap, step as i32);
                previous = entry.boundary;
            }
        }
    }
}
