//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了分区边界的日期换算。
//!
//! MySQL范围分区的上界以 TO_DAYS 天数表示（自公历0年起的天数）。
//! 这里用本地日期运算直接换算，不经过目录往返查询。

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{PartitionError, Result};

/// chrono的纪元日（0001-01-01为第1天）与MySQL TO_DAYS纪元（0000年）之间的偏移。
/// 锚点：TO_DAYS('1997-10-07') = 729669。
const DAY_COUNT_OFFSET: i64 = 365;

/// MySQL对低于366的天数没有定义的日历日期
const MIN_DAY_COUNT: i64 = 366;

/// 将目录中的分区边界原始值解码为日历日期
///
/// 输入为 PARTITION_DESCRIPTION 中的天数字符串。解码是确定性的纯日期
/// 运算，不涉及时区。非数字输入（包括 MAXVALUE）、过小或超出日历
/// 范围的天数均返回 `Decode` 错误。
pub fn decode_boundary(raw: &str) -> Result<NaiveDate> {
    let value: i64 = raw.trim().parse().map_err(|_| PartitionError::Decode {
        raw: raw.to_string(),
        reason: "not a numeric day count".to_string(),
    })?;

    if value < MIN_DAY_COUNT {
        return Err(PartitionError::Decode {
            raw: raw.to_string(),
            reason: format!("day counts below {} have no calendar date", MIN_DAY_COUNT),
        });
    }

    let days_from_ce = value - DAY_COUNT_OFFSET;
    i32::try_from(days_from_ce)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| PartitionError::Decode {
            raw: raw.to_string(),
            reason: "day count outside the supported calendar range".to_string(),
        })
}

/// 将日历日期编码为MySQL的TO_DAYS天数
///
/// `decode_boundary` 的逆运算，用于生成 VALUES LESS THAN (<n>) 子句
pub fn to_day_count(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + DAY_COUNT_OFFSET
}

/// 计算下一个分区边界
///
/// 返回 `current` 所在月份的第一天再往后 `step_months` 个月的第一天。
/// 先归一化到月初再步进，保证无论输入落在当月哪一天，反复步进都
/// 始终对齐月边界。
pub fn next_boundary(current: NaiveDate, step_months: u32) -> NaiveDate {
    debug_assert!(step_months >= 1, "step_months is validated by configuration");
    let months = i64::from(current.year()) * 12 + i64::from(current.month0()) + i64::from(step_months);
    let year = months.div_euclid(12) as i32;
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of month is always valid")
}

/// 日期向后平移指定月数
///
/// 保留日号（月末自动收缩），用于从当前时间计算覆盖视野
pub fn months_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .expect("horizon is within the calendar range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// MySQL文档锚点：TO_DAYS('1997-10-07') = 729669
    #[test]
    fn test_decode_documented_anchor() {
        assert_eq!(decode_boundary("729669").unwrap(), date(1997, 10, 7));
    }

    #[test]
    fn test_decode_and_encode_round_trip() {
        assert_eq!(decode_boundary("739617").unwrap(), date(2025, 1, 1));
        assert_eq!(to_day_count(date(2025, 1, 1)), 739617);
        assert_eq!(to_day_count(date(1997, 10, 7)), 729669);
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        assert_eq!(decode_boundary(" 739617 ").unwrap(), date(2025, 1, 1));
    }

    #[test]
    fn test_decode_rejects_maxvalue() {
        let err = decode_boundary("MAXVALUE").unwrap_err();
        assert!(matches!(err, PartitionError::Decode { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_and_garbage() {
        assert!(decode_boundary("").is_err());
        assert!(decode_boundary("2025-01-01").is_err());
    }

    #[test]
    fn test_decode_rejects_day_counts_below_minimum() {
        assert!(decode_boundary("365").is_err());
        assert!(decode_boundary("0").is_err());
        assert!(decode_boundary("-1").is_err());
        assert!(decode_boundary("366").is_ok());
    }

    #[test]
    fn test_decode_rejects_out_of_range_day_counts() {
        assert!(decode_boundary("99999999999").is_err());
    }

    /// 步进只取决于输入的年月，与日号无关
    #[test]
    fn test_next_boundary_normalizes_day_of_month() {
        assert_eq!(next_boundary(date(2024, 1, 15), 1), date(2024, 2, 1));
        assert_eq!(next_boundary(date(2024, 1, 31), 1), date(2024, 2, 1));
        assert_eq!(next_boundary(date(2024, 1, 1), 1), date(2024, 2, 1));
    }

    #[test]
    fn test_next_boundary_crosses_year_end() {
        assert_eq!(next_boundary(date(2024, 12, 5), 1), date(2025, 1, 1));
        assert_eq!(next_boundary(date(2024, 11, 30), 3), date(2025, 2, 1));
    }

    #[test]
    fn test_next_boundary_multi_month_step() {
        assert_eq!(next_boundary(date(2025, 1, 1), 3), date(2025, 4, 1));
        assert_eq!(next_boundary(date(2025, 1, 1), 12), date(2026, 1, 1));
    }

    #[test]
    fn test_months_after_keeps_day_of_month() {
        assert_eq!(months_after(date(2025, 4, 15), 12), date(2026, 4, 15));
    }

    #[test]
    fn test_months_after_clamps_at_month_end() {
        assert_eq!(months_after(date(2025, 1, 31), 1), date(2025, 2, 28));
    }
}
