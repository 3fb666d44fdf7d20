use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month used as the exchange-rate cache key.
///
/// A closed month's rates are immutable; the month containing today is still
/// moving and is never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RateMonth {
    pub year: i32,
    pub month: u32,
}

impl RateMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Last calendar day of the month, the instant historical rates are pinned to.
    pub fn end(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        // First day of the next month always exists.
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or(NaiveDate::MAX)
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }
}

impl std::fmt::Display for RateMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_end_handles_year_boundary() {
        let december = RateMonth { year: 2023, month: 12 };
        assert_eq!(december.end(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn month_end_handles_february() {
        let leap = RateMonth { year: 2024, month: 2 };
        assert_eq!(leap.end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let common = RateMonth { year: 2023, month: 2 };
        assert_eq!(common.end(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn months_order_chronologically() {
        let earlier = RateMonth { year: 2023, month: 12 };
        let later = RateMonth { year: 2024, month: 1 };
        assert!(earlier < later);
    }
}
