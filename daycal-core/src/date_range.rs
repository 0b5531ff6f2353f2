//! Inclusive day ranges for the calendar grids.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::{DayCalError, DayCalResult};

/// Days covered by a listing when no end date is given.
pub const DEFAULT_LIST_DAYS: u64 = 7;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// `from` and `to` are swapped if given in the wrong order.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if to < from {
            DateRange { from: to, to: from }
        } else {
            DateRange { from, to }
        }
    }

    /// The Monday-to-Sunday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let from = date.week(Weekday::Mon).first_day();
        DateRange {
            from,
            to: from.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX),
        }
    }

    /// The month containing `date`, without padding.
    pub fn month_of(date: NaiveDate) -> Self {
        let from = date.with_day(1).unwrap_or(date);
        let to = from
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        DateRange { from, to }
    }

    /// The month grid: the month padded out to whole Monday-start weeks.
    pub fn month_grid(year: i32, month: u32) -> DayCalResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DayCalError::InvalidEvent(format!("no such month {year}-{month:02}")))?;
        let month = Self::month_of(first);
        Ok(DateRange {
            from: Self::week_of(month.from).from,
            to: Self::week_of(month.to).to,
        })
    }

    /// Parse `--from`/`--to` CLI input (YYYY-MM-DD). `from` defaults to
    /// `today`; `to` defaults to [`DEFAULT_LIST_DAYS`] days from `from`.
    pub fn from_args(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> DayCalResult<Self> {
        let from = match from {
            Some(s) => parse_date(s)?,
            None => today,
        };
        let to = match to {
            Some(s) => parse_date(s)?,
            None => from
                .checked_add_days(Days::new(DEFAULT_LIST_DAYS - 1))
                .unwrap_or(NaiveDate::MAX),
        };
        Ok(Self::new(from, to))
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from.iter_days().take_while(|d| *d <= self.to)
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> DayCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        DayCalError::InvalidEvent(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2024-01-03 is a Wednesday
        let week = DateRange::week_of(date(2024, 1, 3));
        assert_eq!(week.from, date(2024, 1, 1));
        assert_eq!(week.to, date(2024, 1, 7));
        assert_eq!(week.days().count(), 7);

        let sunday = DateRange::week_of(date(2024, 1, 7));
        assert_eq!(sunday.from, date(2024, 1, 1));
    }

    #[test]
    fn test_month_of_handles_leap_february() {
        let feb = DateRange::month_of(date(2024, 2, 10));
        assert_eq!(feb.from, date(2024, 2, 1));
        assert_eq!(feb.to, date(2024, 2, 29));
    }

    #[test]
    fn test_month_grid_pads_to_whole_weeks() {
        // June 2024 starts on a Saturday and ends on a Sunday
        let grid = DateRange::month_grid(2024, 6).unwrap();
        assert_eq!(grid.from, date(2024, 5, 27));
        assert_eq!(grid.to, date(2024, 6, 30));
        assert_eq!(grid.days().count() % 7, 0);
    }

    #[test]
    fn test_month_grid_rejects_bad_month() {
        assert!(DateRange::month_grid(2024, 13).is_err());
    }

    #[test]
    fn test_from_args_orders_bounds() {
        let today = date(2024, 6, 1);
        let range = DateRange::from_args(Some("2024-03-10"), Some("2024-03-01"), today).unwrap();
        assert_eq!(range.from, date(2024, 3, 1));
        assert_eq!(range.to, date(2024, 3, 10));
        assert!(DateRange::from_args(Some("10/03/2024"), None, today).is_err());
    }

    #[test]
    fn test_from_args_defaults_to_a_week_from_today() {
        let today = date(2024, 6, 1);
        let range = DateRange::from_args(None, None, today).unwrap();
        assert_eq!(range, DateRange::new(today, date(2024, 6, 7)));

        let range = DateRange::from_args(Some("2024-06-10"), None, today).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 6, 10), date(2024, 6, 16)));
    }

    #[test]
    fn test_days_are_inclusive() {
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1));
        let days: Vec<_> = range.days().collect();
        assert_eq!(days, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
    }
}
