//! Closed wall-clock intervals and the overlap test used by conflict checks.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A closed `[start, end]` span of local wall-clock time.
///
/// Construction rejects `end < start`. Zero-length intervals are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("end time {end} is before start time {start}")]
pub struct IntervalError {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole calendar day `[date 00:00, date+1 00:00]`, saturating on
    /// the last representable day.
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN);
        Self {
            start,
            end: start
                .checked_add_signed(Duration::days(1))
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Inclusive overlap: intervals that merely touch (one ends exactly when
    /// the other begins) DO overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The part of this interval inside `[from, to]`, or `None` if disjoint.
    pub fn clamp(&self, from: NaiveDateTime, to: NaiveDateTime) -> Option<Interval> {
        let start = self.start.max(from);
        let end = self.end.min(to);
        Interval::new(start, end).ok()
    }
}

/// Free-function form of [`Interval::overlaps`].
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn span(day: u32, (sh, sm): (u32, u32), (eh, em): (u32, u32)) -> Interval {
        Interval::new(at(day, sh, sm), at(day, eh, em)).unwrap()
    }

    #[test]
    fn test_rejects_end_before_start() {
        let err = Interval::new(at(1, 10, 0), at(1, 9, 0)).unwrap_err();
        assert_eq!(err.start, at(1, 10, 0));
        assert_eq!(err.end, at(1, 9, 0));
    }

    #[test]
    fn test_zero_length_is_allowed() {
        let i = Interval::new(at(1, 9, 0), at(1, 9, 0)).unwrap();
        assert_eq!(i.duration(), Duration::zero());
    }

    #[test]
    fn test_touching_endpoints_overlap() {
        let a = span(1, (9, 0), (10, 0));
        let b = span(1, (10, 0), (11, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        let a = span(1, (9, 0), (10, 0));
        let b = span(1, (10, 1), (11, 0));
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = span(1, (9, 0), (12, 0));
        let inner = span(1, (9, 30), (9, 45));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let spans = [
            span(1, (8, 0), (9, 0)),
            span(1, (9, 0), (9, 0)),
            span(1, (8, 30), (12, 0)),
            span(1, (12, 0), (13, 0)),
            span(2, (0, 0), (1, 0)),
        ];
        for a in &spans {
            for b in &spans {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_clamp_to_day() {
        let overnight = Interval::new(at(1, 22, 0), at(2, 2, 0)).unwrap();
        let day = Interval::day(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let clipped = overnight.clamp(day.start(), day.end()).unwrap();
        assert_eq!(clipped.start(), at(2, 0, 0));
        assert_eq!(clipped.end(), at(2, 2, 0));

        let far = span(5, (9, 0), (10, 0));
        assert!(far.clamp(day.start(), day.end()).is_none());
    }
}
