pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod events;
pub mod month;
pub mod new;
pub mod reschedule;
pub mod week;

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use clap::{Args, ValueEnum};
use daycal_core::date_range::parse_date;
use daycal_core::event::parse_timestamp;
use daycal_core::{Category, Event, EventFilter, Recurrence, Weekdays};

/// Start time for new events when none is given
const DEFAULT_START: &str = "09:00";

/// Length of new events when neither end nor duration is given
const DEFAULT_DURATION_MINUTES: i64 = 60;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse an optional YYYY-MM-DD argument, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(today()),
    }
}

/// `--search` and `--category`, shared by the views.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only show events whose title or description contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Only show events in this category
    #[arg(short, long)]
    pub category: Option<Category>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> EventFilter {
        EventFilter::new(self.search.clone(), self.category)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    None,
    Daily,
    Weekly,
    Monthly,
}

/// Event fields shared by `new` and `edit`. Unset fields keep their value.
#[derive(Args, Debug, Default)]
pub struct EventFields {
    /// Day of the event (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM, or YYYY-MM-DDTHH:MM for events ending on another day)
    #[arg(short, long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration (e.g., "30m", "1h", "2h 30m")
    #[arg(short, long, conflicts_with = "end")]
    pub duration: Option<String>,

    /// Event description (pass "" to clear it)
    #[arg(long)]
    pub description: Option<String>,

    /// Category (General, Work, Personal, Meeting, Holiday, Study, Health)
    #[arg(short, long)]
    pub category: Option<Category>,

    /// How the event repeats
    #[arg(short, long, value_enum)]
    pub repeat: Option<Repeat>,

    /// Weekdays for weekly events (e.g., "mon,wed" or "1,3" with 0 = Sunday)
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,
}

impl EventFields {
    /// Apply the given fields to `event`. Moving the start keeps the
    /// event's length unless a new end or duration is given.
    pub fn apply_to(&self, event: &mut Event) -> Result<()> {
        let length = event.end - event.start;

        let date = match &self.date {
            Some(s) => parse_date(s)?,
            None => event.start.date(),
        };
        let time = match &self.start {
            Some(s) => parse_time(s)?,
            None => event.start.time(),
        };
        let start = date.and_time(time);

        let end = if let Some(end) = &self.end {
            parse_end(end, date)?
        } else if let Some(duration) = &self.duration {
            start
                .checked_add_signed(parse_duration(duration)?)
                .context("Duration too large")?
        } else {
            start
                .checked_add_signed(length)
                .context("Event end is out of range")?
        };

        event.start = start;
        event.end = end;

        if let Some(description) = &self.description {
            let description = description.trim();
            event.description = (!description.is_empty()).then(|| description.to_string());
        }

        if let Some(category) = self.category {
            event.category = category;
        }

        if let Some(recurrence) = self.recurrence(start.date())? {
            event.recurrence = recurrence;
        }

        Ok(())
    }

    /// The recurrence asked for, if any. `--days` alone implies weekly, and
    /// weekly without `--days` repeats on the start's weekday.
    fn recurrence(&self, start: NaiveDate) -> Result<Option<Recurrence>> {
        let days = parse_weekdays(&self.days)?;

        let repeat = match (self.repeat, days.is_empty()) {
            (Some(repeat), _) => repeat,
            (None, false) => Repeat::Weekly,
            (None, true) => return Ok(None),
        };

        let recurrence = match repeat {
            Repeat::None => Recurrence::None,
            Repeat::Daily => Recurrence::Daily,
            Repeat::Monthly => Recurrence::Monthly,
            Repeat::Weekly if days.is_empty() => Recurrence::Weekly {
                days: [start.weekday()].into_iter().collect(),
            },
            Repeat::Weekly => Recurrence::Weekly { days },
        };

        Ok(Some(recurrence))
    }
}

/// A new event's starting point before the user's fields are applied.
pub fn default_event(title: String, category: Category) -> Result<Event> {
    let start = today().and_time(parse_time(DEFAULT_START)?);
    let end = start + Duration::minutes(DEFAULT_DURATION_MINUTES);
    Ok(Event::new(title, start, end)?.with_category(category))
}

/// Parse HH:MM
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}'. Expected HH:MM", s))
}

/// Parse an end given as a time on `date` or as a full timestamp.
fn parse_end(s: &str, date: NaiveDate) -> Result<NaiveDateTime> {
    if s.contains('T') {
        return Ok(parse_timestamp(s.trim())?);
    }
    Ok(date.and_time(parse_time(s)?))
}

fn parse_duration(s: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(s)
        .with_context(|| format!("Could not parse duration: \"{}\"", s))?;
    Duration::from_std(std_dur).context("Duration too large")
}

/// Accepts day names ("mon", "Monday") or 0-6 with 0 = Sunday.
fn parse_weekday(s: &str) -> Result<Weekday> {
    let s = s.trim();
    if let Ok(index) = s.parse::<u8>() {
        return Weekdays::from_indices([index])
            .iter()
            .next()
            .with_context(|| format!("Invalid weekday '{}'. Use 0-6 with 0 = Sunday", s));
    }
    Weekday::from_str(s).map_err(|_| anyhow::anyhow!("Invalid weekday '{}'", s))
}

fn parse_weekdays(days: &[String]) -> Result<Weekdays> {
    days.iter()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_weekday(d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn event() -> Event {
        Event::new("review", at(2024, 6, 8, 9, 0), at(2024, 6, 8, 10, 30)).unwrap()
    }

    #[test]
    fn test_new_start_keeps_length() {
        let mut event = event();
        let fields = EventFields {
            date: Some("2024-06-10".into()),
            start: Some("14:00".into()),
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(event.start, at(2024, 6, 10, 14, 0));
        assert_eq!(event.end, at(2024, 6, 10, 15, 30));
    }

    #[test]
    fn test_end_and_duration() {
        let mut event = event();
        let fields = EventFields {
            end: Some("11:15".into()),
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(event.end, at(2024, 6, 8, 11, 15));

        let fields = EventFields {
            duration: Some("2h 30m".into()),
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(event.end, at(2024, 6, 8, 11, 30));

        let fields = EventFields {
            end: Some("2024-06-09T02:00".into()),
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(event.end, at(2024, 6, 9, 2, 0));
    }

    #[test]
    fn test_oversized_duration_is_an_error() {
        let mut event = event();
        let fields = EventFields {
            duration: Some("1000000years".into()),
            ..Default::default()
        };
        assert!(fields.apply_to(&mut event).is_err());
        assert_eq!(event.end, at(2024, 6, 8, 10, 30));
    }

    #[test]
    fn test_moving_start_past_last_day_is_an_error() {
        let last = NaiveDate::MAX;
        let mut event = Event::new(
            "late",
            last.and_hms_opt(21, 0, 0).unwrap(),
            last.and_hms_opt(22, 0, 0).unwrap(),
        )
        .unwrap();
        let fields = EventFields {
            start: Some("23:30".into()),
            ..Default::default()
        };
        assert!(fields.apply_to(&mut event).is_err());
    }

    #[test]
    fn test_empty_description_clears_it() {
        let mut event = event().with_description("notes");
        let fields = EventFields {
            description: Some(String::new()),
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_weekly_days_by_name_or_index() {
        let mut event = event();
        let fields = EventFields {
            repeat: Some(Repeat::Weekly),
            days: vec!["mon".into(), "3".into()],
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(
            event.recurrence,
            Recurrence::Weekly {
                days: Weekdays::from_indices([1, 3])
            }
        );
    }

    #[test]
    fn test_days_alone_imply_weekly() {
        let mut event = event();
        let fields = EventFields {
            days: vec!["Friday".into()],
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(
            event.recurrence,
            Recurrence::Weekly {
                days: Weekdays::from_indices([5])
            }
        );
    }

    #[test]
    fn test_weekly_without_days_uses_start_weekday() {
        // 2024-06-08 is a Saturday
        let mut event = event();
        let fields = EventFields {
            repeat: Some(Repeat::Weekly),
            ..Default::default()
        };
        fields.apply_to(&mut event).unwrap();
        assert_eq!(
            event.recurrence,
            Recurrence::Weekly {
                days: Weekdays::from_indices([6])
            }
        );
    }

    #[test]
    fn test_invalid_input_is_reported() {
        assert!(parse_time("9am").is_err());
        assert!(parse_weekday("7").is_err());
        assert!(parse_weekday("someday").is_err());
        assert!(parse_duration("soon").is_err());
    }
}
