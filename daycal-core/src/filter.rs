//! Search and category filtering applied before the calendar views.

use crate::event::{Category, Event};

/// What the views show. The default shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive substring of the title or description.
    pub search: Option<String>,
    /// `None` means all categories.
    pub category: Option<Category>,
}

impl EventFilter {
    pub fn new(search: Option<String>, category: Option<Category>) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        EventFilter { search, category }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_search(event) && self.matches_category(event)
    }

    fn matches_search(&self, event: &Event) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();
        event.title.to_lowercase().contains(&term)
            || event
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }

    fn matches_category(&self, event: &Event) -> bool {
        self.category.is_none_or(|c| c == event.category)
    }

    /// The matching events, in their original order.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(title: &str, description: Option<&str>, category: Category) -> Event {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut event = Event::new(
            title,
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap()
        .with_category(category);
        event.description = description.map(str::to_string);
        event
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = EventFilter::default();
        assert!(filter.matches(&event("Anything", None, Category::Health)));
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let filter = EventFilter::new(Some("Dentist".into()), None);
        assert!(filter.matches(&event("dentist appointment", None, Category::General)));
        assert!(filter.matches(&event("Checkup", Some("at the DENTIST"), Category::Health)));
        assert!(!filter.matches(&event("Checkup", None, Category::Health)));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = EventFilter::new(Some("   ".into()), None);
        assert_eq!(filter, EventFilter::default());
    }

    #[test]
    fn test_category_and_search_combine() {
        let events = vec![
            event("Team sync", None, Category::Work),
            event("Team dinner", None, Category::Personal),
            event("Review", Some("team review"), Category::Work),
        ];
        let filter = EventFilter::new(Some("team".into()), Some(Category::Work));
        let titles: Vec<_> = filter.apply(&events).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Team sync", "Review"]);
    }
}
