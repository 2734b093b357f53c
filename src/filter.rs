//! Filtering, sorting and lookups over a loaded record set.
//!
//! Every function here is pure: it borrows the source records and returns a
//! new view, leaving the source list untouched.

use crate::catalog::model::{Record, RecordId};
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use itertools::Itertools;
use std::str::FromStr;

/// Selector value meaning "no constraint"
pub const ALL: &str = "all";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown price filter '{0}'")]
    UnknownPrice(String),

    #[error("unknown date range '{0}'")]
    UnknownDateRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PriceFilter {
    Free,
    Paid,
}

/// Symbolic date windows, all relative to "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DateRange {
    /// today up to today + 7 days
    ThisWeek,
    /// today up to the same day next month
    ThisMonth,
    /// first to last day of the following calendar month
    NextMonth,
    /// today onwards
    Upcoming,
}

impl DateRange {
    /// Inclusive bounds of the window, the end is open for `Upcoming`
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, Option<NaiveDate>) {
        match self {
            DateRange::ThisWeek => (today, today.checked_add_days(Days::new(7))),
            DateRange::ThisMonth => (today, today.checked_add_months(Months::new(1))),
            DateRange::NextMonth => {
                let start = today
                    .with_day(1)
                    .and_then(|first| first.checked_add_months(Months::new(1)))
                    .unwrap_or(today);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|following| following.pred_opt());

                (start, end)
            }
            DateRange::Upcoming => (today, None),
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.bounds(today);

        date >= start && end.map_or(true, |end| date <= end)
    }
}

/// One-click filters of the events page, each mapping onto a [`Criteria`]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QuickFilter {
    #[default]
    All,
    Featured,
    Free,
    /// any category mentioning "workshop", e.g. "Workshop Series"
    Workshop,
}

impl QuickFilter {
    pub fn criteria(self) -> Criteria {
        match self {
            QuickFilter::All => Criteria::all(),
            QuickFilter::Featured => Criteria::all().featured_only(),
            QuickFilter::Free => Criteria::all().with_price(PriceFilter::Free),
            QuickFilter::Workshop => Criteria::all().with_category_containing("workshop"),
        }
    }
}

/// Filter options, all ANDed together. The default value constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    category: Option<String>,
    category_keyword: Option<String>,
    price: Option<PriceFilter>,
    featured: bool,
    search_term: Option<String>,
    date_range: Option<DateRange>,
}

impl Criteria {
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds criteria from the raw values of the filter controls, where "all" or "" mean unset
    pub fn from_options(
        category: &str,
        price: &str,
        date_range: &str,
        search_term: &str,
    ) -> Result<Self, CriteriaError> {
        let mut criteria = Self::all()
            .with_category(category)
            .with_search_term(search_term);

        if !is_unset(price) {
            criteria.price = Some(
                PriceFilter::from_str(price.trim())
                    .map_err(|_| CriteriaError::UnknownPrice(price.to_string()))?,
            );
        }

        if !is_unset(date_range) {
            criteria.date_range = Some(
                DateRange::from_str(date_range.trim())
                    .map_err(|_| CriteriaError::UnknownDateRange(date_range.to_string()))?,
            );
        }

        Ok(criteria)
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = (!is_unset(category)).then(|| category.trim().to_lowercase());
        self
    }

    /// Keeps records whose category contains `keyword`, ignoring case
    pub fn with_category_containing(mut self, keyword: &str) -> Self {
        let keyword = keyword.trim();
        self.category_keyword = (!keyword.is_empty()).then(|| keyword.to_lowercase());
        self
    }

    pub fn with_price(mut self, price: PriceFilter) -> Self {
        self.price = Some(price);
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Blank terms clear the search constraint
    pub fn with_search_term(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search_term = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = Some(date_range);
        self
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches<R: Record>(&self, record: &R, today: NaiveDate) -> bool {
        if let Some(category) = &self.category {
            match record.category() {
                Some(label) if label.trim().to_lowercase() == *category => {}
                _ => return false,
            }
        }

        if let Some(keyword) = &self.category_keyword {
            match record.category() {
                Some(label) if label.to_lowercase().contains(keyword.as_str()) => {}
                _ => return false,
            }
        }

        match self.price {
            Some(PriceFilter::Free) if !record.is_free() => return false,
            Some(PriceFilter::Paid) if record.is_free() => return false,
            _ => {}
        }

        if self.featured && !record.is_featured() {
            return false;
        }

        if let Some(term) = &self.search_term {
            if !record.searchable_text().to_lowercase().contains(term.as_str()) {
                return false;
            }
        }

        if let Some(date_range) = self.date_range {
            match record.date() {
                Some(date) if date_range.contains(date, today) => {}
                _ => return false,
            }
        }

        true
    }
}

fn is_unset(value: &str) -> bool {
    let value = value.trim();

    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Records matching `criteria`, in source order
pub fn apply<'a, R: Record>(records: &'a [R], criteria: &Criteria, today: NaiveDate) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| criteria.matches(*record, today))
        .collect()
}

pub fn apply_now<'a, R: Record>(records: &'a [R], criteria: &Criteria) -> Vec<&'a R> {
    apply(records, criteria, today())
}

/// Stable ascending sort by date, records with an unknown date go last
pub fn sort_by_date<'a, R: Record + 'a>(records: impl IntoIterator<Item = &'a R>) -> Vec<&'a R> {
    records
        .into_iter()
        .sorted_by_key(|record| {
            let date = record.date();
            (date.is_none(), date)
        })
        .collect()
}

/// The next `limit` records from today onwards, soonest first
pub fn upcoming<R: Record>(records: &[R], limit: usize, today: NaiveDate) -> Vec<&R> {
    let criteria = Criteria::all().with_date_range(DateRange::Upcoming);

    sort_by_date(apply(records, &criteria, today))
        .into_iter()
        .take(limit)
        .collect()
}

pub fn featured<R: Record>(records: &[R], limit: usize) -> Vec<&R> {
    records
        .iter()
        .filter(|record| record.is_featured())
        .take(limit)
        .collect()
}

pub fn by_category<'a, R: Record>(
    records: &'a [R],
    category: &str,
    limit: Option<usize>,
) -> Vec<&'a R> {
    let criteria = Criteria::all().with_category(category);

    records
        .iter()
        .filter(|record| criteria.matches(*record, NaiveDate::MIN))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// `None` when no record carries the id
pub fn find_by_id<'a, R: Record>(records: &'a [R], id: &RecordId) -> Option<&'a R> {
    records.iter().find(|record| record.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{Course, Event, Schedule};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: i64, category: &str, price: &str, date: Option<NaiveDate>) -> Event {
        Event {
            id: RecordId::Number(id),
            title: format!("Event {}", id),
            description: "Monthly gathering for local businesses".to_string(),
            category: category.to_string(),
            price: price.to_string(),
            date,
            schedule: Schedule::default(),
            location: "Chamber Hall".to_string(),
            spots_available: None,
            featured: false,
            registration_link: String::new(),
        }
    }

    fn course(subject: &str, number: u32) -> Course {
        Course {
            id: RecordId::Text(format!("{} {}", subject, number)),
            subject: subject.to_string(),
            number,
            title: format!("{} course {}", subject, number),
            credits: 2,
            certificate: "Web and Computer Programming".to_string(),
            description: String::new(),
            technology: Vec::new(),
            completed: false,
        }
    }

    fn ids<R: Record>(records: &[R]) -> Vec<String> {
        records.iter().map(|record| record.id().to_string()).collect()
    }

    fn courses() -> Vec<Course> {
        vec![
            course("CSE", 110),
            course("WDD", 130),
            course("CSE", 111),
            course("CSE", 210),
            course("WDD", 131),
            course("WDD", 231),
        ]
    }

    #[test_log::test]
    fn filtering_courses_by_subject_should_keep_source_order() {
        let courses = courses();
        let today = date(2025, 1, 1);

        let cse = apply(&courses, &Criteria::all().with_category("cse"), today);
        let all = apply(&courses, &Criteria::all().with_category("all"), today);

        assert_eq!(ids(&cse), vec!["CSE 110", "CSE 111", "CSE 210"]);
        assert_eq!(all.len(), 6);
    }

    #[test_log::test]
    fn empty_criteria_should_be_identity() {
        let courses = courses();

        let result = apply(&courses, &Criteria::all(), date(2025, 1, 1));

        assert_eq!(ids(&result), ids(&courses));
    }

    #[test_log::test]
    fn filtering_twice_should_equal_filtering_once() {
        let today = date(2025, 3, 10);
        let events = vec![
            event(1, "Networking", "Free", Some(date(2025, 3, 12))),
            event(2, "Workshop Series", "$20", Some(date(2025, 3, 14))),
            event(3, "Networking", "FREE", Some(date(2025, 2, 1))),
            event(4, "Networking", "free", None),
        ];
        let criteria = Criteria::all()
            .with_category("networking")
            .with_price(PriceFilter::Free)
            .with_date_range(DateRange::Upcoming);

        let once = apply(&events, &criteria, today);
        let twice = apply(&once, &criteria, today);

        assert_eq!(ids(&once), vec!["1"]);
        assert_eq!(ids(&twice), ids(&once));
    }

    #[test_log::test]
    fn free_filter_should_ignore_case_and_paid_should_be_its_complement() {
        let events = vec![
            event(1, "Networking", "Free", None),
            event(2, "Networking", "FREE", None),
            event(3, "Networking", "$15", None),
        ];
        let today = date(2025, 1, 1);

        let free = apply(&events, &Criteria::all().with_price(PriceFilter::Free), today);
        let paid = apply(&events, &Criteria::all().with_price(PriceFilter::Paid), today);

        assert_eq!(ids(&free), vec!["1", "2"]);
        assert_eq!(ids(&paid), vec!["3"]);
    }

    #[test_log::test]
    fn search_should_match_category_case_insensitively() {
        let events = vec![
            event(1, "Workshop Series", "$10", None),
            event(2, "Networking", "$10", None),
        ];

        let result = apply(
            &events,
            &Criteria::all().with_search_term("workshop"),
            date(2025, 1, 1),
        );

        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test_log::test]
    fn blank_search_term_should_not_constrain() {
        let criteria = Criteria::all().with_search_term("   ");

        assert!(criteria.is_empty());
        assert_eq!(criteria.search_term(), None);
    }

    #[test_log::test]
    fn featured_filter_should_keep_only_featured_records() {
        let mut events = vec![event(1, "Gala", "$50", None), event(2, "Gala", "$50", None)];
        events[1].featured = true;

        let result = apply(&events, &Criteria::all().featured_only(), date(2025, 1, 1));

        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test_log::test]
    fn unknown_dates_should_be_excluded_from_date_ranges() {
        let events = vec![event(1, "Gala", "$50", None)];

        for range in [
            DateRange::ThisWeek,
            DateRange::ThisMonth,
            DateRange::NextMonth,
            DateRange::Upcoming,
        ] {
            let result = apply(
                &events,
                &Criteria::all().with_date_range(range),
                date(2025, 1, 1),
            );

            assert!(result.is_empty(), "{} kept an undated record", range);
        }
    }

    #[test_log::test]
    fn date_ranges_should_follow_calendar_windows() {
        let today = date(2025, 1, 31);

        assert!(DateRange::Upcoming.contains(today, today));
        assert!(!DateRange::Upcoming.contains(date(2025, 1, 30), today));

        assert!(DateRange::ThisWeek.contains(date(2025, 2, 7), today));
        assert!(!DateRange::ThisWeek.contains(date(2025, 2, 8), today));

        // one calendar month from Jan 31 clamps to the end of February
        assert!(DateRange::ThisMonth.contains(date(2025, 2, 28), today));
        assert!(!DateRange::ThisMonth.contains(date(2025, 3, 1), today));

        assert!(!DateRange::NextMonth.contains(date(2025, 1, 31), today));
        assert!(DateRange::NextMonth.contains(date(2025, 2, 1), today));
        assert!(DateRange::NextMonth.contains(date(2025, 2, 28), today));
        assert!(!DateRange::NextMonth.contains(date(2025, 3, 1), today));
    }

    #[test_log::test]
    fn next_month_should_roll_over_the_year() {
        let (start, end) = DateRange::NextMonth.bounds(date(2025, 12, 15));

        assert_eq!(start, date(2026, 1, 1));
        assert_eq!(end, Some(date(2026, 1, 31)));
    }

    #[test_log::test]
    fn sort_by_date_should_be_stable_and_put_unknown_dates_last() {
        let events = vec![
            event(1, "Gala", "$50", Some(date(2025, 5, 2))),
            event(2, "Gala", "$50", None),
            event(3, "Gala", "$50", Some(date(2025, 5, 1))),
            event(4, "Gala", "$50", Some(date(2025, 5, 2))),
            event(5, "Gala", "$50", Some(date(2025, 5, 1))),
        ];

        let sorted = sort_by_date(&events);

        assert_eq!(ids(&sorted), vec!["3", "5", "1", "4", "2"]);
    }

    #[test_log::test]
    fn upcoming_should_return_soonest_records_from_today() {
        let today = date(2025, 4, 10);
        let events = vec![
            event(1, "Gala", "$50", Some(date(2025, 6, 1))),
            event(2, "Gala", "$50", Some(date(2025, 4, 9))),
            event(3, "Gala", "$50", Some(date(2025, 4, 10))),
            event(4, "Gala", "$50", Some(date(2025, 5, 1))),
        ];

        let next = upcoming(&events, 2, today);

        assert_eq!(ids(&next), vec!["3", "4"]);
    }

    #[test_log::test]
    fn options_should_parse_selector_values() {
        let criteria = Criteria::from_options("Networking", "FREE", "this-week", "").unwrap();

        assert_eq!(
            criteria,
            Criteria::all()
                .with_category("networking")
                .with_price(PriceFilter::Free)
                .with_date_range(DateRange::ThisWeek)
        );
        assert!(Criteria::from_options("all", "all", "all", "").unwrap().is_empty());
    }

    #[test_log::test]
    fn options_should_reject_unknown_tokens() {
        assert_eq!(
            Criteria::from_options("all", "cheap", "all", ""),
            Err(CriteriaError::UnknownPrice("cheap".to_string()))
        );
        assert_eq!(
            Criteria::from_options("all", "all", "someday", ""),
            Err(CriteriaError::UnknownDateRange("someday".to_string()))
        );
    }

    #[test_log::test]
    fn lookups_should_respect_limits_and_absence() {
        let mut events = vec![
            event(1, "Networking", "$5", None),
            event(2, "Workshop Series", "$5", None),
            event(3, "Networking", "$5", None),
        ];
        events[0].featured = true;
        events[2].featured = true;

        assert_eq!(ids(&featured(&events, 1)), vec!["1"]);
        assert_eq!(ids(&by_category(&events, "NETWORKING", None)), vec!["1", "3"]);
        assert_eq!(ids(&by_category(&events, "networking", Some(1))), vec!["1"]);
        assert!(find_by_id(&events, &RecordId::Number(2)).is_some());
        assert!(find_by_id(&events, &RecordId::Number(9)).is_none());
    }

    #[test_log::test]
    fn workshop_quick_filter_should_match_category_substring() {
        let mut events = vec![
            event(1, "Workshop Series", "$25", None),
            event(2, "Networking", "Free", None),
            event(3, "workshops", "Free", None),
        ];
        events[1].featured = true;
        let today = date(2025, 3, 1);

        let workshops = apply(&events, &QuickFilter::Workshop.criteria(), today);
        let featured = apply(&events, &QuickFilter::Featured.criteria(), today);
        let free = apply(&events, &QuickFilter::Free.criteria(), today);

        assert_eq!(ids(&workshops), vec!["1", "3"]);
        assert_eq!(ids(&featured), vec!["2"]);
        assert_eq!(ids(&free), vec!["2", "3"]);
        assert_eq!(apply(&events, &QuickFilter::All.criteria(), today).len(), 3);
        assert!(apply(&events, &Criteria::all().with_category("workshop"), today).is_empty());
    }

    #[test_log::test]
    fn quick_filters_should_parse_button_values() {
        assert_eq!(QuickFilter::from_str("Workshop"), Ok(QuickFilter::Workshop));
        assert_eq!(QuickFilter::Featured.to_string(), "featured");
        assert!(QuickFilter::from_str("music").is_err());
    }
}
