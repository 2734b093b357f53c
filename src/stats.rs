use crate::catalog::model::{Course, Record};
use crate::filter::{Criteria, DateRange};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub free: usize,
    pub featured: usize,
    pub upcoming: usize,
}

/// Counts over the full, unfiltered record set.
/// "Upcoming" goes through the same criteria the filter engine uses.
pub fn summarize<R: Record>(records: &[R], today: NaiveDate) -> Summary {
    let upcoming = Criteria::all().with_date_range(DateRange::Upcoming);

    records.iter().fold(
        Summary {
            total: records.len(),
            ..Summary::default()
        },
        |mut summary, record| {
            summary.free += usize::from(record.is_free());
            summary.featured += usize::from(record.is_featured());
            summary.upcoming += usize::from(upcoming.matches(record, today));
            summary
        },
    )
}

pub fn total_credits<'a>(courses: impl IntoIterator<Item = &'a Course>) -> u32 {
    courses.into_iter().map(|course| course.credits).sum()
}
