use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Price label that marks a record as free, compared case-insensitively
pub const FREE_PRICE: &str = "free";

/// Identifier of a record, unique within a loaded set.
/// The JSON feeds use integers for events but strings elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Number(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// Anything the listing pages can filter, count and paginate.
pub trait Record {
    fn id(&self) -> &RecordId;

    fn title(&self) -> &str;

    /// Label used by the category filter. `None` never matches a category constraint.
    fn category(&self) -> Option<&str>;

    fn price(&self) -> Option<&str> {
        None
    }

    fn is_featured(&self) -> bool {
        false
    }

    /// Calendar date of the record, `None` when absent or unparseable
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Text the free-text search runs against
    fn searchable_text(&self) -> String;

    fn is_free(&self) -> bool {
        self.price()
            .is_some_and(|price| price.trim().to_lowercase() == FREE_PRICE)
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn id(&self) -> &RecordId {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }

    fn price(&self) -> Option<&str> {
        (**self).price()
    }

    fn is_featured(&self) -> bool {
        (**self).is_featured()
    }

    fn date(&self) -> Option<NaiveDate> {
        (**self).date()
    }

    fn searchable_text(&self) -> String {
        (**self).searchable_text()
    }

    fn is_free(&self) -> bool {
        (**self).is_free()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub date: Option<NaiveDate>,
    pub schedule: Schedule,
    pub location: String,
    pub spots_available: Option<u32>,
    pub featured: bool,
    pub registration_link: String,
}

impl Record for Event {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn price(&self) -> Option<&str> {
        Some(&self.price)
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn searchable_text(&self) -> String {
        [
            self.title.as_str(),
            &self.description,
            &self.location,
            &self.category,
        ]
        .join(" ")
    }
}

/// Start and end time labels, as written in the feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub start: String,
    pub end: String,
}

impl Schedule {
    pub fn new(start: String, end: String) -> Self {
        Self { start, end }
    }

    /// "start - end", or whichever half is present
    pub fn time_range(&self) -> Option<String> {
        match (self.start.trim(), self.end.trim()) {
            ("", "") => None,
            (start, "") => Some(start.to_string()),
            ("", end) => Some(end.to_string()),
            (start, end) => Some(format!("{} - {}", start, end)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr, strum::Display)]
pub enum MembershipLevel {
    Member,
    Silver,
    Gold,
}

impl MembershipLevel {
    /// Levels are numbered 1 to 3 in the directory feed; anything else is a plain member
    pub fn from_rank(rank: i64) -> Self {
        match rank {
            2 => MembershipLevel::Silver,
            3 => MembershipLevel::Gold,
            _ => MembershipLevel::Member,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image: String,
    pub level: MembershipLevel,
}

impl Record for Member {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        Some(self.level.into())
    }

    fn is_featured(&self) -> bool {
        self.level == MembershipLevel::Gold
    }

    fn searchable_text(&self) -> String {
        let level: &'static str = self.level.into();

        [self.name.as_str(), &self.address, level].join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: RecordId,
    pub subject: String,
    pub number: u32,
    pub title: String,
    pub credits: u32,
    pub certificate: String,
    pub description: String,
    pub technology: Vec<String>,
    pub completed: bool,
}

impl Course {
    /// e.g. "CSE 110"
    pub fn code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }
}

impl Record for Course {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(&self.subject)
    }

    fn searchable_text(&self) -> String {
        let mut parts = vec![self.code(), self.title.clone(), self.description.clone()];
        parts.extend(self.technology.iter().cloned());

        parts.join(" ")
    }
}
