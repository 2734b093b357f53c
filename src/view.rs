//! Display data derived from records, free of any markup.

use crate::catalog::model::{Course, Event, Member, Record, RecordId};
use chrono::{Datelike, NaiveDate};
use std::fmt::{Display, Formatter};

/// Below this many remaining spots an event is flagged as filling up
pub const DEFAULT_LOW_AVAILABILITY_THRESHOLD: u32 = 20;

const REGISTER_FREE: &str = "Register Free";
const GET_TICKETS: &str = "Get Tickets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    /// e.g. "Mar"
    pub month: String,
    /// e.g. "Saturday"
    pub weekday: String,
    /// e.g. "Saturday, March 15, 2025"
    pub long: String,
}

impl DateParts {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.format("%b").to_string(),
            weekday: date.format("%A").to_string(),
            long: date.format("%A, %B %-d, %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spots {
    pub remaining: u32,
    pub low: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventCard<'a> {
    pub id: &'a RecordId,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price: &'a str,
    pub location: &'a str,
    pub time_range: Option<String>,
    pub date: Option<DateParts>,
    pub spots: Option<Spots>,
    pub featured: bool,
    pub free: bool,
    pub cta_label: &'static str,
    pub registration_link: &'a str,
}

impl<'a> EventCard<'a> {
    pub fn new(event: &'a Event, low_availability_threshold: u32) -> Self {
        let free = event.is_free();

        Self {
            id: &event.id,
            title: &event.title,
            description: &event.description,
            category: &event.category,
            price: &event.price,
            location: &event.location,
            time_range: event.schedule.time_range(),
            date: event.date.map(DateParts::new),
            spots: event.spots_available.map(|remaining| Spots {
                remaining,
                low: remaining < low_availability_threshold,
            }),
            featured: event.featured,
            free,
            cta_label: if free { REGISTER_FREE } else { GET_TICKETS },
            registration_link: &event.registration_link,
        }
    }
}

/// Plain-text summary shown when a visitor asks for an event's details
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: Option<DateParts>,
    pub time_range: Option<String>,
    pub location: &'a str,
    pub price: &'a str,
}

impl<'a> EventDetails<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self {
            title: &event.title,
            description: &event.description,
            date: event.date.map(DateParts::new),
            time_range: event.schedule.time_range(),
            location: &event.location,
            price: &event.price,
        }
    }
}

impl Display for EventDetails<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Event Details: {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        if let Some(date) = &self.date {
            writeln!(f, "Date: {}", date.long)?;
        }
        if let Some(time_range) = &self.time_range {
            writeln!(f, "Time: {}", time_range)?;
        }
        writeln!(f, "Location: {}", self.location)?;
        write!(f, "Price: {}", self.price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberCard<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub website: Option<&'a str>,
    pub image: Option<&'a str>,
    pub level: &'static str,
    pub featured: bool,
}

impl<'a> MemberCard<'a> {
    pub fn new(member: &'a Member) -> Self {
        Self {
            name: &member.name,
            address: &member.address,
            phone: &member.phone,
            website: non_empty(&member.website),
            image: non_empty(&member.image),
            level: member.level.into(),
            featured: member.is_featured(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard<'a> {
    pub code: String,
    pub title: &'a str,
    pub description: &'a str,
    pub credits: u32,
    pub technology: &'a [String],
    pub completed: bool,
}

impl<'a> CourseCard<'a> {
    pub fn new(course: &'a Course) -> Self {
        Self {
            code: course.code(),
            title: &course.title,
            description: &course.description,
            credits: course.credits,
            technology: &course.technology,
            completed: course.completed,
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
