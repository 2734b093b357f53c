use super::model::{Course, Event, Member, MembershipLevel, RecordId, Schedule};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_either::SingleOrVec;
use serde_json::Value;
use tracing::warn;

/// A record as it appears in a feed, before it becomes a model.
pub trait ResponseRecord: DeserializeOwned {
    type Model;

    /// `position` is the index of the record in its feed, used when the feed omits an id
    fn to_model(self, position: usize) -> Self::Model;
}

// Note: every field is lenient, malformed records still load and render partially
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub price: String,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub time: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub end_time: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub spots_available: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub featured: bool,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub registration_link: String,
}

impl ResponseRecord for EventResponse {
    type Model = Event;

    fn to_model(self, position: usize) -> Event {
        Event {
            id: self.id.unwrap_or_else(|| fallback_id(position)),
            title: self.title,
            description: self.description,
            category: self.category,
            price: self.price,
            date: self.date,
            schedule: Schedule::new(self.time, self.end_time),
            location: self.location,
            spots_available: self.spots_available,
            featured: self.featured,
            registration_link: self.registration_link,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub website: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub image: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub level: Option<u32>,
}

impl ResponseRecord for MemberResponse {
    type Model = Member;

    fn to_model(self, position: usize) -> Member {
        let id = match self.id {
            Some(id) => id,
            None if !self.name.is_empty() => RecordId::Text(self.name.clone()),
            None => fallback_id(position),
        };

        Member {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            website: self.website,
            image: self.image,
            level: MembershipLevel::from_rank(self.level.map(i64::from).unwrap_or_default()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CourseResponse {
    #[serde(default, deserialize_with = "deserialize_str")]
    pub subject: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub credits: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub certificate: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_technology")]
    pub technology: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
}

impl ResponseRecord for CourseResponse {
    type Model = Course;

    fn to_model(self, position: usize) -> Course {
        let number = self.number.unwrap_or_default();
        let id = if self.subject.is_empty() {
            fallback_id(position)
        } else {
            RecordId::Text(format!("{} {}", self.subject, number))
        };
        Course {
            id,
            subject: self.subject,
            number,
            title: self.title,
            credits: self.credits.unwrap_or_default(),
            certificate: self.certificate,
            description: self.description,
            technology: self.technology,
            completed: self.completed,
        }
    }
}

fn fallback_id(position: usize) -> RecordId {
    RecordId::Text(format!("record-{}", position + 1))
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS` values
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn deserialize_id<'de, D>(d: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => match n.as_i64() {
            Some(n) => Some(RecordId::Number(n)),
            None => {
                warn!("Found a non-integer id {}, generating one instead", n);
                None
            }
        },
        Value::String(s) if !s.trim().is_empty() => Some(RecordId::Text(s)),
        Value::String(_) | Value::Null => None,
        unknown => {
            warn!("Found an id of an unknown data type: {}", unknown);
            None
        }
    })
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => {
            let date = parse_record_date(&s);

            if date.is_none() && !s.trim().is_empty() {
                warn!("Failed to parse date '{}', treating it as unknown", s);
            }
            date
        }
        Value::Null => None,
        unknown => {
            warn!("Found a date of an unknown data type: {}", unknown);
            None
        }
    })
}

fn deserialize_count<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn deserialize_flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(flag) => flag,
        Value::Null => false,
        other => {
            warn!("Expected a boolean flag but found {}", other);
            false
        }
    })
}

/// One tag or a list of tags; entries that aren't strings are dropped
fn deserialize_technology<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;

    if let Ok(technology) = serde_json::from_value::<SingleOrVec<String>>(value.clone()) {
        return Ok(match technology {
            SingleOrVec::Single(technology) => vec![technology],
            SingleOrVec::Vec(technologies) => technologies,
        });
    }

    Ok(match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(technology) => Some(technology),
                other => {
                    warn!("Ignoring technology tag of an unknown data type: {}", other);
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        unknown => {
            warn!("Found technology of an unknown data type: {}", unknown);
            Vec::new()
        }
    })
}
