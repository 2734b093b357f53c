use super::dto::{CourseResponse, EventResponse, MemberResponse, ResponseRecord};
use super::model::{Course, Event, Member};
use lazy_static::lazy_static;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use serde_json::Value;
use tracing::{error, info, warn};

pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Keys a feed may nest its records under, checked in order
const RECORD_KEYS: [&str; 4] = ["events", "items", "members", "courses"];

lazy_static! {
    static ref REST_CLIENT: ClientWithMiddleware = build_client(DEFAULT_MAX_RETRIES);
}

fn build_client(max_retries: u32) -> ClientWithMiddleware {
    let builder = ClientBuilder::new(Client::new());

    if max_retries == 0 {
        return builder.build();
    }

    builder
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(max_retries),
        ))
        .build()
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected document shape: {0}")]
    Shape(String),
}

/// Reads record feeds from a URL or a local file.
#[derive(Clone)]
pub struct DirectoryAPI {
    client: ClientWithMiddleware,
}

impl Default for DirectoryAPI {
    fn default() -> Self {
        Self {
            client: REST_CLIENT.clone(),
        }
    }
}

impl DirectoryAPI {
    /// `max_retries` of 0 disables retrying transient failures
    pub fn new(max_retries: u32) -> Self {
        Self {
            client: build_client(max_retries),
        }
    }

    pub async fn load_events(&self, source: &str) -> Result<Vec<Event>, LoadError> {
        self.load::<EventResponse>(source).await
    }

    pub async fn load_members(&self, source: &str) -> Result<Vec<Member>, LoadError> {
        self.load::<MemberResponse>(source).await
    }

    pub async fn load_courses(&self, source: &str) -> Result<Vec<Course>, LoadError> {
        self.load::<CourseResponse>(source).await
    }

    /**
    Returns the records of the feed in their original order.
    * source: an `http(s)://` URL or a path to a local file
    */
    #[tracing::instrument(skip(self))]
    pub async fn load<D: ResponseRecord>(&self, source: &str) -> Result<Vec<D::Model>, LoadError> {
        let body = if is_remote(source) {
            self.fetch(source).await
        } else {
            read_local(source).await
        };

        let records = body.and_then(|body| parse_document::<D>(&body));

        match &records {
            Ok(records) => info!("Loaded {} records", records.len()),
            Err(err) => error!("Load failed: {}", err),
        }

        records
    }

    async fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| LoadError::Transport(err.into()))
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn read_local(path: &str) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_string(),
            source,
        })
}

/// Accepts a bare array or an object nesting the array under one of the known keys.
/// Entries that aren't records are skipped, so one bad entry doesn't fail the feed.
pub fn parse_document<D: ResponseRecord>(json: &str) -> Result<Vec<D::Model>, LoadError> {
    let items = match serde_json::from_str::<Value>(json)? {
        items @ Value::Array(_) => items,
        Value::Object(mut document) => RECORD_KEYS
            .iter()
            .find_map(|key| document.remove(*key))
            .ok_or_else(|| {
                LoadError::Shape(format!("expected one of the keys {:?}", RECORD_KEYS))
            })?,
        other => {
            return Err(LoadError::Shape(format!(
                "expected an array or an object, found {}",
                other
            )))
        }
    };

    let items = match items {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::Shape(format!(
                "expected an array of records, found {}",
                other
            )))
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| {
            if !item.is_object() {
                warn!("Skipping record #{}, it isn't an object: {}", position + 1, item);
                return None;
            }

            match serde_json::from_value::<D>(item) {
                Ok(response) => Some(response.to_model(position)),
                Err(err) => {
                    warn!("Skipping record #{}: {}", position + 1, err);
                    None
                }
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::RecordId;

    #[test_log::test]
    fn should_parse_events_nested_under_events_key() {
        let events = parse_document::<EventResponse>(
            r#"{ "events": [{ "id": 1, "title": "Mixer" }, { "id": 2, "title": "Gala" }] }"#,
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, RecordId::Number(2));
    }

    #[test_log::test]
    fn should_parse_records_nested_under_items_key() {
        let events =
            parse_document::<EventResponse>(r#"{ "items": [{ "id": "a", "title": "Mixer" }] }"#)
                .unwrap();

        assert_eq!(events[0].id, RecordId::Text("a".to_string()));
    }

    #[test_log::test]
    fn should_parse_members_as_bare_array() {
        let members =
            parse_document::<MemberResponse>(r#"[{ "name": "Bakery", "level": 2 }]"#).unwrap();

        assert_eq!(members.len(), 1);
    }

    #[test_log::test]
    fn should_reject_document_without_records() {
        let result = parse_document::<EventResponse>(r#"{ "data": [] }"#);

        assert!(matches!(result, Err(LoadError::Shape(_))), "{:?}", result);
    }

    #[test_log::test]
    fn malformed_record_should_not_fail_the_feed() {
        let events = parse_document::<EventResponse>(
            r#"{ "events": [{ "id": 1, "title": "Mixer" }, { "id": true, "title": "Gala" }, null, 7] }"#,
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, RecordId::Number(1));
        assert_eq!(events[1].id, RecordId::Text("record-2".to_string()));
        assert_eq!(events[1].title, "Gala");
    }

    #[test_log::test]
    fn should_reject_records_key_without_array() {
        let result = parse_document::<EventResponse>(r#"{ "events": { "id": 1 } }"#);

        assert!(matches!(result, Err(LoadError::Shape(_))), "{:?}", result);
    }

    #[test_log::test]
    fn should_reject_invalid_json() {
        let result = parse_document::<EventResponse>("{ events: ");

        assert!(matches!(result, Err(LoadError::Parse(_))), "{:?}", result);
    }

    #[test_log::test]
    fn should_detect_remote_sources() {
        assert!(is_remote("https://example.com/data/events.json"));
        assert!(!is_remote("data/events.json"));
    }
}
