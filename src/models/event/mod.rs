// Event module
// Catalog records for services and events

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::utils::date::local_datetime;

/// Opaque catalog identifier, unique within one catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Service,
    Event,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Service => "Service",
            EventKind::Event => "Event",
        }
    }
}

/// A service or event as shown on the listing pages.
///
/// Records are read-only inputs to filtering; `occurs_at` cannot change once
/// the record is built.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    id: RecordId,
    kind: EventKind,
    sub_type: Option<String>,
    title: String,
    occurs_at: DateTime<Local>,
}

impl EventRecord {
    /// Create a record with no sub-type and an empty title.
    ///
    /// # Examples
    /// ```
    /// use church_events::models::event::{EventKind, EventRecord};
    /// use chrono::Local;
    ///
    /// let record = EventRecord::new("easter-2025", EventKind::Event, Local::now());
    /// assert_eq!(record.id().as_str(), "easter-2025");
    /// ```
    pub fn new(id: impl Into<String>, kind: EventKind, occurs_at: DateTime<Local>) -> Self {
        Self {
            id: RecordId(id.into()),
            kind,
            sub_type: None,
            title: String::new(),
            occurs_at,
        }
    }

    /// Create a builder for records with optional fields
    pub fn builder() -> EventRecordBuilder {
        EventRecordBuilder::new()
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn sub_type(&self) -> Option<&str> {
        self.sub_type.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn occurs_at(&self) -> DateTime<Local> {
        self.occurs_at
    }

    /// Calendar day the record falls on; filtering works at day granularity.
    pub fn occurs_on(&self) -> NaiveDate {
        self.occurs_at.date_naive()
    }

    pub fn is_service(&self) -> bool {
        self.kind == EventKind::Service
    }
}

/// Builder for creating records with optional fields
#[derive(Debug, Default)]
pub struct EventRecordBuilder {
    id: Option<String>,
    kind: Option<EventKind>,
    sub_type: Option<String>,
    title: Option<String>,
    occurs_at: Option<DateTime<Local>>,
}

impl EventRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the service sub-type tag; stored lowercase.
    pub fn sub_type(mut self, tag: impl Into<String>) -> Self {
        self.sub_type = Some(normalize_tag(&tag.into()));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn occurs_at(mut self, occurs_at: DateTime<Local>) -> Self {
        self.occurs_at = Some(occurs_at);
        self
    }

    pub fn build(self) -> Result<EventRecord, ScheduleError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ScheduleError::malformed("<unknown>", "record id is required"))?;
        let kind = self
            .kind
            .ok_or_else(|| ScheduleError::malformed(&id, "record kind is required"))?;
        let occurs_at = self
            .occurs_at
            .ok_or_else(|| ScheduleError::malformed(&id, "record date is required"))?;

        Ok(EventRecord {
            id: RecordId(id),
            kind,
            sub_type: self.sub_type.filter(|tag| !tag.is_empty()),
            title: self.title.unwrap_or_default(),
            occurs_at,
        })
    }
}

/// A catalog row as it arrives from JSON, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEventRecord {
    pub id: String,
    pub kind: String,
    #[serde(default, alias = "subType")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
}

impl RawEventRecord {
    /// Validate the row into an [`EventRecord`].
    pub fn into_record(self) -> Result<EventRecord, ScheduleError> {
        let kind = match self.kind.trim().to_ascii_lowercase().as_str() {
            "service" => EventKind::Service,
            "event" => EventKind::Event,
            other => {
                return Err(ScheduleError::malformed(
                    &self.id,
                    format!("unknown kind `{other}`"),
                ))
            }
        };

        let raw_date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ScheduleError::malformed(&self.id, "missing date"))?;
        let occurs_at = parse_record_date(raw_date)
            .ok_or_else(|| ScheduleError::malformed(&self.id, format!("unparseable date `{raw_date}`")))?;

        let mut builder = EventRecord::builder()
            .id(self.id)
            .kind(kind)
            .occurs_at(occurs_at);
        if let Some(tag) = self.sub_type {
            builder = builder.sub_type(tag);
        }
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        builder.build()
    }
}

/// Accepts `YYYY-MM-DD` (local midnight) or an RFC 3339 timestamp.
pub fn parse_record_date(value: &str) -> Option<DateTime<Local>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return local_datetime(date, NaiveTime::MIN);
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Local))
}

pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
