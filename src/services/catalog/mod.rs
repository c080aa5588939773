//! In-memory catalog of services and events.
//!
//! Rows that cannot be validated are kept aside as
//! [`ScheduleError::MalformedRecord`] values instead of failing the load, so a
//! single bad row only removes itself from the listing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ScheduleError;
use crate::models::event::{EventRecord, RawEventRecord, RecordId};

#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    records: Vec<EventRecord>,
    rejected: Vec<ScheduleError>,
}

impl EventCatalog {
    /// Catalog of already-validated records. Later duplicates of an id are
    /// rejected.
    pub fn new(records: Vec<EventRecord>) -> Self {
        let mut catalog = Self::default();
        let mut seen = HashSet::new();
        for record in records {
            catalog.push_unique(record, &mut seen);
        }
        catalog
    }

    pub fn from_raw(rows: Vec<RawEventRecord>) -> Self {
        let mut catalog = Self::default();
        let mut seen = HashSet::new();

        for row in rows {
            match row.into_record() {
                Ok(record) => catalog.push_unique(record, &mut seen),
                Err(err) => {
                    log::warn!("Skipping catalog row: {}", err);
                    catalog.rejected.push(err);
                }
            }
        }

        log::info!(
            "Catalog loaded: {} record(s), {} rejected",
            catalog.records.len(),
            catalog.rejected.len()
        );
        catalog
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let rows: Vec<RawEventRecord> =
            serde_json::from_str(json).context("failed to parse event catalog JSON")?;
        Ok(Self::from_raw(rows))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read event catalog from {}", path.display()))?;
        Self::from_json_str(&data)
            .with_context(|| format!("failed to load event catalog from {}", path.display()))
    }

    fn push_unique(&mut self, record: EventRecord, seen: &mut HashSet<RecordId>) {
        if !seen.insert(record.id().clone()) {
            let err = ScheduleError::malformed(record.id().as_str(), "duplicate id");
            log::warn!("Skipping catalog row: {}", err);
            self.rejected.push(err);
            return;
        }
        self.records.push(record);
    }

    /// Valid records in catalog order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn rejected(&self) -> &[ScheduleError] {
        &self.rejected
    }

    pub fn get(&self, id: &RecordId) -> Option<&EventRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
