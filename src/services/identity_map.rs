//! Issue number → store record id mapping.
//!
//! Built once at the start of a run by paging through every record in the
//! store, then only read. A store that changes concurrently with the run is
//! not detected.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::errors::SyncResult;
use crate::domain::ports::RecordStore;

/// Mapping from tracker issue number to the id of the record mirroring it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    entries: HashMap<u64, String>,
    records_scanned: usize,
    unkeyed_records: usize,
}

impl IdentityMap {
    /// Page through the whole store and index every record by its `ID`.
    ///
    /// Any failed page aborts the build; a partial map is never returned.
    pub async fn build(store: &dyn RecordStore) -> SyncResult<Self> {
        let mut map = Self::default();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = store.query_records(cursor.as_deref()).await?;
            pages += 1;
            debug!(page = pages, records = page.records.len(), "Fetched store page");

            for record in page.records {
                map.records_scanned += 1;
                match record.issue_number {
                    Some(number) => {
                        if let Some(previous) = map.entries.insert(number, record.id.clone()) {
                            warn!(
                                issue_number = number,
                                previous_record = %previous,
                                record = %record.id,
                                "Duplicate issue number in store, keeping the later record"
                            );
                        }
                    }
                    None => {
                        map.unkeyed_records += 1;
                        warn!(record = %record.id, "Store record has no usable ID, ignoring");
                    }
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!(
            count = map.records_scanned,
            pages = pages,
            "{} issues successfully fetched from store",
            map.records_scanned
        );
        Ok(map)
    }

    /// Build a map directly from `(issue_number, record_id)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let entries: HashMap<u64, String> =
            pairs.into_iter().map(|(n, id)| (n, id.into())).collect();
        Self {
            records_scanned: entries.len(),
            entries,
            unkeyed_records: 0,
        }
    }

    pub fn record_id(&self, issue_number: u64) -> Option<&str> {
        self.entries.get(&issue_number).map(String::as_str)
    }

    pub fn contains(&self, issue_number: u64) -> bool {
        self.entries.contains_key(&issue_number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records seen while building, keyed or not.
    pub const fn records_scanned(&self) -> usize {
        self.records_scanned
    }

    /// Records skipped because their `ID` was missing or not a whole number.
    pub const fn unkeyed_records(&self) -> usize {
        self.unkeyed_records
    }
}
