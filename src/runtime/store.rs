use std::collections::BTreeMap;

use serde::Serialize;

use super::{Attributes, Record};

/// One page of records, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub records: Vec<Record>,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// Persistence the controllers delegate to
pub trait RecordStore {
    /// Newest records first, `per_page` at a time
    fn latest_page(&self, page: usize, per_page: usize) -> Page;
    fn find(&self, id: u64) -> Option<Record>;
    fn create(&mut self, data: Attributes) -> Record;
    /// Merge `data` into an existing record
    fn update(&mut self, id: u64, data: Attributes) -> Option<Record>;
    /// Whether a record was removed
    fn delete(&mut self, id: u64) -> bool;
}

/// In-memory store with auto-incrementing ids
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: BTreeMap<u64, Attributes>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn latest_page(&self, page: usize, per_page: usize) -> Page {
        let page = page.max(1);
        let records = self
            .rows
            .iter()
            .rev()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .map(|(id, attributes)| Record {
                id: *id,
                attributes: attributes.clone(),
            })
            .collect();
        Page {
            records,
            page,
            per_page,
            total: self.rows.len(),
        }
    }

    fn find(&self, id: u64) -> Option<Record> {
        self.rows.get(&id).map(|attributes| Record {
            id,
            attributes: attributes.clone(),
        })
    }

    fn create(&mut self, data: Attributes) -> Record {
        self.next_id += 1;
        let id = self.next_id;
        self.rows.insert(id, data.clone());
        Record { id, attributes: data }
    }

    fn update(&mut self, id: u64, data: Attributes) -> Option<Record> {
        let row = self.rows.get_mut(&id)?;
        row.extend(data);
        Some(Record {
            id,
            attributes: row.clone(),
        })
    }

    fn delete(&mut self, id: u64) -> bool {
        self.rows.remove(&id).is_some()
    }
}
