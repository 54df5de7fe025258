//! Soil records for one persisted spatial region.
//!
//! The host creates one [`RegionStore`] per region it persists and passes it
//! into every soil call. Records are created lazily by
//! [`RegionStore::get_or_create`] and live as long as the store.
//!
//! # Persisted form
//!
//! ```json
//! { "count": 2,
//!   "soil_0": { "MOISTURE": 0.5, ..., "x": 10, "y": 64, "z": -3 },
//!   "soil_1": { ... } }
//! ```
//!
//! Entries are written in location order so the output is deterministic.

use std::collections::BTreeMap;

use harvest_types::BlockPos;
use serde_json::Value;
use tracing::warn;

use crate::error::SoilError;
use crate::record::SoilRecord;
use crate::tag::{self, SoilTag};

const KEY_COUNT: &str = "count";
const ENTRY_PREFIX: &str = "soil_";

/// All soil records of one region, keyed by location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionStore {
    records: BTreeMap<BlockPos, SoilRecord>,
}

impl RegionStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Return the record at `pos`, inserting a default one if absent.
    pub fn get_or_create(&mut self, pos: BlockPos) -> &mut SoilRecord {
        self.records.entry(pos).or_default()
    }

    /// Return the record at `pos` without creating it.
    pub fn get(&self, pos: BlockPos) -> Option<&SoilRecord> {
        self.records.get(&pos)
    }

    /// Return the record at `pos` mutably without creating it.
    pub fn get_mut(&mut self, pos: BlockPos) -> Option<&mut SoilRecord> {
        self.records.get_mut(&pos)
    }

    /// Whether a record exists at `pos`.
    pub fn has(&self, pos: BlockPos) -> bool {
        self.records.contains_key(&pos)
    }

    /// Iterate over every record in location order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, &SoilRecord)> {
        self.records.iter().map(|(pos, record)| (*pos, record))
    }

    /// Iterate mutably over every record in location order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BlockPos, &mut SoilRecord)> {
        self.records.iter_mut().map(|(pos, record)| (*pos, record))
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // -----------------------------------------------------------------------
    // Persisted form
    // -----------------------------------------------------------------------

    /// Write every record with its location into a count-prefixed tag.
    pub fn to_tag(&self) -> SoilTag {
        let mut out = SoilTag::new();
        out.insert(KEY_COUNT.to_owned(), Value::from(self.records.len()));
        for (index, (pos, record)) in self.records.iter().enumerate() {
            let mut entry = record.to_tag();
            entry.insert("x".to_owned(), Value::from(pos.x));
            entry.insert("y".to_owned(), Value::from(pos.y));
            entry.insert("z".to_owned(), Value::from(pos.z));
            out.insert(format!("{ENTRY_PREFIX}{index}"), Value::Object(entry));
        }
        out
    }

    /// Rebuild a store from its persisted form.
    ///
    /// Entries `soil_0` to `soil_{count-1}` that are present are read in
    /// order. An entry that is not an object or lacks a usable location is
    /// skipped with a warning and the rest of the region still loads. A later entry at
    /// the same location replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`SoilError::MalformedRegion`] if the root is not an object.
    pub fn from_tag(root: &Value) -> Result<Self, SoilError> {
        let tag = root.as_object().ok_or_else(|| SoilError::MalformedRegion {
            reason: "region root is not an object".to_owned(),
        })?;
        let count = tag::read_u64(tag, KEY_COUNT).unwrap_or(0);

        // Walk the entry keys actually present rather than trusting `count`.
        let mut indices: Vec<u64> = tag
            .keys()
            .filter_map(|key| key.strip_prefix(ENTRY_PREFIX)?.parse::<u64>().ok())
            .filter(|index| *index < count)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut store = Self::new();
        for index in indices {
            let key = format!("{ENTRY_PREFIX}{index}");
            let Some(entry) = tag.get(&key).and_then(Value::as_object) else {
                warn!(entry = %key, "region entry missing or not an object, skipping");
                continue;
            };
            let Some(pos) = read_pos(entry) else {
                warn!(entry = %key, "region entry has no usable location, skipping");
                continue;
            };
            store.records.insert(pos, SoilRecord::from_tag(entry));
        }
        Ok(store)
    }

    /// Serialize the persisted form to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SoilError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, SoilError> {
        Ok(serde_json::to_string_pretty(&Value::Object(self.to_tag()))?)
    }

    /// Parse a store from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SoilError::Json`] for invalid JSON and
    /// [`SoilError::MalformedRegion`] for a non-object root.
    pub fn from_json_str(text: &str) -> Result<Self, SoilError> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_tag(&root)
    }
}

fn read_pos(entry: &SoilTag) -> Option<BlockPos> {
    Some(BlockPos::new(
        tag::read_i32(entry, "x")?,
        tag::read_i32(entry, "y")?,
        tag::read_i32(entry, "z")?,
    ))
}
