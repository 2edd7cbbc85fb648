// src/model/record.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of history for one SKU.
///
/// Values are already normalized by the loader: numeric fields are never NaN
/// and string fields default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub parent_item: String,
    pub sku: String,
    pub units_sold: u32,
    pub order_count: u32,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub vendor: String,
    pub current_inventory: i64, // Can be negative when the source books backorders
    pub lead_time: u32,         // Days
}

/// The record set of one session.
///
/// Every mutation bumps `version`, which downstream caches use as the
/// dataset key.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<SalesRecord>,
    version: u64,
}

impl RecordSet {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self {
            records,
            version: 1,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces every record (a fresh ingestion).
    pub fn replace_all(&mut self, records: Vec<SalesRecord>) {
        self.records = records;
        self.version += 1;
    }

    /// Appends newly ingested rows.
    pub fn extend(&mut self, records: impl IntoIterator<Item = SalesRecord>) {
        self.records.extend(records);
        self.version += 1;
    }

    /// Distinct SKU identifiers, sorted.
    pub fn skus(&self) -> Vec<String> {
        let mut skus: Vec<String> = self.records.iter().map(|r| r.sku.clone()).collect();
        skus.sort();
        skus.dedup();
        skus
    }

    /// Distinct non-empty vendor names, sorted.
    pub fn vendors(&self) -> Vec<String> {
        let mut vendors: Vec<String> = self
            .records
            .iter()
            .filter(|r| !r.vendor.is_empty())
            .map(|r| r.vendor.clone())
            .collect();
        vendors.sort();
        vendors.dedup();
        vendors
    }

    /// Latest date across the whole set. Forecast days are counted from here.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        latest_date(&self.records)
    }
}

pub fn latest_date(records: &[SalesRecord]) -> Option<NaiveDate> {
    records.iter().map(|r| r.date).max()
}
