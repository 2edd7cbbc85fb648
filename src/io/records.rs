// src/io/records.rs

//! CSV sales-history loader.
//!
//! Expected columns (any order, case and separators ignored):
//!   date, parent_item, sku, units_sold, order_count, unit_price, unit_cost,
//!   vendor, current_inventory, lead_time
//!
//! Numeric cells that do not parse become 0, blank rows are dropped, and rows
//! whose date cannot be read are dropped with a warning.

use crate::error::IngestError;
use crate::model::record::SalesRecord;
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub const EXPECTED_COLUMNS: [&str; 10] = [
    "date",
    "parent_item",
    "sku",
    "units_sold",
    "order_count",
    "unit_price",
    "unit_cost",
    "vendor",
    "current_inventory",
    "lead_time",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// One CSV row before normalization. Every cell is kept as text.
#[derive(Debug, Default)]
struct RawSalesRow {
    date: String,
    parent_item: String,
    sku: String,
    units_sold: String,
    order_count: String,
    unit_price: String,
    unit_cost: String,
    vendor: String,
    current_inventory: String,
    lead_time: String,
}

impl RawSalesRow {
    /// `positions[i]` is the file column holding `EXPECTED_COLUMNS[i]`.
    /// Short rows read the missing cells as empty.
    fn from_record(record: &StringRecord, positions: &[usize; 10]) -> Self {
        let cell = |column: usize| record.get(positions[column]).unwrap_or("").to_string();
        Self {
            date: cell(0),
            parent_item: cell(1),
            sku: cell(2),
            units_sold: cell(3),
            order_count: cell(4),
            unit_price: cell(5),
            unit_cost: cell(6),
            vendor: cell(7),
            current_inventory: cell(8),
            lead_time: cell(9),
        }
    }

    fn is_blank(&self) -> bool {
        [
            &self.date,
            &self.parent_item,
            &self.sku,
            &self.units_sold,
            &self.order_count,
            &self.unit_price,
            &self.unit_cost,
            &self.vendor,
            &self.current_inventory,
            &self.lead_time,
        ]
        .iter()
        .all(|cell| cell.is_empty())
    }

    fn normalize(self) -> Option<SalesRecord> {
        let date = parse_date(&self.date)?;
        Some(SalesRecord {
            date,
            parent_item: self.parent_item,
            sku: self.sku,
            units_sold: parse_count(&self.units_sold),
            order_count: parse_count(&self.order_count),
            unit_price: parse_amount(&self.unit_price),
            unit_cost: parse_amount(&self.unit_cost),
            vendor: self.vendor,
            current_inventory: parse_signed(&self.current_inventory),
            lead_time: parse_count(&self.lead_time),
        })
    }
}

/// Load sales records from a CSV reader.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<SalesRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let positions = column_positions(csv_reader.headers()?)?;

    let mut records = Vec::new();
    let mut blank = 0usize;
    let mut undated = 0usize;

    for (idx, result) in csv_reader.records().enumerate() {
        let row = RawSalesRow::from_record(&result?, &positions);
        if row.is_blank() {
            blank += 1;
            continue;
        }
        let raw_date = row.date.clone();
        match row.normalize() {
            Some(record) => records.push(record),
            None => {
                undated += 1;
                // +2: header line and 1-based numbering
                warn!(line = idx + 2, date = %raw_date, "dropping row with unreadable date");
            }
        }
    }

    info!(
        loaded = records.len(),
        blank, undated, "loaded sales history"
    );
    Ok(records)
}

/// Load sales records from a CSV file path.
pub fn load_records_file(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>, IngestError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_records(file)
}

/// Finds the file column of every expected field.
///
/// `unitsSold`, `Units Sold` and `units_sold` all name the same column.
/// Unknown, missing or duplicate columns are a schema mismatch.
fn column_positions(headers: &StringRecord) -> Result<[usize; 10], IngestError> {
    let mismatch = || IngestError::SchemaMismatch {
        expected: EXPECTED_COLUMNS.join(", "),
        found: headers.iter().collect::<Vec<_>>().join(", "),
    };

    if headers.len() != EXPECTED_COLUMNS.len() {
        return Err(mismatch());
    }

    let mut positions = [usize::MAX; 10];
    for (file_column, header) in headers.iter().enumerate() {
        let key = squash(header);
        let field = EXPECTED_COLUMNS
            .iter()
            .position(|expected| squash(expected) == key)
            .ok_or_else(mismatch)?;
        if positions[field] != usize::MAX {
            return Err(mismatch());
        }
        positions[field] = file_column;
    }
    Ok(positions)
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Strips currency symbols and thousands separators, then parses.
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',' | ' ')).collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Non-negative whole number; fractions are truncated, junk becomes 0.
fn parse_count(raw: &str) -> u32 {
    match parse_number(raw) {
        Some(v) if v > 0.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

fn parse_signed(raw: &str) -> i64 {
    parse_number(raw).map(|v| v.trunc() as i64).unwrap_or(0)
}

/// Non-negative amount; junk and negatives become 0.
fn parse_amount(raw: &str) -> f64 {
    parse_number(raw).filter(|v| *v > 0.0).unwrap_or(0.0)
}
