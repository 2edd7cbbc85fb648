// src/io/reporting.rs

use crate::error::ReportError;
use crate::model::metrics::{AbcClass, ProjectionPoint};
use crate::simulation::engine::DashboardSnapshot;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// One line of the per-SKU metrics export. Series are left out; they go to
/// the projection export and the JSON snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsRow {
    pub sku: String,
    pub abc_class: Option<AbcClass>,
    pub vendor: String,
    pub avg_daily_sales: f64,
    pub std_dev_daily_sales: f64,
    pub adjusted_lead_time: u32,
    pub safety_stock: i64,
    pub reorder_point: i64,
    pub max_stock: i64,
    pub current_inventory: i64,
    pub purchase_recommendation: i64,
    pub inventory_turns: f64,
    pub unit_cost: f64,
    pub unit_price: f64,
}

pub fn metrics_rows(snapshot: &DashboardSnapshot) -> Vec<MetricsRow> {
    snapshot
        .metrics
        .values()
        .map(|m| MetricsRow {
            sku: m.sku.clone(),
            abc_class: snapshot.classification.get(&m.sku).copied(),
            vendor: m.vendor.clone(),
            avg_daily_sales: m.avg_daily_sales,
            std_dev_daily_sales: m.std_dev_daily_sales,
            adjusted_lead_time: m.adjusted_lead_time,
            safety_stock: m.safety_stock,
            reorder_point: m.reorder_point,
            max_stock: m.max_stock,
            current_inventory: m.current_inventory,
            purchase_recommendation: m.purchase_recommendation,
            inventory_turns: m.inventory_turns,
            unit_cost: m.unit_cost,
            unit_price: m.unit_price,
        })
        .collect()
}

/// Writes the per-SKU metrics to a CSV file.
pub fn write_metrics_csv(file_path: impl AsRef<Path>, snapshot: &DashboardSnapshot) -> Result<(), ReportError> {
    let rows = metrics_rows(snapshot);
    write_rows(file_path.as_ref(), &rows)
}

/// Writes the merged inventory projection to a CSV file.
pub fn write_projection_csv(
    file_path: impl AsRef<Path>,
    projection: &[ProjectionPoint],
) -> Result<(), ReportError> {
    write_rows(file_path.as_ref(), projection)
}

/// Writes the whole snapshot as pretty-printed JSON.
pub fn write_snapshot_json(file_path: impl AsRef<Path>, snapshot: &DashboardSnapshot) -> Result<(), ReportError> {
    let path = file_path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, snapshot)?;
    info!(path = %path.display(), "exported dashboard snapshot");
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, data: &[T]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "exported CSV");
    Ok(())
}
