// src/model/metrics.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Volume tier of a SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Key of a projection point. `Today` sorts before every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectionLabel {
    Today,
    Day(NaiveDate),
}

impl fmt::Display for ProjectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionLabel::Today => write!(f, "Today"),
            ProjectionLabel::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for ProjectionLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub units: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectionPoint {
    pub label: ProjectionLabel,
    pub inventory: i64,
}

/// Replenishment figures for one SKU under one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuMetrics {
    pub sku: String,
    pub avg_daily_sales: f64,
    pub std_dev_daily_sales: f64,
    pub adjusted_lead_time: u32,
    pub safety_stock: i64,
    pub reorder_point: i64,
    pub max_stock: i64,
    pub current_inventory: i64,
    pub purchase_recommendation: i64,
    pub inventory_turns: f64,
    pub forecast_series: Vec<ForecastPoint>,    // One entry per horizon day
    pub projection_series: Vec<ProjectionPoint>, // "Today" plus one entry per horizon day
    pub vendor: String,
    pub unit_cost: f64,
    pub unit_price: f64,
}

impl SkuMetrics {
    /// Forecasted units for the first horizon day (0 for an empty horizon).
    pub fn first_day_units(&self) -> i64 {
        self.forecast_series.first().map(|p| p.units).unwrap_or(0)
    }

    pub fn needs_reorder(&self) -> bool {
        self.purchase_recommendation > 0
    }
}
