// src/lib.rs

//! Replenishment calculation engine.
//!
//! Turns per-SKU daily sales history into safety stock, reorder points,
//! purchase recommendations and a forward inventory projection, plus the
//! ABC classification and dashboard KPIs built on top of them.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigError, DemandError, IngestError, ReportError};
pub use model::metrics::{AbcClass, ForecastPoint, ProjectionLabel, ProjectionPoint, SkuMetrics};
pub use model::record::{RecordSet, SalesRecord};
pub use model::scenario::{ScenarioParameters, VendorFilter};
pub use simulation::aggregate::{aggregate, Aggregation, Kpis, Recommendation};
pub use simulation::config::EngineConfig;
pub use simulation::engine::{compute_sku_metrics, DashboardSnapshot, ReplenishmentEngine};
pub use strategy::classification::classify_abc;
