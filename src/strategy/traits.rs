// src/strategy/traits.rs

use std::fmt::Debug;

/// Inputs a forecast policy may look at for one SKU.
#[derive(Debug, Clone)]
pub struct ForecastContext<'a> {
    pub sku: &'a str,
    /// Historical mean of daily units sold.
    pub avg_daily_sales: f64,
    /// Demand change in percent, already clamped.
    pub demand_change_pct: f64,
}

impl ForecastContext<'_> {
    /// Historical rate with the scenario's demand change applied.
    pub fn adjusted_rate(&self) -> f64 {
        self.avg_daily_sales * (1.0 + self.demand_change_pct / 100.0)
    }
}

/// Produces the daily unit forecast over the projection horizon.
///
/// Implementations must be deterministic for a given context: recomputing
/// with identical inputs has to give identical output.
pub trait ForecastPolicy: Debug + Send + Sync {
    /// Returns `horizon_days` forecasted unit counts, day 1 first.
    /// Every value must be non-negative.
    fn forecast(&self, context: &ForecastContext<'_>, horizon_days: usize) -> Vec<i64>;
}
