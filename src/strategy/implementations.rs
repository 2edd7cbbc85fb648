// src/strategy/implementations.rs

use crate::strategy::traits::{ForecastContext, ForecastPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// =========================================================================
// 1. Flat Average Forecast
// =========================================================================

/// Every day gets the historical average, scaled by the demand change.
/// No seasonality, no trend.
#[derive(Debug, Clone, Default)]
pub struct FlatAverageForecast;

impl FlatAverageForecast {
    pub fn new() -> Self {
        Self
    }
}

impl ForecastPolicy for FlatAverageForecast {
    fn forecast(&self, context: &ForecastContext<'_>, horizon_days: usize) -> Vec<i64> {
        let units = non_negative_units(context.adjusted_rate());
        vec![units; horizon_days]
    }
}

// =========================================================================
// 2. Jittered Forecast
// =========================================================================

/// The flat rate with a uniform per-day perturbation of +/- `jitter`.
///
/// The generator is seeded from `seed` and a hash of the SKU, so the same
/// inputs produce the same series within one build.
#[derive(Debug, Clone)]
pub struct JitteredForecast {
    seed: u64,
    jitter: f64,
}

impl JitteredForecast {
    pub fn new(seed: u64, jitter: f64) -> Self {
        Self {
            seed,
            jitter: jitter.abs(),
        }
    }

    fn rng_for(&self, sku: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        sku.hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }
}

impl ForecastPolicy for JitteredForecast {
    fn forecast(&self, context: &ForecastContext<'_>, horizon_days: usize) -> Vec<i64> {
        let rate = context.adjusted_rate();
        let mut rng = self.rng_for(context.sku);

        (0..horizon_days)
            .map(|_| {
                let factor = if self.jitter > 0.0 {
                    1.0 + rng.gen_range(-self.jitter..=self.jitter)
                } else {
                    1.0
                };
                non_negative_units(rate * factor)
            })
            .collect()
    }
}

// =========================================================================
// Selection
// =========================================================================

/// Which forecast policy the engine uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ForecastMode {
    #[default]
    Flat,
    Jittered { seed: u64, jitter: f64 },
}

impl ForecastMode {
    pub fn build(&self) -> Box<dyn ForecastPolicy> {
        match self {
            ForecastMode::Flat => Box::new(FlatAverageForecast::new()),
            ForecastMode::Jittered { seed, jitter } => Box::new(JitteredForecast::new(*seed, *jitter)),
        }
    }
}

/// Rounds to whole units, never below zero.
fn non_negative_units(rate: f64) -> i64 {
    let units = rate.round();
    if units.is_nan() || units < 0.0 {
        0
    } else {
        units as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(avg: f64, change: f64) -> ForecastContext<'static> {
        ForecastContext {
            sku: "SKU-1",
            avg_daily_sales: avg,
            demand_change_pct: change,
        }
    }

    #[test]
    fn test_flat_forecast_is_constant() {
        let series = FlatAverageForecast::new().forecast(&context(10.0, 0.0), 120);
        assert_eq!(series.len(), 120);
        assert!(series.iter().all(|&u| u == 10));
    }

    #[test]
    fn test_flat_forecast_applies_demand_change() {
        let series = FlatAverageForecast::new().forecast(&context(10.0, 25.0), 3);
        assert_eq!(series, vec![13, 13, 13]); // 12.5 rounds up

        let series = FlatAverageForecast::new().forecast(&context(3.3, -50.0), 2);
        assert_eq!(series, vec![2, 2]); // 1.65
    }

    #[test]
    fn test_jittered_forecast_is_reproducible() {
        let policy = JitteredForecast::new(42, 0.1);
        let a = policy.forecast(&context(100.0, 0.0), 120);
        let b = policy.forecast(&context(100.0, 0.0), 120);
        assert_eq!(a, b);
    }

    #[test]
    fn test_jittered_forecast_differs_per_sku() {
        let policy = JitteredForecast::new(42, 0.1);
        let other = ForecastContext {
            sku: "SKU-2",
            ..context(100.0, 0.0)
        };
        let a = policy.forecast(&context(100.0, 0.0), 120);
        let b = policy.forecast(&other, 120);
        assert_ne!(a, b);
        assert_eq!(b, policy.forecast(&other, 120));
    }

    #[test]
    fn test_jittered_forecast_stays_in_band() {
        let policy = JitteredForecast::new(7, 0.1);
        let series = policy.forecast(&context(100.0, 0.0), 500);
        assert!(series.iter().all(|&u| (90..=110).contains(&u)));
        // With 500 draws the series cannot be flat
        assert!(series.iter().any(|&u| u != series[0]));
    }

    #[test]
    fn test_zero_jitter_matches_flat() {
        let flat = FlatAverageForecast::new().forecast(&context(6.4, 10.0), 30);
        let jittered = JitteredForecast::new(1, 0.0).forecast(&context(6.4, 10.0), 30);
        assert_eq!(flat, jittered);
    }

    #[test]
    fn test_forecast_mode_deserializes_from_tag() {
        let mode: ForecastMode =
            serde_json::from_str(r#"{"mode":"jittered","seed":3,"jitter":0.1}"#).unwrap();
        assert_eq!(mode, ForecastMode::Jittered { seed: 3, jitter: 0.1 });

        let mode: ForecastMode = serde_json::from_str(r#"{"mode":"flat"}"#).unwrap();
        assert_eq!(mode, ForecastMode::Flat);
    }
}
