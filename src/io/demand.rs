// src/io/demand.rs

use crate::error::DemandError;
use crate::model::record::SalesRecord;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Shape of one synthetic SKU.
#[derive(Debug, Clone)]
pub struct SyntheticSku {
    pub sku: String,
    pub parent_item: String,
    pub vendor: String,
    pub mean_daily_demand: f64,
    pub std_dev_daily_demand: f64,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub lead_time: u32,
    pub starting_inventory: i64,
}

/// Generates a daily demand schedule from a Normal distribution.
///
/// Samples are rounded and negative values clamped to 0.
pub fn generate_normal_demand<R: Rng>(
    rng: &mut R,
    days: usize,
    mean: f64,
    std_dev: f64,
) -> Result<Vec<u32>, DemandError> {
    let normal = Normal::new(mean, std_dev).map_err(|e| DemandError::InvalidDistribution {
        mean,
        std_dev,
        reason: e.to_string(),
    })?;

    Ok((0..days)
        .map(|_| {
            let val: f64 = normal.sample(&mut *rng).round();
            if val < 0.0 {
                0
            } else {
                val as u32
            }
        })
        .collect())
}

/// Turns a demand schedule into dated sales records.
///
/// Inventory starts at `starting_inventory` and is drawn down by each day's
/// sales, so the latest record carries the remaining stock.
pub fn history_from_demand(spec: &SyntheticSku, start: NaiveDate, demand: &[u32]) -> Vec<SalesRecord> {
    let mut on_hand = spec.starting_inventory;
    let mut date = start;
    let mut records = Vec::with_capacity(demand.len());

    for &units in demand {
        on_hand -= units as i64;
        records.push(SalesRecord {
            date,
            parent_item: spec.parent_item.clone(),
            sku: spec.sku.clone(),
            units_sold: units,
            order_count: units.div_ceil(2),
            unit_price: spec.unit_price,
            unit_cost: spec.unit_cost,
            vendor: spec.vendor.clone(),
            current_inventory: on_hand,
            lead_time: spec.lead_time,
        });
        date = date.checked_add_days(Days::new(1)).unwrap_or(date);
    }

    records
}

/// Builds a reproducible demo catalogue of `sku_count` SKUs with `days` of
/// history each, spread over three vendors.
pub fn generate_demo_history(
    seed: u64,
    sku_count: usize,
    days: usize,
    start: NaiveDate,
) -> Result<Vec<SalesRecord>, DemandError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let vendors = ["Northwind", "Contoso", "Fabrikam"];
    let mut records = Vec::with_capacity(sku_count * days);

    for i in 0..sku_count {
        let mean = rng.gen_range(2.0..40.0f64);
        let spec = SyntheticSku {
            sku: format!("SKU-{:04}", i + 1),
            parent_item: format!("ITEM-{:03}", i / 3 + 1),
            vendor: vendors[i % vendors.len()].to_string(),
            mean_daily_demand: mean,
            std_dev_daily_demand: mean * rng.gen_range(0.05..0.4f64),
            unit_price: (rng.gen_range(5.0..120.0f64) * 100.0).round() / 100.0,
            unit_cost: 0.0,
            lead_time: rng.gen_range(3..=21),
            starting_inventory: (mean * days as f64 * rng.gen_range(0.6..1.4f64)).round() as i64,
        };
        let spec = SyntheticSku {
            unit_cost: (spec.unit_price * rng.gen_range(0.35..0.7f64) * 100.0).round() / 100.0,
            ..spec
        };

        let demand = generate_normal_demand(&mut rng, days, spec.mean_daily_demand, spec.std_dev_daily_demand)?;
        records.extend(history_from_demand(&spec, start, &demand));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_normal_demand_is_seeded() {
        let a = generate_normal_demand(&mut StdRng::seed_from_u64(5), 50, 10.0, 3.0).unwrap();
        let b = generate_normal_demand(&mut StdRng::seed_from_u64(5), 50, 10.0, 3.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn test_invalid_distribution() {
        let err = generate_normal_demand(&mut StdRng::seed_from_u64(1), 5, 10.0, -1.0).unwrap_err();
        assert!(matches!(err, DemandError::InvalidDistribution { .. }));
    }

    #[test]
    fn test_history_draws_down_inventory() {
        let spec = SyntheticSku {
            sku: "S".to_string(),
            parent_item: "P".to_string(),
            vendor: "V".to_string(),
            mean_daily_demand: 5.0,
            std_dev_daily_demand: 0.0,
            unit_price: 3.0,
            unit_cost: 1.0,
            lead_time: 4,
            starting_inventory: 20,
        };
        let records = history_from_demand(&spec, start(), &[5, 6, 7]);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].current_inventory, 2);
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(records[1].order_count, 3);
    }

    #[test]
    fn test_demo_history_shape() {
        let records = generate_demo_history(11, 6, 30, start()).unwrap();
        assert_eq!(records.len(), 180);
        assert!(records.iter().all(|r| r.unit_cost < r.unit_price));
        assert_eq!(records, generate_demo_history(11, 6, 30, start()).unwrap());
    }
}
