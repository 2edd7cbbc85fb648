// src/strategy/classification.rs

//! ABC (Pareto) classification of SKUs by sales volume.

use crate::model::metrics::AbcClass;
use crate::model::record::SalesRecord;
use std::collections::BTreeMap;

pub const DEFAULT_A_THRESHOLD: f64 = 0.80;
pub const DEFAULT_B_THRESHOLD: f64 = 0.95;

/// Cumulative-share cut-offs for classes A and B. Everything above B is C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbcThresholds {
    pub a: f64,
    pub b: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self {
            a: DEFAULT_A_THRESHOLD,
            b: DEFAULT_B_THRESHOLD,
        }
    }
}

/// Total units sold per SKU.
pub fn sales_volume_by_sku(records: &[SalesRecord]) -> BTreeMap<String, u64> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.sku.clone()).or_insert(0) += record.units_sold as u64;
    }
    totals
}

/// Classifies every SKU in the record set.
///
/// SKUs are ranked by volume (descending, ties by SKU ascending) and assigned
/// by the running share of total volume: A while the share is <= `a`, B while
/// <= `b`, C after that. Returns an empty map when total volume is zero.
pub fn classify_abc(
    records: &[SalesRecord],
    thresholds: AbcThresholds,
) -> BTreeMap<String, AbcClass> {
    let totals = sales_volume_by_sku(records);
    let grand_total: u64 = totals.values().sum();

    let mut classes = BTreeMap::new();
    if grand_total == 0 {
        return classes;
    }

    let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut cumulative: u64 = 0;
    for (sku, volume) in ranked {
        cumulative += volume;
        let share = cumulative as f64 / grand_total as f64;

        let class = if share <= thresholds.a {
            AbcClass::A
        } else if share <= thresholds.b {
            AbcClass::B
        } else {
            AbcClass::C
        };
        classes.insert(sku, class);
    }

    classes
}
