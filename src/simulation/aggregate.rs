// src/simulation/aggregate.rs

//! Dashboard-level roll-ups over the per-SKU metrics of one recompute.

use crate::model::metrics::{ProjectionLabel, ProjectionPoint, SkuMetrics};
use crate::model::scenario::VendorFilter;
use serde::Serialize;
use std::collections::BTreeMap;

/// A SKU that should be reordered now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub sku: String,
    pub vendor: String,
    pub current_inventory: i64,
    pub reorder_point: i64,
    pub max_stock: i64,
    pub quantity: i64,
    pub unit_cost: f64,
    pub purchase_value: f64,
}

impl Recommendation {
    fn from_metrics(metrics: &SkuMetrics) -> Self {
        Self {
            sku: metrics.sku.clone(),
            vendor: metrics.vendor.clone(),
            current_inventory: metrics.current_inventory,
            reorder_point: metrics.reorder_point,
            max_stock: metrics.max_stock,
            quantity: metrics.purchase_recommendation,
            unit_cost: metrics.unit_cost,
            purchase_value: metrics.purchase_recommendation as f64 * metrics.unit_cost,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    /// First-day forecast x unit price x horizon, summed over SKUs.
    /// A flat extrapolation of day one, not the sum of the forecast series.
    pub total_projected_revenue: f64,
    pub average_inventory_turns: f64,
    pub total_purchase_value: f64,
    pub items_to_reorder: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    pub projection: Vec<ProjectionPoint>,
    pub recommendations: Vec<Recommendation>,
    pub kpis: Kpis,
}

/// Sums every SKU's projection by label. "Today" comes first, then dates
/// in ascending order.
pub fn merge_projections<'a>(metrics: impl IntoIterator<Item = &'a SkuMetrics>) -> Vec<ProjectionPoint> {
    let mut totals: BTreeMap<ProjectionLabel, i64> = BTreeMap::new();
    for sku in metrics {
        for point in &sku.projection_series {
            let total = totals.entry(point.label).or_insert(0);
            *total = total.saturating_add(point.inventory);
        }
    }
    totals
        .into_iter()
        .map(|(label, inventory)| ProjectionPoint { label, inventory })
        .collect()
}

/// SKUs with a positive purchase recommendation from a matching vendor,
/// in SKU order.
pub fn filter_recommendations(
    metrics: &BTreeMap<String, SkuMetrics>,
    vendor_filter: &VendorFilter,
) -> Vec<Recommendation> {
    metrics
        .values()
        .filter(|m| m.needs_reorder() && vendor_filter.matches(&m.vendor))
        .map(Recommendation::from_metrics)
        .collect()
}

pub fn compute_kpis(
    metrics: &BTreeMap<String, SkuMetrics>,
    recommendations: &[Recommendation],
    horizon_days: usize,
) -> Kpis {
    let total_projected_revenue = metrics
        .values()
        .map(|m| m.first_day_units() as f64 * m.unit_price * horizon_days as f64)
        .sum();

    let average_inventory_turns = if metrics.is_empty() {
        0.0
    } else {
        metrics.values().map(|m| m.inventory_turns).sum::<f64>() / metrics.len() as f64
    };

    let total_purchase_value = recommendations.iter().map(|r| r.purchase_value).sum();

    Kpis {
        total_projected_revenue,
        average_inventory_turns,
        total_purchase_value,
        items_to_reorder: recommendations.len(),
    }
}

/// Builds the merged projection, the filtered recommendation list and the
/// KPIs for one set of per-SKU metrics.
pub fn aggregate(
    metrics: &BTreeMap<String, SkuMetrics>,
    vendor_filter: &VendorFilter,
    horizon_days: usize,
) -> Aggregation {
    let projection = merge_projections(metrics.values());
    let recommendations = filter_recommendations(metrics, vendor_filter);
    let kpis = compute_kpis(metrics, &recommendations, horizon_days);

    Aggregation {
        projection,
        recommendations,
        kpis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::ForecastPoint;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn metrics(sku: &str, vendor: &str, purchase: i64, inventory: &[i64]) -> SkuMetrics {
        let mut projection_series = vec![ProjectionPoint {
            label: ProjectionLabel::Today,
            inventory: inventory[0],
        }];
        for (i, value) in inventory.iter().enumerate().skip(1) {
            projection_series.push(ProjectionPoint {
                label: ProjectionLabel::Day(date(i as u32)),
                inventory: *value,
            });
        }

        SkuMetrics {
            sku: sku.to_string(),
            avg_daily_sales: 4.0,
            std_dev_daily_sales: 0.0,
            adjusted_lead_time: 2,
            safety_stock: 0,
            reorder_point: 8,
            max_stock: 128,
            current_inventory: inventory[0],
            purchase_recommendation: purchase,
            inventory_turns: 20.0,
            forecast_series: vec![ForecastPoint {
                date: date(1),
                units: 4,
            }],
            projection_series,
            vendor: vendor.to_string(),
            unit_cost: 2.5,
            unit_price: 5.0,
        }
    }

    fn sample() -> BTreeMap<String, SkuMetrics> {
        let mut map = BTreeMap::new();
        map.insert("A".to_string(), metrics("A", "V1", 120, &[8, 4, 0]));
        map.insert("B".to_string(), metrics("B", "V2", 100, &[28, 24, 20]));
        map.insert("C".to_string(), metrics("C", "V1", 0, &[200, 196, 192]));
        map
    }

    #[test]
    fn test_merged_projection_sums_by_label() {
        let merged = merge_projections(sample().values());
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].label, ProjectionLabel::Today);
        assert_eq!(merged[0].inventory, 236);
        assert_eq!(merged[1].label, ProjectionLabel::Day(date(1)));
        assert_eq!(merged[1].inventory, 224);
        assert_eq!(merged[2].inventory, 212);
    }

    #[test]
    fn test_merged_projection_saturates() {
        let huge = [
            metrics("X", "V1", 0, &[i64::MAX, i64::MAX]),
            metrics("Y", "V1", 0, &[i64::MAX, 1]),
        ];
        let merged = merge_projections(huge.iter());
        assert_eq!(merged[0].inventory, i64::MAX);
        assert_eq!(merged[1].inventory, i64::MAX);
    }

    #[test]
    fn test_vendor_filter_restricts_recommendations() {
        let data = sample();
        let result = aggregate(&data, &VendorFilter::Vendor("V1".to_string()), 120);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].sku, "A");
        assert_eq!(result.kpis.items_to_reorder, 1);
        assert_eq!(result.kpis.total_purchase_value, 300.0);
    }

    #[test]
    fn test_all_vendors() {
        let result = aggregate(&sample(), &VendorFilter::All, 120);
        let skus: Vec<&str> = result.recommendations.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "B"]);
        assert_eq!(result.kpis.total_purchase_value, 550.0);
    }

    #[test]
    fn test_revenue_extrapolates_first_day() {
        let result = aggregate(&sample(), &VendorFilter::All, 120);
        // 3 SKUs x 4 units x $5 x 120 days
        assert_eq!(result.kpis.total_projected_revenue, 7200.0);
        assert_eq!(result.kpis.average_inventory_turns, 20.0);
    }

    #[test]
    fn test_empty_metrics() {
        let result = aggregate(&BTreeMap::new(), &VendorFilter::All, 120);
        assert!(result.projection.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.kpis, Kpis::default());
    }
}
