// src/strategy/optimization.rs

//! Replenishment parameter calculations.
//!
//! Classic statistical reorder-point model: a safety buffer sized from demand
//! variability over the lead time, a reorder point covering expected lead-time
//! demand plus that buffer, and an order-up-to level one review period above it.

/// Z-scores for the supported service levels (percent).
pub const SERVICE_LEVEL_Z_SCORES: [(u32, f64); 4] = [(90, 1.28), (95, 1.645), (98, 2.05), (99, 2.33)];

/// Z-score used for service levels missing from the table (the 98% value).
pub const FALLBACK_Z_SCORE: f64 = 2.05;

/// Looks up the Z-score for a service level, falling back to `fallback`
/// for anything not in the table.
pub fn z_score(service_level: u32, fallback: f64) -> f64 {
    SERVICE_LEVEL_Z_SCORES
        .iter()
        .find(|(level, _)| *level == service_level)
        .map(|(_, z)| *z)
        .unwrap_or(fallback)
}

/// Arithmetic mean. Empty input gives 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Defined as 0 for n < 2.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Lead time scaled by a percent change, rounded to whole days.
pub fn adjusted_lead_time(lead_time: u32, change_pct: f64) -> u32 {
    let adjusted = (lead_time as f64 * (1.0 + change_pct / 100.0)).round();
    if adjusted < 0.0 {
        0
    } else {
        adjusted as u32
    }
}

/// Safety Stock = Z * sigma_daily * sqrt(LeadTime)
pub fn safety_stock(z: f64, std_dev_daily: f64, lead_time: u32) -> i64 {
    let raw = (z * std_dev_daily * (lead_time as f64).sqrt()).round();
    // Negative only if a caller passes a negative Z
    (raw as i64).max(0)
}

/// Reorder Point = mu_daily * LeadTime + SafetyStock
pub fn reorder_point(avg_daily: f64, lead_time: u32, safety_stock: i64) -> i64 {
    (avg_daily * lead_time as f64 + safety_stock as f64).round() as i64
}

/// Max Stock (order-up-to level) = ReorderPoint + mu_daily * ReviewPeriod
pub fn max_stock(reorder_point: i64, avg_daily: f64, review_period_days: u32) -> i64 {
    (reorder_point as f64 + avg_daily * review_period_days as f64).round() as i64
}

/// Order enough to reach max stock once inventory is at or below the
/// reorder point. Otherwise order nothing.
pub fn purchase_recommendation(current_inventory: i64, reorder_point: i64, max_stock: i64) -> i64 {
    if current_inventory <= reorder_point {
        max_stock.saturating_sub(current_inventory).max(0)
    } else {
        0
    }
}

/// Inventory Turns = annual COGS / average inventory value.
///
/// Average inventory is approximated as the midpoint of max stock and
/// safety stock. A zero denominator yields 0 turns.
pub fn inventory_turns(
    avg_daily: f64,
    unit_cost: f64,
    max_stock: i64,
    safety_stock: i64,
    days_per_year: u32,
) -> f64 {
    let annual_cogs = avg_daily * days_per_year as f64 * unit_cost;
    let avg_inventory_value = ((max_stock as f64 + safety_stock as f64) / 2.0) * unit_cost;
    if avg_inventory_value == 0.0 {
        return 0.0;
    }
    annual_cogs / avg_inventory_value
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: [f64; 10] = [10.0, 12.0, 8.0, 11.0, 9.0, 10.0, 13.0, 9.0, 10.0, 8.0];

    #[test]
    fn test_z_score_table_and_fallback() {
        assert_eq!(z_score(90, FALLBACK_Z_SCORE), 1.28);
        assert_eq!(z_score(95, FALLBACK_Z_SCORE), 1.645);
        assert_eq!(z_score(98, FALLBACK_Z_SCORE), 2.05);
        assert_eq!(z_score(99, FALLBACK_Z_SCORE), 2.33);
        assert_eq!(z_score(97, FALLBACK_Z_SCORE), 2.05);
        assert_eq!(z_score(0, 1.0), 1.0);
    }

    #[test]
    fn test_mean_and_sample_std_dev() {
        assert_eq!(mean(&HISTORY), 10.0);
        // Sum of squared deviations is 24, over n - 1 = 9
        assert!((sample_std_dev(&HISTORY) - (24.0f64 / 9.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[7.0]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_adjusted_lead_time_rounds() {
        assert_eq!(adjusted_lead_time(7, 0.0), 7);
        assert_eq!(adjusted_lead_time(7, 50.0), 11); // 10.5 rounds up
        assert_eq!(adjusted_lead_time(7, -50.0), 4); // 3.5 rounds up
        assert_eq!(adjusted_lead_time(0, 50.0), 0);
    }

    #[test]
    fn test_reference_replenishment_figures() {
        let sd = sample_std_dev(&HISTORY);
        let ss = safety_stock(2.05, sd, 7);
        let rop = reorder_point(10.0, 7, ss);
        let max = max_stock(rop, 10.0, 30);

        assert_eq!(ss, 9);
        assert_eq!(rop, 79);
        assert_eq!(max, 379);
        assert_eq!(purchase_recommendation(50, rop, max), 329);
        assert_eq!(purchase_recommendation(80, rop, max), 0);
        assert_eq!(purchase_recommendation(79, rop, max), 300);
    }

    #[test]
    fn test_zero_variance_means_zero_safety_stock() {
        assert_eq!(safety_stock(2.33, 0.0, 14), 0);
        assert_eq!(reorder_point(4.0, 14, 0), 56);
    }

    #[test]
    fn test_purchase_never_negative() {
        // Inventory at the reorder point but above max stock (zero demand)
        assert_eq!(purchase_recommendation(0, 0, 0), 0);
        assert_eq!(purchase_recommendation(-5, 0, 0), 5);
    }

    #[test]
    fn test_purchase_saturates_on_extreme_inventory() {
        assert_eq!(purchase_recommendation(i64::MIN, 0, 10), i64::MAX);
        assert_eq!(purchase_recommendation(i64::MIN, i64::MAX, i64::MAX), i64::MAX);
    }

    #[test]
    fn test_inventory_turns() {
        let turns = inventory_turns(10.0, 5.0, 379, 9, 365);
        assert!((turns - 3650.0 / 194.0).abs() < 1e-9);
        assert_eq!(inventory_turns(10.0, 0.0, 379, 9, 365), 0.0);
        assert_eq!(inventory_turns(0.0, 5.0, 0, 0, 365), 0.0);
    }

    #[test]
    fn test_inventory_turns_with_huge_stock_levels() {
        let turns = inventory_turns(1.0, 1.0, i64::MAX, 5, 365);
        assert!(turns.is_finite());
        assert!(turns > 0.0);
        assert!(inventory_turns(1.0, 1.0, i64::MAX, i64::MAX, 365).is_finite());
    }
}
