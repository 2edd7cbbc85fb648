// src/simulation/engine.rs

use crate::model::metrics::{AbcClass, SkuMetrics};
use crate::model::record::{latest_date, RecordSet, SalesRecord};
use crate::model::scenario::{ScenarioKey, ScenarioParameters};
use crate::simulation::aggregate::{aggregate, Aggregation};
use crate::simulation::config::EngineConfig;
use crate::simulation::projection::{dated_forecast, project_inventory};
use crate::strategy::classification::classify_abc;
use crate::strategy::optimization::{
    adjusted_lead_time, inventory_turns, max_stock, mean, purchase_recommendation, reorder_point,
    safety_stock, sample_std_dev, z_score,
};
use crate::strategy::traits::{ForecastContext, ForecastPolicy};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// Minimum number of records a SKU needs before it gets metrics.
pub const MIN_HISTORY: usize = 2;

/// Computes replenishment metrics for every active SKU with enough history.
///
/// SKUs with fewer than `MIN_HISTORY` records are left out of the result.
/// Forecast dates count from the latest date in `records`.
pub fn compute_sku_metrics(
    records: &[SalesRecord],
    active_skus: &BTreeSet<String>,
    scenario: &ScenarioParameters,
    config: &EngineConfig,
) -> BTreeMap<String, SkuMetrics> {
    let policy = config.forecast.build();
    let scenario = scenario.clamped();
    let mut results = BTreeMap::new();

    let Some(anchor) = latest_date(records) else {
        return results;
    };

    for (sku, history) in group_by_sku(records, active_skus) {
        if let Some(metrics) = metrics_for_sku(sku, history, &scenario, config, policy.as_ref(), anchor) {
            results.insert(sku.to_string(), metrics);
        }
    }

    results
}

/// Records of the active SKUs, grouped by SKU and sorted by date.
fn group_by_sku<'a>(
    records: &'a [SalesRecord],
    active_skus: &BTreeSet<String>,
) -> BTreeMap<&'a str, Vec<&'a SalesRecord>> {
    let mut groups: BTreeMap<&str, Vec<&SalesRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| active_skus.contains(&r.sku)) {
        groups.entry(record.sku.as_str()).or_default().push(record);
    }
    for history in groups.values_mut() {
        // Stable, so same-day rows keep their input order
        history.sort_by_key(|r| r.date);
    }
    groups
}

fn metrics_for_sku(
    sku: &str,
    history: Vec<&SalesRecord>,
    scenario: &ScenarioParameters,
    config: &EngineConfig,
    policy: &dyn ForecastPolicy,
    anchor: NaiveDate,
) -> Option<SkuMetrics> {
    if history.len() < MIN_HISTORY {
        debug!(sku, records = history.len(), "skipping SKU with insufficient history");
        return None;
    }
    let earliest = history.first()?;
    let latest = history.last()?;

    let units: Vec<f64> = history.iter().map(|r| r.units_sold as f64).collect();
    let avg_daily_sales = mean(&units);
    let std_dev_daily_sales = sample_std_dev(&units);

    let lead_time = adjusted_lead_time(earliest.lead_time, scenario.lead_time_change_pct);
    let z = z_score(scenario.service_level, config.fallback_z_score);

    let safety = safety_stock(z, std_dev_daily_sales, lead_time);
    let reorder = reorder_point(avg_daily_sales, lead_time, safety);
    let max = max_stock(reorder, avg_daily_sales, config.review_period_days);

    let current_inventory = latest.current_inventory;
    let purchase = purchase_recommendation(current_inventory, reorder, max);

    let context = ForecastContext {
        sku,
        avg_daily_sales,
        demand_change_pct: scenario.demand_change_pct,
    };
    let forecast_series = dated_forecast(anchor, &policy.forecast(&context, config.horizon_days));
    let projection_series = project_inventory(current_inventory, &forecast_series, lead_time, purchase);

    let turns = inventory_turns(
        avg_daily_sales,
        latest.unit_cost,
        max,
        safety,
        config.days_per_year,
    );

    debug!(
        sku,
        avg_daily_sales, safety, reorder, max, purchase, "computed replenishment metrics"
    );

    Some(SkuMetrics {
        sku: sku.to_string(),
        avg_daily_sales,
        std_dev_daily_sales,
        adjusted_lead_time: lead_time,
        safety_stock: safety,
        reorder_point: reorder,
        max_stock: max,
        current_inventory,
        purchase_recommendation: purchase,
        inventory_turns: turns,
        forecast_series,
        projection_series,
        vendor: latest.vendor.clone(),
        unit_cost: latest.unit_cost,
        unit_price: latest.unit_price,
    })
}

/// Everything the presentation layer needs after one recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub dataset_version: u64,
    pub scenario: ScenarioParameters,
    pub classification: BTreeMap<String, AbcClass>,
    pub metrics: BTreeMap<String, SkuMetrics>,
    pub aggregation: Aggregation,
}

/// A session over one record set.
///
/// `recompute` is the single entry point: it reruns classification, metrics
/// and aggregation for the given selection and scenario. Per-SKU metrics are
/// memoized for the most recent scenario only, so the memo never holds more
/// than one entry per SKU. A new scenario or any change to the records drops
/// it.
#[derive(Debug)]
pub struct ReplenishmentEngine {
    config: EngineConfig,
    records: RecordSet,
    classification: Option<(u64, BTreeMap<String, AbcClass>)>,
    metrics_memo: HashMap<String, Option<SkuMetrics>>,
    memo_key: Option<ScenarioKey>,
    memo_version: u64,
}

impl ReplenishmentEngine {
    pub fn new(config: EngineConfig, records: RecordSet) -> Self {
        let memo_version = records.version();
        Self {
            config,
            records,
            classification: None,
            metrics_memo: HashMap::new(),
            memo_key: None,
            memo_version,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn replace_records(&mut self, records: Vec<SalesRecord>) {
        self.records.replace_all(records);
        self.invalidate();
    }

    pub fn append_records(&mut self, records: Vec<SalesRecord>) {
        self.records.extend(records);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.classification = None;
        self.metrics_memo.clear();
        self.memo_key = None;
        self.memo_version = self.records.version();
    }

    /// ABC classes for the whole record set, cached per dataset version.
    pub fn classification(&mut self) -> &BTreeMap<String, AbcClass> {
        let version = self.records.version();
        if !matches!(&self.classification, Some((v, _)) if *v == version) {
            self.classification = None;
        }
        let records = &self.records;
        let thresholds = self.config.abc_thresholds();
        &self
            .classification
            .get_or_insert_with(|| (version, classify_abc(records.records(), thresholds)))
            .1
    }

    /// Per-SKU metrics for the active selection, served from the memo where
    /// possible.
    pub fn metrics(
        &mut self,
        active_skus: &BTreeSet<String>,
        scenario: &ScenarioParameters,
    ) -> BTreeMap<String, SkuMetrics> {
        if self.memo_version != self.records.version() {
            self.invalidate();
        }

        let key = scenario.metrics_key();
        if self.memo_key != Some(key) {
            self.metrics_memo.clear();
            self.memo_key = Some(key);
        }

        let missing: BTreeSet<String> = active_skus
            .iter()
            .filter(|sku| !self.metrics_memo.contains_key(sku.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            let mut fresh = compute_sku_metrics(self.records.records(), &missing, scenario, &self.config);
            for sku in missing {
                // Absent entries are memoized too, so short histories are not re-scanned
                let entry = fresh.remove(&sku);
                self.metrics_memo.insert(sku, entry);
            }
        }

        active_skus
            .iter()
            .filter_map(|sku| {
                self.metrics_memo
                    .get(sku)
                    .and_then(|m| m.clone())
                    .map(|m| (sku.clone(), m))
            })
            .collect()
    }

    /// Reruns the whole pipeline for one selection and scenario.
    pub fn recompute(
        &mut self,
        active_skus: &BTreeSet<String>,
        scenario: &ScenarioParameters,
    ) -> DashboardSnapshot {
        let classification = self.classification().clone();
        let metrics = self.metrics(active_skus, scenario);
        let aggregation = aggregate(&metrics, &scenario.vendor_filter, self.config.horizon_days);

        info!(
            dataset_version = self.records.version(),
            active = active_skus.len(),
            computed = metrics.len(),
            to_reorder = aggregation.kpis.items_to_reorder,
            "recomputed replenishment dashboard"
        );

        DashboardSnapshot {
            dataset_version: self.records.version(),
            scenario: scenario.clone(),
            classification,
            metrics,
            aggregation,
        }
    }
}
