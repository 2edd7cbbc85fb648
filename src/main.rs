// src/main.rs

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use replenishment_engine::io::{demand, records, reporting};
use replenishment_engine::strategy::implementations::ForecastMode;
use replenishment_engine::{EngineConfig, RecordSet, ReplenishmentEngine, ScenarioParameters, VendorFilter};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Replenishment recommendations from daily sales history.
#[derive(Debug, Parser)]
#[command(name = "replenish", version)]
struct Args {
    /// Sales history CSV
    #[arg(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Generate a synthetic history with this many SKUs instead of reading a file
    #[arg(long)]
    demo: Option<usize>,

    /// Days of synthetic history per SKU
    #[arg(long, default_value_t = 90)]
    demo_days: usize,

    /// Seed for the synthetic history
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Target service level in percent (90, 95, 98, 99)
    #[arg(long, default_value_t = 98)]
    service_level: u32,

    /// Lead time change in percent (-50..50)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lead_time_change: f64,

    /// Demand change in percent (-50..50)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    demand_change: f64,

    /// Only recommend purchases from this vendor ("All" for every vendor)
    #[arg(long, default_value = "All")]
    vendor: VendorFilter,

    /// Restrict the active selection to these SKUs (repeatable; default all)
    #[arg(long = "sku")]
    skus: Vec<String>,

    /// Engine config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the jittered (+/-10%) forecast with this seed
    #[arg(long)]
    jitter_seed: Option<u64>,

    /// Directory for metrics.csv, projection.csv and snapshot.json
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "replenishment_engine=info,replenish=info".to_string()),
        )
        .init();

    let args = Args::parse();

    // 1. CONFIGURATION
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.jitter_seed {
        config.forecast = ForecastMode::Jittered { seed, jitter: 0.1 };
    }

    // 2. LOAD HISTORY
    let history = match (&args.input, args.demo) {
        (Some(path), _) => records::load_records_file(path)
            .with_context(|| format!("loading sales history from {}", path.display()))?,
        (None, Some(sku_count)) => {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid demo start date")?;
            demand::generate_demo_history(args.seed, sku_count, args.demo_days, start)?
        }
        (None, None) => bail!("either --input <csv> or --demo <skus> is required"),
    };
    let record_set = RecordSet::new(history);
    let vendors = record_set.vendors();
    info!(
        records = record_set.len(),
        skus = record_set.skus().len(),
        vendors = vendors.len(),
        "history ready"
    );
    if let VendorFilter::Vendor(name) = &args.vendor {
        if !vendors.contains(name) {
            warn!(vendor = %name, known = ?vendors, "vendor filter matches no records");
        }
    }

    // 3. SELECTION & SCENARIO
    let active: BTreeSet<String> = if args.skus.is_empty() {
        record_set.skus().into_iter().collect()
    } else {
        args.skus.iter().cloned().collect()
    };
    let scenario = ScenarioParameters {
        service_level: args.service_level,
        lead_time_change_pct: args.lead_time_change,
        demand_change_pct: args.demand_change,
        vendor_filter: args.vendor.clone(),
    };

    // 4. RECOMPUTE
    let mut engine = ReplenishmentEngine::new(config, record_set);
    let snapshot = engine.recompute(&active, &scenario);

    // 5. EXPORT RESULTS
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        reporting::write_metrics_csv(dir.join("metrics.csv"), &snapshot)?;
        reporting::write_projection_csv(dir.join("projection.csv"), &snapshot.aggregation.projection)?;
        reporting::write_snapshot_json(dir.join("snapshot.json"), &snapshot)?;
    }

    // 6. PRINT SUMMARY
    println!("=== Replenishment Summary (vendor: {}) ===", scenario.vendor_filter);
    for rec in &snapshot.aggregation.recommendations {
        let class = snapshot
            .classification
            .get(&rec.sku)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} [{}] {:<12} on hand {:>6}  reorder at {:>6}  order {:>6}  (${:.2})",
            rec.sku, class, rec.vendor, rec.current_inventory, rec.reorder_point, rec.quantity, rec.purchase_value
        );
    }

    let kpis = &snapshot.aggregation.kpis;
    println!("\n=== KPIs ===");
    println!("SKUs analysed:            {}", snapshot.metrics.len());
    println!("Items to reorder:         {}", kpis.items_to_reorder);
    println!("Total purchase value:     ${:.2}", kpis.total_purchase_value);
    println!("Projected revenue ({}d): ${:.2}", engine.config().horizon_days, kpis.total_projected_revenue);
    println!("Average inventory turns:  {:.2}", kpis.average_inventory_turns);

    Ok(())
}
