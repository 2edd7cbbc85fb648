// src/model/scenario.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_CHANGE_PCT: f64 = 50.0;

/// Which vendors the recommendation list is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum VendorFilter {
    #[default]
    All,
    Vendor(String),
}

impl VendorFilter {
    pub fn matches(&self, vendor: &str) -> bool {
        match self {
            VendorFilter::All => true,
            VendorFilter::Vendor(name) => name == vendor,
        }
    }
}

impl FromStr for VendorFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(VendorFilter::All)
        } else {
            Ok(VendorFilter::Vendor(s.to_string()))
        }
    }
}

impl fmt::Display for VendorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorFilter::All => write!(f, "All"),
            VendorFilter::Vendor(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for VendorFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VendorFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

/// The "what if" knobs of one recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Target service level in percent (90, 95, 98 or 99).
    pub service_level: u32,
    /// Lead time change in percent, -50..=50.
    pub lead_time_change_pct: f64,
    /// Demand change in percent, -50..=50.
    pub demand_change_pct: f64,
    pub vendor_filter: VendorFilter,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            service_level: 98,
            lead_time_change_pct: 0.0,
            demand_change_pct: 0.0,
            vendor_filter: VendorFilter::All,
        }
    }
}

impl ScenarioParameters {
    /// Copy with both percent changes clamped to +/-50.
    pub fn clamped(&self) -> Self {
        Self {
            service_level: self.service_level,
            lead_time_change_pct: clamp_pct(self.lead_time_change_pct),
            demand_change_pct: clamp_pct(self.demand_change_pct),
            vendor_filter: self.vendor_filter.clone(),
        }
    }

    /// Hashable identity of the inputs that affect per-SKU metrics.
    /// The vendor filter only matters to aggregation, so it is left out.
    pub fn metrics_key(&self) -> ScenarioKey {
        let clamped = self.clamped();
        ScenarioKey {
            service_level: clamped.service_level,
            lead_time_change_bits: clamped.lead_time_change_pct.to_bits(),
            demand_change_bits: clamped.demand_change_pct.to_bits(),
        }
    }
}

fn clamp_pct(pct: f64) -> f64 {
    // NaN and -0.0 both collapse to 0.0 so equal scenarios share a cache key
    if pct.is_nan() || pct == 0.0 {
        return 0.0;
    }
    pct.clamp(-MAX_CHANGE_PCT, MAX_CHANGE_PCT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScenarioKey {
    service_level: u32,
    lead_time_change_bits: u64,
    demand_change_bits: u64,
}
