// src/simulation/projection.rs

use crate::model::metrics::{ForecastPoint, ProjectionLabel, ProjectionPoint};
use crate::model::queues::ReceiptQueue;
use chrono::{Days, NaiveDate};

/// Attaches calendar dates to a daily forecast. Day `i` (1-based) falls
/// `i` days after `anchor`.
pub fn dated_forecast(anchor: NaiveDate, daily_units: &[i64]) -> Vec<ForecastPoint> {
    daily_units
        .iter()
        .enumerate()
        .map(|(idx, &units)| ForecastPoint {
            date: day_after(anchor, idx + 1),
            units,
        })
        .collect()
}

/// Simulates on-hand inventory day by day.
///
/// Starts at `current_inventory` ("Today"), consumes each day's forecast and
/// receives `purchase` once on day `lead_time` if it is positive. A lead time
/// of 0 or beyond the horizon never lands inside the series.
pub fn project_inventory(
    current_inventory: i64,
    forecast: &[ForecastPoint],
    lead_time: u32,
    purchase: i64,
) -> Vec<ProjectionPoint> {
    let horizon = forecast.len();
    let mut inbound = if purchase > 0 {
        ReceiptQueue::with_receipt(horizon, lead_time as usize, purchase)
    } else {
        ReceiptQueue::new(horizon)
    };

    let mut series = Vec::with_capacity(horizon + 1);
    series.push(ProjectionPoint {
        label: ProjectionLabel::Today,
        inventory: current_inventory,
    });

    let mut on_hand = current_inventory;
    for point in forecast {
        on_hand = on_hand
            .saturating_sub(point.units)
            .saturating_add(inbound.pop_arrival());
        series.push(ProjectionPoint {
            label: ProjectionLabel::Day(point.date),
            inventory: on_hand,
        });
    }

    series
}

fn day_after(anchor: NaiveDate, days: usize) -> NaiveDate {
    // Only overflows at the end of chrono's calendar range
    anchor
        .checked_add_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MAX)
}
