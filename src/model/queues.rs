// src/model/queues.rs

use std::collections::VecDeque;

/// Inbound goods that land on a given future day within a fixed horizon.
///
/// Day 1 is the first day after "Today". Each call to `pop_arrival`
/// advances one day.
#[derive(Debug, Clone)]
pub struct ReceiptQueue {
    buffer: VecDeque<i64>,
    horizon_days: usize,
}

impl ReceiptQueue {
    pub fn new(horizon_days: usize) -> Self {
        Self {
            buffer: VecDeque::new(),
            horizon_days,
        }
    }

    /// A queue holding a single receipt of `quantity` on `arrival_day`.
    pub fn with_receipt(horizon_days: usize, arrival_day: usize, quantity: i64) -> Self {
        let mut queue = Self::new(horizon_days);
        queue.schedule(arrival_day, quantity);
        queue
    }

    /// Adds `quantity` to whatever already lands on `arrival_day`.
    ///
    /// Day 0 is "Today" and has already happened; days past the horizon are
    /// never simulated. Neither is scheduled.
    pub fn schedule(&mut self, arrival_day: usize, quantity: i64) {
        if arrival_day == 0 || arrival_day > self.horizon_days || quantity == 0 {
            return;
        }
        // Pad with empty days so the receipt sits at index arrival_day - 1
        while self.buffer.len() < arrival_day {
            self.buffer.push_back(0);
        }
        let slot = &mut self.buffer[arrival_day - 1];
        *slot = slot.saturating_add(quantity);
    }

    /// Goods arriving on the next day.
    pub fn pop_arrival(&mut self) -> i64 {
        self.buffer.pop_front().unwrap_or(0)
    }
}
