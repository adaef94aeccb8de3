use tracing::debug;

use crate::config::TuitionSchedule;
use crate::decimal::Money;
use crate::types::{FeeLineItem, ScholarshipStatus};

/// tuition calculator
///
/// Tuition is linear in enrolled units; the per-unit rate depends only on
/// the student's scholarship classification.
pub struct TuitionCalculator {
    schedule: TuitionSchedule,
}

impl TuitionCalculator {
    pub fn new(schedule: TuitionSchedule) -> Self {
        Self { schedule }
    }

    /// per-unit rate for a classification
    pub fn per_unit(&self, status: ScholarshipStatus) -> Money {
        match status {
            ScholarshipStatus::Regular => self.schedule.regular_per_unit,
            ScholarshipStatus::Scholar => self.schedule.scholar_per_unit,
        }
    }

    /// total tuition for the enrolled unit count
    pub fn tuition_for(&self, total_units: u32, status: ScholarshipStatus) -> Money {
        self.per_unit(status) * total_units
    }
}

/// filter and sum ad-hoc fee line items
///
/// Entries with a non-positive amount are dropped rather than rejected;
/// they are neither persisted nor counted toward the total.
pub fn aggregate_fees(fees: &[FeeLineItem]) -> (Vec<FeeLineItem>, Money) {
    let mut kept = Vec::with_capacity(fees.len());
    let mut other_total = Money::ZERO;

    for fee in fees {
        if !fee.amount.is_positive() {
            debug!(fee = %fee.name, amount = %fee.amount, "skipping non-positive fee entry");
            continue;
        }
        other_total += fee.amount;
        kept.push(fee.clone());
    }

    (kept, other_total)
}
