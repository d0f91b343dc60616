//! Derived, read-only cost views.
//!
//! Everything here is computed from the stored purchase and payment rows at
//! request time; nothing is persisted. Amounts stay in [`Money`], the
//! month-over-month deltas are percentages and therefore the only floats in
//! the crate.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::Money;

/// Fleet-wide spending rollup.
///
/// `total_spending`, `labor_costs` and `material_costs` are all-time sums,
/// while `monthly_change` compares the current calendar month against the
/// previous one. Existing dashboards consume both readings side by side,
/// so the two windows stay as they are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_spending: Money,
    pub labor_costs: Money,
    pub material_costs: Money,
    pub monthly_change: MonthlyChange,
}

/// Month-over-month percentage deltas, clamped to `[-100, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyChange {
    pub total_spending: f64,
    pub labor_costs: f64,
    pub material_costs: f64,
}

/// Per-duplex cost row. Present for every duplex in the requested range,
/// zeros and the Unix-epoch sentinel when the unit has no activity yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplexCostRow {
    pub duplex_number: i32,
    pub labor_cost: Money,
    pub material_cost: Money,
    pub total: Money,
    pub last_updated: DateTime<Utc>,
}

/// One creation event for the admin activity feed, merged across purchases
/// and work payments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub record_id: i64,
    pub created_by: String,
    pub duplex_number: i32,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub details: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Purchase,
    WorkPayment,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::WorkPayment => "work_payment",
        }
    }
}

/// Percentage change of `current` against `last`.
///
/// A zero baseline yields 0 rather than an infinite growth figure, and the
/// result is capped at ±100 to keep extreme swings readable.
pub(crate) fn monthly_change(current: Money, last: Money) -> f64 {
    if last.is_zero() {
        return 0.0;
    }
    let change = (current.minor() - last.minor()) as f64 / last.minor() as f64 * 100.0;
    change.clamp(-100.0, 100.0)
}

/// The calendar month immediately before `(year, month)`; the year rolls
/// over at January.
pub(crate) fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

pub(crate) fn in_month(date: DateTime<Utc>, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}
