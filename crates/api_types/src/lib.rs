//! Wire types shared by the HTTP server and its clients.
//!
//! Monetary fields travel as integer minor units (`*_minor`); the
//! month-over-month percentages in the analytics summary are the only
//! floating-point fields on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success envelope: `{"success": true, "data": ...}`.
///
/// Failures use the mirrored `{"success": false, "error": ...}` body
/// produced by the server's error mapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Acknowledgement body for deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

pub mod purchase {
    use super::*;

    /// Body for both `POST /purchases` and `PUT /purchases/{id}`: updates
    /// are full overwrites, so the shape is identical.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseWrite {
        pub name: String,
        pub duplex_number: i32,
        pub kind: String,
        pub purchase_date: DateTime<Utc>,
        pub price_minor: i64,
        pub notes: Option<String>,
        pub attachment_paths: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseView {
        pub id: i64,
        pub name: String,
        pub duplex_number: i32,
        pub kind: String,
        pub purchase_date: DateTime<Utc>,
        pub price_minor: i64,
        pub notes: Option<String>,
        pub created_by: String,
        pub created_at: DateTime<Utc>,
        pub attachment_paths: Vec<String>,
    }

    /// Query string for `GET /purchases`.
    ///
    /// `start_date`/`end_date` accept either plain `YYYY-MM-DD` days or
    /// RFC 3339 datetimes; the two forms select different day bases (UTC
    /// vs site-local) for the `created_at` filter.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PurchaseListQuery {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub duplex_number: Option<i32>,
        pub kind: Option<String>,
    }
}

pub mod work_payment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkPaymentNew {
        pub project_id: i64,
        pub amount_minor: i64,
        pub paid_on: DateTime<Utc>,
        pub notes: Option<String>,
        pub duplex_number: i32,
        pub attachment_paths: Option<Vec<String>>,
    }

    /// Update body. `created_by` is applied verbatim when present; absent,
    /// the caller's email is stamped instead.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkPaymentUpdate {
        pub project_id: i64,
        pub amount_minor: i64,
        pub paid_on: DateTime<Utc>,
        pub notes: Option<String>,
        pub duplex_number: i32,
        pub attachment_paths: Option<Vec<String>>,
        pub created_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkPaymentView {
        pub id: i64,
        pub project_id: i64,
        pub project_name: Option<String>,
        pub amount_minor: i64,
        pub paid_on: DateTime<Utc>,
        pub notes: Option<String>,
        pub duplex_number: i32,
        pub created_by: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        pub attachment_paths: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WorkPaymentListQuery {
        pub project_id: Option<i64>,
        pub duplex_number: Option<i32>,
    }
}

pub mod work_project {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkProjectNew {
        pub name: String,
        pub total_price_minor: i64,
        pub duration_days: Option<i32>,
        pub start_date: DateTime<Utc>,
        pub notes: Option<String>,
        pub duplex_number: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkProjectView {
        pub id: i64,
        pub name: String,
        pub total_price_minor: i64,
        pub duration_days: i32,
        pub start_date: DateTime<Utc>,
        pub notes: Option<String>,
        pub duplex_number: i32,
        pub created_by: Option<String>,
        pub created_at: DateTime<Utc>,
        pub total_paid_minor: i64,
        pub remaining_minor: i64,
    }
}

pub mod catalog {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseKindNew {
        pub name: String,
        pub name_ar: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseKindView {
        pub id: i64,
        pub name: String,
        pub name_ar: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkTypeNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkTypeView {
        pub id: i64,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod analytics {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub total_spending_minor: i64,
        pub labor_costs_minor: i64,
        pub material_costs_minor: i64,
        pub monthly_change: MonthlyChangeView,
    }

    /// Percentages, clamped to `[-100, 100]` server-side.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyChangeView {
        pub total_spending: f64,
        pub labor_costs: f64,
        pub material_costs: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DuplexCostView {
        pub duplex_number: i32,
        pub labor_cost_minor: i64,
        pub material_cost_minor: i64,
        pub total_minor: i64,
        pub last_updated: DateTime<Utc>,
    }
}

pub mod admin {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityView {
        pub kind: String,
        pub record_id: i64,
        pub created_by: String,
        pub duplex_number: i32,
        pub amount_minor: i64,
        pub occurred_at: DateTime<Utc>,
        pub details: String,
    }
}
