//! Labor contract envelopes.
//!
//! A `WorkProject` is a named budget for labor on one duplex, with a
//! contracted total price. Payments recorded against it are compared with
//! that total to derive how much of the contract is still unpaid.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Money};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkProject {
    pub id: i64,
    pub name: String,
    pub total_price: Money,
    pub duration_days: i32,
    pub start_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub duplex_number: i32,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A project joined with its payment rollup.
///
/// `remaining` may legitimately go negative: overpaying a contract is not
/// blocked, only surfaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkProjectSummary {
    pub project: WorkProject,
    pub total_paid: Money,
    pub remaining: Money,
}

/// Caller-supplied fields for a new work project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkProjectDraft {
    pub name: String,
    pub total_price: Money,
    pub duration_days: Option<i32>,
    pub start_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub duplex_number: i32,
}

impl WorkProjectDraft {
    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation("name must not be empty".to_string()));
        }
        if self.duplex_number < 1 {
            return Err(LedgerError::Validation(
                "duplex_number must be a positive integer".to_string(),
            ));
        }
        if self.total_price.is_negative() {
            return Err(LedgerError::Validation(
                "total_price must not be negative".to_string(),
            ));
        }
        if self.duration_days.is_some_and(|d| d < 0) {
            return Err(LedgerError::Validation(
                "duration_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Stored display name carries the duplex it belongs to.
    pub(crate) fn display_name(&self) -> String {
        format!("{} - duplex({})", self.name.trim(), self.duplex_number)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub total_price_minor: i64,
    pub duration_days: i32,
    pub start_date: DateTimeUtc,
    pub notes: Option<String>,
    pub duplex_number: i32,
    pub created_by: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_payments::Entity")]
    Payments,
}

impl Related<super::work_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn active_from_draft(
    draft: &WorkProjectDraft,
    created_by: &str,
    created_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(draft.display_name()),
        total_price_minor: ActiveValue::Set(draft.total_price.minor()),
        duration_days: ActiveValue::Set(draft.duration_days.unwrap_or(0)),
        start_date: ActiveValue::Set(draft.start_date),
        notes: ActiveValue::Set(draft.notes.clone()),
        duplex_number: ActiveValue::Set(draft.duplex_number),
        created_by: ActiveValue::Set(Some(created_by.to_string())),
        created_at: ActiveValue::Set(created_at),
    }
}

impl From<Model> for WorkProject {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            total_price: Money::from_minor(model.total_price_minor),
            duration_days: model.duration_days,
            start_date: model.start_date,
            notes: model.notes,
            duplex_number: model.duplex_number,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
