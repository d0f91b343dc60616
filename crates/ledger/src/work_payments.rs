//! Labor payment records.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Money};

/// A persisted labor payment, joined with its project name and attachment
/// paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPayment {
    pub id: i64,
    pub project_id: i64,
    pub project_name: Option<String>,
    pub amount: Money,
    pub paid_on: DateTime<Utc>,
    pub notes: Option<String>,
    pub duplex_number: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub attachment_paths: Vec<String>,
}

/// Caller-supplied scalar fields for a payment create or full overwrite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkPaymentDraft {
    pub project_id: i64,
    pub amount: Money,
    pub paid_on: DateTime<Utc>,
    pub notes: Option<String>,
    pub duplex_number: i32,
}

impl WorkPaymentDraft {
    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        if self.project_id < 1 {
            return Err(LedgerError::Validation(
                "project_id must be a positive integer".to_string(),
            ));
        }
        if self.duplex_number < 1 {
            return Err(LedgerError::Validation(
                "duplex_number must be a positive integer".to_string(),
            ));
        }
        if self.amount.is_negative() {
            return Err(LedgerError::Validation(
                "amount must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub amount_minor: i64,
    pub paid_on: DateTimeUtc,
    pub notes: Option<String>,
    pub duplex_number: i32,
    pub created_by: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_projects::Entity",
        from = "Column::ProjectId",
        to = "super::work_projects::Column::Id"
    )]
    Project,
    #[sea_orm(has_many = "super::payment_attachments::Entity")]
    Attachments,
}

impl Related<super::work_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::payment_attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn active_from_draft(
    draft: &WorkPaymentDraft,
    created_by: &str,
    created_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        project_id: ActiveValue::Set(draft.project_id),
        amount_minor: ActiveValue::Set(draft.amount.minor()),
        paid_on: ActiveValue::Set(draft.paid_on),
        notes: ActiveValue::Set(draft.notes.clone()),
        duplex_number: ActiveValue::Set(draft.duplex_number),
        created_by: ActiveValue::Set(created_by.to_string()),
        created_at: ActiveValue::Set(created_at),
        updated_at: ActiveValue::Set(created_at),
    }
}

/// Overwrite model for an update.
///
/// Unlike purchases, a payment update also overwrites `created_by` with the
/// caller-supplied value and bumps `updated_at` (the timestamp the duplex
/// cost table reports as the labor side's last activity).
pub(crate) fn active_overwrite(
    id: i64,
    draft: &WorkPaymentDraft,
    created_by: &str,
    updated_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(id),
        project_id: ActiveValue::Set(draft.project_id),
        amount_minor: ActiveValue::Set(draft.amount.minor()),
        paid_on: ActiveValue::Set(draft.paid_on),
        notes: ActiveValue::Set(draft.notes.clone()),
        duplex_number: ActiveValue::Set(draft.duplex_number),
        created_by: ActiveValue::Set(created_by.to_string()),
        updated_at: ActiveValue::Set(updated_at),
        ..Default::default()
    }
}

impl WorkPayment {
    pub(crate) fn from_parts(
        model: Model,
        project_name: Option<String>,
        attachment_paths: Vec<String>,
    ) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            project_name,
            amount: Money::from_minor(model.amount_minor),
            paid_on: model.paid_on,
            notes: model.notes,
            duplex_number: model.duplex_number,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            attachment_paths,
        }
    }
}
