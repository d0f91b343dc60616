//! Material purchase records.
//!
//! A `Purchase` is one dated material expense attributed to a duplex unit,
//! together with the set of uploaded receipt paths bound to it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Money};

/// A persisted purchase, joined with its attachment paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub name: String,
    pub duplex_number: i32,
    pub kind: String,
    pub purchase_date: DateTime<Utc>,
    pub price: Money,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub attachment_paths: Vec<String>,
}

/// Caller-supplied scalar fields for a purchase create or full overwrite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseDraft {
    pub name: String,
    pub duplex_number: i32,
    pub kind: String,
    pub purchase_date: DateTime<Utc>,
    pub price: Money,
    pub notes: Option<String>,
}

impl PurchaseDraft {
    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation("name must not be empty".to_string()));
        }
        if self.kind.trim().is_empty() {
            return Err(LedgerError::Validation("kind must not be empty".to_string()));
        }
        if self.duplex_number < 1 {
            return Err(LedgerError::Validation(
                "duplex_number must be a positive integer".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(LedgerError::Validation(
                "price must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub duplex_number: i32,
    pub kind: String,
    pub purchase_date: DateTimeUtc,
    pub price_minor: i64,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_attachments::Entity")]
    Attachments,
}

impl Related<super::purchase_attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Builds the insert model for a new purchase. The creator identity is
/// stamped once here and never touched by updates.
pub(crate) fn active_from_draft(
    draft: &PurchaseDraft,
    created_by: &str,
    created_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(draft.name.clone()),
        duplex_number: ActiveValue::Set(draft.duplex_number),
        kind: ActiveValue::Set(draft.kind.clone()),
        purchase_date: ActiveValue::Set(draft.purchase_date),
        price_minor: ActiveValue::Set(draft.price.minor()),
        notes: ActiveValue::Set(draft.notes.clone()),
        created_by: ActiveValue::Set(created_by.to_string()),
        created_at: ActiveValue::Set(created_at),
    }
}

/// Overwrite model for an update: every scalar field the caller owns is
/// replaced, creator identity and creation timestamp stay as stamped.
pub(crate) fn active_overwrite(id: i64, draft: &PurchaseDraft) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(id),
        name: ActiveValue::Set(draft.name.clone()),
        duplex_number: ActiveValue::Set(draft.duplex_number),
        kind: ActiveValue::Set(draft.kind.clone()),
        purchase_date: ActiveValue::Set(draft.purchase_date),
        price_minor: ActiveValue::Set(draft.price.minor()),
        notes: ActiveValue::Set(draft.notes.clone()),
        ..Default::default()
    }
}

impl Purchase {
    pub(crate) fn from_parts(model: Model, attachment_paths: Vec<String>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            duplex_number: model.duplex_number,
            kind: model.kind,
            purchase_date: model.purchase_date,
            price: Money::from_minor(model.price_minor),
            notes: model.notes,
            created_by: model.created_by,
            created_at: model.created_at,
            attachment_paths,
        }
    }
}
