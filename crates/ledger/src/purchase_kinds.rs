//! Admin-curated purchase categories.
//!
//! Purchases carry a free-text `kind`; this catalog is what the admin
//! surface offers as choices. Entries keep both the English and Arabic
//! display names.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseKind {
    pub id: i64,
    pub name: String,
    pub name_ar: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_kinds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub name_ar: String,
    pub created_by: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn active_new(
    name: &str,
    name_ar: &str,
    created_by: &str,
    created_at: DateTime<Utc>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        name: ActiveValue::Set(name.to_string()),
        name_ar: ActiveValue::Set(name_ar.to_string()),
        created_by: ActiveValue::Set(Some(created_by.to_string())),
        created_at: ActiveValue::Set(created_at),
    }
}

impl From<Model> for PurchaseKind {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            name_ar: model.name_ar,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
