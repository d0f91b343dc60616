//! File references owned by work payments. Same lifecycle as
//! [`crate::purchase_attachments`]: cascade on delete, set-reconciled on
//! update.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub payment_id: i64,
    pub attachment_path: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_payments::Entity",
        from = "Column::PaymentId",
        to = "super::work_payments::Column::Id"
    )]
    Payment,
}

impl Related<super::work_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
