//! Adds the attachment tables for purchases and work payments.
//!
//! Attachments are exclusively owned by their financial record: the
//! foreign keys cascade on delete, so removing a record removes its files'
//! references without an application-level step.

use sea_orm_migration::prelude::*;

use crate::m20250308_000001_purchases::Purchases;
use crate::m20250315_000001_work_payments::WorkPayments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum PurchaseAttachments {
    Table,
    Id,
    PurchaseId,
    AttachmentPath,
    CreatedAt,
}

#[derive(Iden)]
enum PaymentAttachments {
    Table,
    Id,
    PaymentId,
    AttachmentPath,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseAttachments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseAttachments::PurchaseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseAttachments::AttachmentPath)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseAttachments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_attachments-purchase_id")
                            .from(PurchaseAttachments::Table, PurchaseAttachments::PurchaseId)
                            .to(Purchases::Table, Purchases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_attachments-purchase_id")
                    .table(PurchaseAttachments::Table)
                    .col(PurchaseAttachments::PurchaseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentAttachments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentAttachments::PaymentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentAttachments::AttachmentPath)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentAttachments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payment_attachments-payment_id")
                            .from(PaymentAttachments::Table, PaymentAttachments::PaymentId)
                            .to(WorkPayments::Table, WorkPayments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payment_attachments-payment_id")
                    .table(PaymentAttachments::Table)
                    .col(PaymentAttachments::PaymentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentAttachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseAttachments::Table).to_owned())
            .await
    }
}
