use sea_orm_migration::prelude::*;

use crate::m20250301_000002_work_projects::WorkProjects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum WorkPayments {
    Table,
    Id,
    ProjectId,
    AmountMinor,
    PaidOn,
    Notes,
    DuplexNumber,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkPayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkPayments::ProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkPayments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkPayments::PaidOn).timestamp().not_null())
                    .col(ColumnDef::new(WorkPayments::Notes).string())
                    .col(
                        ColumnDef::new(WorkPayments::DuplexNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkPayments::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(WorkPayments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkPayments::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-work_payments-project_id")
                            .from(WorkPayments::Table, WorkPayments::ProjectId)
                            .to(WorkProjects::Table, WorkProjects::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-work_payments-project_id")
                    .table(WorkPayments::Table)
                    .col(WorkPayments::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-work_payments-duplex_number")
                    .table(WorkPayments::Table)
                    .col(WorkPayments::DuplexNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkPayments::Table).to_owned())
            .await
    }
}
