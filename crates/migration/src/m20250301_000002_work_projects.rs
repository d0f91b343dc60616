use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum WorkProjects {
    Table,
    Id,
    Name,
    TotalPriceMinor,
    DurationDays,
    StartDate,
    Notes,
    DuplexNumber,
    CreatedBy,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkProjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkProjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(WorkProjects::TotalPriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkProjects::DurationDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkProjects::StartDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkProjects::Notes).string())
                    .col(
                        ColumnDef::new(WorkProjects::DuplexNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkProjects::CreatedBy).string())
                    .col(
                        ColumnDef::new(WorkProjects::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-work_projects-duplex_number")
                    .table(WorkProjects::Table)
                    .col(WorkProjects::DuplexNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkProjects::Table).to_owned())
            .await
    }
}
