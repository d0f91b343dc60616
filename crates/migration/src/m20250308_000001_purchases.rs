use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Purchases {
    Table,
    Id,
    Name,
    DuplexNumber,
    Kind,
    PurchaseDate,
    PriceMinor,
    Notes,
    CreatedBy,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchases::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchases::Name).string().not_null())
                    .col(
                        ColumnDef::new(Purchases::DuplexNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Purchases::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Purchases::PurchaseDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Purchases::PriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Purchases::Notes).string())
                    .col(ColumnDef::new(Purchases::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Purchases::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchases-duplex_number-created_at")
                    .table(Purchases::Table)
                    .col(Purchases::DuplexNumber)
                    .col(Purchases::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Lookup index for the pre-insert duplicate check. Deliberately not
        // unique: the date part of the identity tuple is compared at day
        // granularity in the application.
        manager
            .create_index(
                Index::create()
                    .name("idx-purchases-name-duplex_number-kind")
                    .table(Purchases::Table)
                    .col(Purchases::Name)
                    .col(Purchases::DuplexNumber)
                    .col(Purchases::Kind)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await
    }
}
