use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum PurchaseKinds {
    Table,
    Id,
    Name,
    NameAr,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum WorkTypes {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseKinds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseKinds::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PurchaseKinds::Name).string().not_null())
                    .col(ColumnDef::new(PurchaseKinds::NameAr).string().not_null())
                    .col(ColumnDef::new(PurchaseKinds::CreatedBy).string())
                    .col(
                        ColumnDef::new(PurchaseKinds::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(WorkTypes::CreatedAt).timestamp().not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseKinds::Table).to_owned())
            .await
    }
}
