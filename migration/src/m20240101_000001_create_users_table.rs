use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(50).not_null())
                    // Placeholder default is applied by the application on every write
                    .col(ColumnDef::new(Users::ImageUrl).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Backs the (last_name, first_name) listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_users_last_first")
                    .table(Users::Table)
                    .col(Users::LastName)
                    .col(Users::FirstName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    ImageUrl,
}
