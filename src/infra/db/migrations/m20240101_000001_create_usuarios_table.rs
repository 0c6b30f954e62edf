//! Migration: Create the usuarios table.

use sea_orm_migration::prelude::*;

use crate::config::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, ROLE_USER};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nombre).string_len(MAX_NAME_LENGTH).not_null())
                    // Backstop for the service-level duplicate email check
                    .col(
                        ColumnDef::new(Usuarios::Email)
                            .string_len(MAX_EMAIL_LENGTH)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::HashedPassword).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuarios::Role)
                            .string_len(20)
                            .not_null()
                            .default(ROLE_USER),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Usuarios {
    Table,
    Id,
    Nombre,
    Email,
    HashedPassword,
    Role,
}
