//! Migration: Create the cultivos table with its owner foreign key.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_usuarios_table::Usuarios;
use crate::config::{MAX_KIND_LENGTH, MAX_NAME_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cultivos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cultivos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cultivos::Nombre).string_len(MAX_NAME_LENGTH).not_null())
                    .col(ColumnDef::new(Cultivos::Tipo).string_len(MAX_KIND_LENGTH).not_null())
                    .col(ColumnDef::new(Cultivos::Descripcion).text().null())
                    .col(ColumnDef::new(Cultivos::UsuarioId).integer().not_null())
                    // The services delete dependents explicitly; the cascade only
                    // catches deletes issued outside them
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cultivos_usuario_id")
                            .from(Cultivos::Table, Cultivos::UsuarioId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cultivos_usuario_id")
                    .table(Cultivos::Table)
                    .col(Cultivos::UsuarioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cultivos_tipo")
                    .table(Cultivos::Table)
                    .col(Cultivos::Tipo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cultivos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cultivos {
    Table,
    Id,
    Nombre,
    Tipo,
    Descripcion,
    UsuarioId,
}
