//! Migration: Create pets table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Pets::Name).string().not_null())
                    .col(
                        ColumnDef::new(Pets::DateOfBirth)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pets::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Pets::BreedName).string().not_null())
                    .col(ColumnDef::new(Pets::Colors).json_binary().not_null())
                    .col(ColumnDef::new(Pets::Description).text().null())
                    .col(ColumnDef::new(Pets::Pedigree).string().null())
                    .col(ColumnDef::new(Pets::Microchip).string().null())
                    .col(ColumnDef::new(Pets::Avatar).string().null())
                    .col(ColumnDef::new(Pets::Metas).json_binary().not_null())
                    .col(ColumnDef::new(Pets::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Pets::VetId).uuid().null())
                    .col(
                        ColumnDef::new(Pets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pets::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_owner_id")
                            .from(Pets::Table, Pets::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_vet_id")
                            .from(Pets::Table, Pets::VetId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_owner_id")
                    .table(Pets::Table)
                    .col(Pets::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_vet_id")
                    .table(Pets::Table)
                    .col(Pets::VetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_deleted_at")
                    .table(Pets::Table)
                    .col(Pets::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Pets {
    Table,
    Id,
    Name,
    DateOfBirth,
    Gender,
    BreedName,
    Colors,
    Description,
    Pedigree,
    Microchip,
    Avatar,
    Metas,
    OwnerId,
    VetId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
