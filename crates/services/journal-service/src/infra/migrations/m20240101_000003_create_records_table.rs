//! Migration: Create records table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_pets_table::Pets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Records::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Records::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Records::PetId).uuid().not_null())
                    .col(ColumnDef::new(Records::RecordType).string_len(32).not_null())
                    .col(ColumnDef::new(Records::Name).string().not_null())
                    .col(
                        ColumnDef::new(Records::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Records::Lot).string().null())
                    .col(ColumnDef::new(Records::Result).string().null())
                    .col(ColumnDef::new(Records::Description).text().null())
                    .col(ColumnDef::new(Records::Notes).text().null())
                    .col(ColumnDef::new(Records::AdministeredBy).uuid().null())
                    .col(ColumnDef::new(Records::VerifiedBy).uuid().null())
                    .col(ColumnDef::new(Records::GroupId).uuid().null())
                    .col(
                        ColumnDef::new(Records::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Records::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Records::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_records_pet_id")
                            .from(Records::Table, Records::PetId)
                            .to(Pets::Table, Pets::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_records_administered_by")
                            .from(Records::Table, Records::AdministeredBy)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_records_verified_by")
                            .from(Records::Table, Records::VerifiedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_records_pet_id")
                    .table(Records::Table)
                    .col(Records::PetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_records_group_id")
                    .table(Records::Table)
                    .col(Records::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_records_deleted_at")
                    .table(Records::Table)
                    .col(Records::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Records::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Records {
    Table,
    Id,
    PetId,
    RecordType,
    Name,
    Date,
    Lot,
    Result,
    Description,
    Notes,
    AdministeredBy,
    VerifiedBy,
    GroupId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
