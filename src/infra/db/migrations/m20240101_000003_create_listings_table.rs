//! Migration: Create listings table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use crate::config::{MAX_LISTING_NAME_LENGTH, MAX_URL_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Listings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Listings::SellerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Listings::Name)
                            .string_len(MAX_LISTING_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Listings::Description).text().not_null())
                    .col(ColumnDef::new(Listings::PriceCents).big_integer().null())
                    .col(ColumnDef::new(Listings::ImageUrl).string_len(MAX_URL_LENGTH).null())
                    .col(
                        ColumnDef::new(Listings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Listings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_seller_id")
                            .from(Listings::Table, Listings::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_seller_id")
                    .table(Listings::Table)
                    .col(Listings::SellerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Listings {
    Table,
    Id,
    SellerId,
    Name,
    Description,
    PriceCents,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
