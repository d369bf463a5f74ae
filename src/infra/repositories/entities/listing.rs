//! Listing database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::user;
use crate::domain::Listing;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SellerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Seller,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach the seller's username, loaded alongside the row.
    pub fn into_listing(self, seller: Option<user::Model>) -> Listing {
        Listing {
            id: self.id,
            seller_id: self.seller_id,
            seller_username: seller.map(|s| s.username).unwrap_or_default(),
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
