//! Cake database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Cake;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cakes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub image: Option<String>,
    /// Assigned by the column default on insert
    pub created_at: DateTimeUtc,
    /// NULL until the first update
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Cake {
    fn from(model: Model) -> Self {
        Cake {
            id: model.id,
            title: model.title,
            description: model.description,
            rating: model.rating,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
