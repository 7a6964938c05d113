//! Seller database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Password, Seller};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password: String,
    pub registered_at: i64,
    pub updated_at: Option<i64>,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Seller {
    fn from(model: Model) -> Self {
        Seller {
            id: model.id,
            email: model.email,
            name: model.name,
            password: Password::from_hash(model.password),
            registered_at: model.registered_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
