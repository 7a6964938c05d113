//! Customer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Customer, Password};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique among active rows (partial index)
    pub email: String,
    pub name: String,
    /// PHC-formatted password hash
    pub password: String,
    pub registered_at: i64,
    pub updated_at: Option<i64>,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Customer {
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
