//! Post entity for SeaORM.
//!
//! Mirrors `Posts(Id INTEGER PRIMARY KEY, Title TEXT, Content TEXT)`. The text
//! columns carry no NOT NULL constraint, so they are optional here.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Posts")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "Id")]
    pub id: i64,
    #[sea_orm(column_name = "Title", column_type = "Text")]
    pub title: Option<String>,
    #[sea_orm(column_name = "Content", column_type = "Text")]
    pub content: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
