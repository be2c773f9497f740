use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Condition, Set};

use crate::{
    error::{AppError, AppResult},
    validation::validate_not_blank,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_categories::Entity")]
    ItemCategories,
}

impl Related<super::item_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemCategories.def()
    }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_categories::Relation::Items.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_categories::Relation::Categories.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn name_taken(name: &str) -> String {
    format!("Category '{name}' already exists.")
}

impl ActiveModel {
    /// Non-blank, and not already used by another category.
    pub async fn set_name<C>(&mut self, db: &C, value: Option<String>) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        let name = validate_not_blank(value, "name")?;
        let mut condition = Condition::all().add(Column::Name.eq(name.as_str()));
        if let ActiveValue::Set(id) | ActiveValue::Unchanged(id) = &self.id {
            condition = condition.add(Column::Id.ne(*id));
        }
        if Entity::find().filter(condition).one(db).await?.is_some() {
            return Err(AppError::Conflict(name_taken(&name)));
        }
        self.name = Set(name);
        Ok(())
    }
}
