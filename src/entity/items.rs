use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::{error::AppResult, validation::validate_not_blank};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: String,
    pub image_url: String,
    #[sea_orm(column_name = "imageAlt")]
    pub image_alt: String,
    #[sea_orm(column_name = "inStock", default_value = true)]
    pub in_stock: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_categories::Entity")]
    ItemCategories,
    #[sea_orm(has_many = "super::order_details::Entity")]
    OrderDetails,
}

impl Related<super::item_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemCategories.def()
    }
}

impl Related<super::order_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderDetails.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_categories::Relation::Items.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn set_name(&mut self, value: Option<String>) -> AppResult<()> {
        self.name = Set(validate_not_blank(value, "name")?);
        Ok(())
    }

    pub fn set_description(&mut self, value: Option<String>) -> AppResult<()> {
        self.description = Set(validate_not_blank(value, "description")?);
        Ok(())
    }

    pub fn set_price(&mut self, value: Option<String>) -> AppResult<()> {
        self.price = Set(validate_not_blank(value, "price")?);
        Ok(())
    }

    pub fn set_image_url(&mut self, value: Option<String>) -> AppResult<()> {
        self.image_url = Set(validate_not_blank(value, "image_url")?);
        Ok(())
    }

    pub fn set_image_alt(&mut self, value: Option<String>) -> AppResult<()> {
        self.image_alt = Set(validate_not_blank(value, "imageAlt")?);
        Ok(())
    }

    pub fn set_in_stock(&mut self, value: bool) {
        self.in_stock = Set(value);
    }
}
