use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Condition, Set};

use crate::{
    error::{AppError, AppResult},
    password::hash_password,
    validation::{validate_email, validate_not_blank},
};

pub const EMAIL_TAKEN: &str = "Email already exists. Please choose a different email.";

/// Row shape of `users`. The hash column is crate-private: outside the data
/// layer users are read through [`crate::models::User`], which never hands it out.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub firstname: Option<String>,
    pub lastname: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(column_name = "_password_hash")]
    pub(crate) password_hash: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Checks the address shape, then that no other user holds it.
    pub async fn set_email<C>(&mut self, db: &C, value: &str) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        validate_email(value)?;
        let mut condition = Condition::all().add(Column::Email.eq(value));
        if let ActiveValue::Set(id) | ActiveValue::Unchanged(id) = &self.id {
            condition = condition.add(Column::Id.ne(*id));
        }
        if Entity::find().filter(condition).one(db).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.into()));
        }
        self.email = Set(value.to_string());
        Ok(())
    }

    /// Stores only the hash; the plaintext is dropped here.
    pub fn set_password(&mut self, plaintext: &str) -> AppResult<()> {
        self.password_hash = Set(hash_password(plaintext)?);
        Ok(())
    }

    /// `None` clears the column.
    pub fn set_firstname(&mut self, value: Option<String>) {
        self.firstname = Set(value);
    }

    pub fn set_lastname(&mut self, value: Option<String>) -> AppResult<()> {
        self.lastname = Set(validate_not_blank(value, "lastname")?);
        Ok(())
    }

    pub fn set_address(&mut self, value: Option<String>) -> AppResult<()> {
        self.address = Set(validate_not_blank(value, "address")?);
        Ok(())
    }

    pub fn set_city(&mut self, value: Option<String>) -> AppResult<()> {
        self.city = Set(validate_not_blank(value, "city")?);
        Ok(())
    }

    pub fn set_state(&mut self, value: Option<String>) -> AppResult<()> {
        self.state = Set(validate_not_blank(value, "state")?);
        Ok(())
    }

    pub fn set_zip(&mut self, value: Option<String>) -> AppResult<()> {
        self.zip = Set(validate_not_blank(value, "zip")?);
        Ok(())
    }
}
