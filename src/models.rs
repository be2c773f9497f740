use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{categories, item_categories, items, order_details, orders, users},
    error::{AppError, AppResult},
    password::verify_password,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    #[serde(rename = "imageAlt")]
    pub image_alt: String,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

impl From<items::Model> for Item {
    fn from(model: items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            image_alt: model.image_alt,
            in_stock: model.in_stock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCategory {
    pub id: i32,
    pub item_id: i32,
    pub category_id: i32,
}

impl From<item_categories::Model> for ItemCategory {
    fn from(model: item_categories::Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            category_id: model.category_id,
        }
    }
}

/// A user as seen outside the data layer. The stored hash travels with it
/// so it can authenticate, but it is never serialized or handed out.
#[derive(Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub firstname: Option<String>,
    pub lastname: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(skip)]
    password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("zip", &self.zip)
            .finish_non_exhaustive()
    }
}

impl User {
    pub fn password_hash(&self) -> AppResult<&str> {
        Err(AppError::PasswordHashHidden)
    }

    pub fn authenticate(&self, plaintext: &str) -> bool {
        verify_password(plaintext, &self.password_hash)
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            firstname: model.firstname,
            lastname: model.lastname,
            email: model.email,
            address: model.address,
            city: model.city,
            state: model.state,
            zip: model.zip,
            password_hash: model.password_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i32,
    pub order_id: i32,
    pub item_id: i32,
}

impl From<order_details::Model> for OrderDetail {
    fn from(model: order_details::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            item_id: model.item_id,
        }
    }
}
