use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    validation::{FieldKind, validate_required, validate_type},
};

fn default_in_stock() -> bool {
    true
}

/// Every text field is optional at the type level so that a missing or
/// null value reaches the validators instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "imageAlt")]
    pub image_alt: Option<String>,
    #[serde(rename = "inStock", default = "default_in_stock")]
    pub in_stock: bool,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        image_url: impl Into<String>,
        image_alt: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            price: Some(price.into()),
            image_url: Some(image_url.into()),
            image_alt: Some(image_alt.into()),
            in_stock: true,
        }
    }
}

/// Partial update: `None` leaves the column alone, `Some` goes through the setter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "imageAlt")]
    pub image_alt: Option<String>,
    #[serde(rename = "inStock")]
    pub in_stock: Option<bool>,
}

/// Item/category link taken from an untyped payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCategoryLink {
    pub item_id: i32,
    pub category_id: i32,
}

impl ItemCategoryLink {
    pub fn new(item_id: Option<i32>, category_id: Option<i32>) -> AppResult<Self> {
        Ok(Self {
            item_id: validate_required(item_id, "item_id")?,
            category_id: validate_required(category_id, "category_id")?,
        })
    }

    pub fn from_json(payload: &Value) -> AppResult<Self> {
        Ok(Self {
            item_id: id_field(payload, "item_id")?,
            category_id: id_field(payload, "category_id")?,
        })
    }
}

static NULL: Value = Value::Null;

fn id_field(payload: &Value, key: &str) -> AppResult<i32> {
    let value = validate_type(payload.get(key).unwrap_or(&NULL), key, FieldKind::Integer)?;
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| AppError::invalid(key, format!("{key} is out of range.")))
}
