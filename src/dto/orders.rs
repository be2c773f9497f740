use serde::{Deserialize, Serialize};

use crate::models::{Item, Order, User};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: Option<i32>,
    #[serde(default)]
    pub item_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub user: User,
    pub items: Vec<Item>,
}
