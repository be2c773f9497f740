#![allow(dead_code)]

use storefront_models::{
    config::AppConfig,
    dto::{catalog::NewItem, users::RegisterRequest},
    models::{Item, User},
    services::{item_service, user_service},
    state::AppState,
};

/// Fresh in-memory database with the schema in place.
pub async fn setup_state() -> anyhow::Result<AppState> {
    AppState::connect(&AppConfig::in_memory()).await
}

pub fn register_request(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        firstname: Some("Ada".into()),
        lastname: Some("Lovelace".into()),
        email: email.to_string(),
        password: password.to_string(),
        address: Some("12 Analytical Row".into()),
        city: Some("London".into()),
        state: Some("LDN".into()),
        zip: Some("10001".into()),
    }
}

pub async fn create_user(state: &AppState, email: &str) -> anyhow::Result<User> {
    Ok(user_service::register_user(state, register_request(email, "secret")).await?)
}

pub fn new_item(name: &str) -> NewItem {
    NewItem::new(
        name,
        format!("{name} description"),
        "9.99",
        format!("/images/{}.png", name.to_lowercase()),
        format!("Picture of {name}"),
    )
}

pub async fn create_item(state: &AppState, name: &str) -> anyhow::Result<Item> {
    Ok(item_service::create_item(state, new_item(name)).await?)
}
