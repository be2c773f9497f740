use serde_json::json;
use storefront_models::{
    config::AppConfig,
    dto::{catalog::NewItem, orders::CreateOrderRequest, users::RegisterRequest},
    models::{Category, Item, User},
    services::{category_service, item_service, order_service, user_service},
    state::AppState,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = AppConfig::from_env()?;
    let state = AppState::connect(&config).await?;

    let categories = ensure_categories(&state, &["Apparel", "Kitchen", "Books"]).await?;
    let items = seed_items(&state).await?;

    // (item index, category index)
    let links = [(0, 0), (1, 1), (2, 0), (3, 2)];
    for (item, category) in links {
        item_service::assign_category_from_json(
            &state,
            &json!({ "item_id": items[item].id, "category_id": categories[category].id }),
        )
        .await?;
    }

    let user = ensure_user(&state, "user@example.com", "user123").await?;
    let order = order_service::create_order(
        &state,
        CreateOrderRequest {
            user_id: Some(user.id),
            item_ids: vec![items[0].id, items[1].id],
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        order_id = order.order.id,
        items = items.len(),
        categories = categories.len(),
        "seed completed"
    );
    Ok(())
}

async fn ensure_categories(state: &AppState, names: &[&str]) -> anyhow::Result<Vec<Category>> {
    let existing = category_service::list_categories(state).await?;
    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        let category = match existing.iter().find(|c| c.name == *name) {
            Some(c) => c.clone(),
            None => category_service::create_category(state, Some(name.to_string())).await?,
        };
        categories.push(category);
    }
    Ok(categories)
}

async fn seed_items(state: &AppState) -> anyhow::Result<Vec<Item>> {
    let existing = item_service::list_items(state, false).await?;
    if existing.len() >= 4 {
        tracing::info!(count = existing.len(), "catalog already seeded");
        return Ok(existing);
    }

    let catalog = vec![
        NewItem::new(
            "Ferris Hoodie",
            "Warm hoodie for Rustaceans",
            "55.00",
            "/images/hoodie.png",
            "Orange hoodie with a crab on the front",
        ),
        NewItem::new(
            "Ferris Mug",
            "Coffee tastes better with Ferris",
            "12.00",
            "/images/mug.png",
            "White mug with a crab print",
        ),
        NewItem::new(
            "Sticker Pack",
            "Decorate your laptop",
            "5.00",
            "/images/stickers.png",
            "Assorted stickers",
        ),
        NewItem::new(
            "Async Patterns",
            "Paperback on async programming patterns",
            "25.00",
            "/images/book.png",
            "Book cover",
        ),
    ];

    let mut items = Vec::with_capacity(catalog.len());
    for payload in catalog {
        items.push(item_service::create_item(state, payload).await?);
    }
    Ok(items)
}

async fn ensure_user(state: &AppState, email: &str, password: &str) -> anyhow::Result<User> {
    if let Some(user) = user_service::find_by_email(state, email).await? {
        tracing::info!(user_id = user.id, "user already present");
        return Ok(user);
    }

    let user = user_service::register_user(
        state,
        RegisterRequest {
            firstname: Some("Demo".into()),
            lastname: Some("Shopper".into()),
            email: email.to_string(),
            password: password.to_string(),
            address: Some("1 Harbor Way".into()),
            city: Some("Portland".into()),
            state: Some("OR".into()),
            zip: Some("97201".into()),
        },
    )
    .await?;
    Ok(user)
}
