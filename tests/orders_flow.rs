mod common;

use storefront_models::{
    dto::orders::CreateOrderRequest,
    entity::{OrderDetails, Orders},
    error::AppError,
    services::{item_service, order_service, user_service},
};
use sea_orm::{EntityTrait, PaginatorTrait};

use common::{create_item, create_user, setup_state};

#[tokio::test]
async fn order_records_user_timestamp_and_items() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "ada@example.com").await?;
    let mug = create_item(&state, "Mug").await?;
    let hoodie = create_item(&state, "Hoodie").await?;

    let created = order_service::create_order(
        &state,
        CreateOrderRequest {
            user_id: Some(user.id),
            item_ids: vec![mug.id, hoodie.id, mug.id],
        },
    )
    .await?;
    assert_eq!(created.order.user_id, user.id);
    assert_eq!(created.items.len(), 3);

    let fetched = order_service::get_order(&state, created.order.id).await?;
    assert_eq!(fetched.user.id, user.id);
    assert_eq!(fetched.order.created_at, created.order.created_at);
    let names: Vec<&str> = fetched.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Mug", "Hoodie", "Mug"]);

    let detail = order_service::add_item(&state, created.order.id, hoodie.id).await?;
    assert_eq!(detail.order_id, created.order.id);
    assert_eq!(order_service::get_order(&state, created.order.id).await?.items.len(), 4);
    Ok(())
}

#[tokio::test]
async fn order_requires_user_and_known_items() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "ada@example.com").await?;
    let mug = create_item(&state, "Mug").await?;

    let err = order_service::create_order(
        &state,
        CreateOrderRequest {
            user_id: None,
            item_ids: vec![mug.id],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.field(), Some("user_id"));

    let err = order_service::create_order(
        &state,
        CreateOrderRequest {
            user_id: Some(user.id),
            item_ids: vec![mug.id, mug.id + 50],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    // Nothing from the failed order is left behind.
    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderDetails::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn deleting_user_removes_orders_and_details() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ada = create_user(&state, "ada@example.com").await?;
    let grace = create_user(&state, "grace@example.com").await?;
    let mug = create_item(&state, "Mug").await?;

    for _ in 0..2 {
        order_service::create_order(
            &state,
            CreateOrderRequest {
                user_id: Some(ada.id),
                item_ids: vec![mug.id, mug.id],
            },
        )
        .await?;
    }
    let kept = order_service::create_order(
        &state,
        CreateOrderRequest {
            user_id: Some(grace.id),
            item_ids: vec![mug.id],
        },
    )
    .await?;
    assert_eq!(order_service::list_orders_for_user(&state, ada.id).await?.len(), 2);

    user_service::delete_user(&state, ada.id).await?;

    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    assert_eq!(OrderDetails::find().count(&state.orm).await?, 1);
    assert!(matches!(
        order_service::list_orders_for_user(&state, ada.id).await,
        Err(AppError::NotFound)
    ));
    assert_eq!(order_service::get_order(&state, kept.order.id).await?.items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_order_removes_details_and_ordered_items_stay() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "ada@example.com").await?;
    let mug = create_item(&state, "Mug").await?;

    let order = order_service::create_order(
        &state,
        CreateOrderRequest {
            user_id: Some(user.id),
            item_ids: vec![mug.id],
        },
    )
    .await?;

    let err = item_service::delete_item(&state, mug.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    order_service::delete_order(&state, order.order.id).await?;
    assert_eq!(OrderDetails::find().count(&state.orm).await?, 0);

    item_service::delete_item(&state, mug.id).await?;
    Ok(())
}
