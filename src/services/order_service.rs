use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::orders::{CreateOrderRequest, OrderWithItems},
    entity::{
        items::Entity as Items,
        order_details::{ActiveModel as DetailActive, Column as DetailCol, Entity as OrderDetails},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{Item, Order, OrderDetail, User},
    services::item_service::find_item,
    state::AppState,
    validation::validate_required,
};

/// Creates the order and one order line per item id, all or nothing.
pub async fn create_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<OrderWithItems> {
    let user_id = validate_required(payload.user_id, "user_id")?;

    let txn = state.orm.begin().await?;

    let user = Users::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user.id),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<Item> = Vec::with_capacity(payload.item_ids.len());
    for item_id in &payload.item_ids {
        let item = insert_detail(&txn, order.id, *item_id).await?;
        items.push(item);
    }

    txn.commit().await?;
    tracing::info!(order_id = order.id, user_id, lines = items.len(), "order created");

    Ok(OrderWithItems {
        order: order.into(),
        user: user.into(),
        items,
    })
}

pub async fn add_item(state: &AppState, order_id: i32, item_id: i32) -> AppResult<OrderDetail> {
    let txn = state.orm.begin().await?;
    find_order(&txn, order_id).await?;
    find_item(&txn, item_id).await?;

    let detail = DetailActive {
        id: NotSet,
        order_id: Set(order_id),
        item_id: Set(item_id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(order_id, item_id, "order line added");
    Ok(detail.into())
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<OrderWithItems> {
    let order = find_order(&state.orm, id).await?;
    let user: User = order
        .find_related(Users)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?
        .into();
    let items = order_items(&state.orm, &order).await?;

    Ok(OrderWithItems {
        order: order.into(),
        user,
        items,
    })
}

pub async fn list_orders_for_user(state: &AppState, user_id: i32) -> AppResult<Vec<Order>> {
    if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_asc(OrderCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    Ok(orders)
}

pub async fn delete_order(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let order = find_order(&txn, id).await?;
    let details = OrderDetails::delete_many()
        .filter(DetailCol::OrderId.eq(id))
        .exec(&txn)
        .await?;
    order.delete(&txn).await?;

    txn.commit().await?;
    tracing::info!(order_id = id, order_details = details.rows_affected, "order deleted");
    Ok(())
}

async fn insert_detail<C>(db: &C, order_id: i32, item_id: i32) -> AppResult<Item>
where
    C: ConnectionTrait,
{
    let item = find_item(db, item_id).await?;
    DetailActive {
        id: NotSet,
        order_id: Set(order_id),
        item_id: Set(item.id),
    }
    .insert(db)
    .await?;
    Ok(item.into())
}

/// Items bought on the order, one entry per order line.
async fn order_items<C>(db: &C, order: &OrderModel) -> AppResult<Vec<Item>>
where
    C: ConnectionTrait,
{
    let items = order
        .find_related(Items)
        .order_by_asc(DetailCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Item::from)
        .collect();
    Ok(items)
}

async fn find_order<C>(db: &C, id: i32) -> AppResult<OrderModel>
where
    C: ConnectionTrait,
{
    Orders::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
}
