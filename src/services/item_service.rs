use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use serde_json::Value;

use crate::{
    dto::catalog::{ItemCategoryLink, ItemChanges, NewItem},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        item_categories::{ActiveModel as LinkActive, Column as LinkCol, Entity as ItemCategories},
        items::{ActiveModel, Column, Entity as Items, Model as ItemModel},
        order_details::{Column as DetailCol, Entity as OrderDetails},
    },
    error::{AppError, AppResult},
    models::{Category, Item, ItemCategory},
    state::AppState,
};

pub async fn create_item(state: &AppState, payload: NewItem) -> AppResult<Item> {
    let mut active = ActiveModel {
        id: NotSet,
        ..Default::default()
    };
    active.set_name(payload.name)?;
    active.set_description(payload.description)?;
    active.set_price(payload.price)?;
    active.set_image_url(payload.image_url)?;
    active.set_image_alt(payload.image_alt)?;
    active.set_in_stock(payload.in_stock);

    let item = active.insert(&state.orm).await?;
    tracing::info!(item_id = item.id, name = %item.name, "item created");
    Ok(item.into())
}

pub async fn get_item(state: &AppState, id: i32) -> AppResult<Item> {
    find_item(&state.orm, id).await.map(Item::from)
}

pub async fn list_items(state: &AppState, in_stock_only: bool) -> AppResult<Vec<Item>> {
    let mut finder = Items::find();
    if in_stock_only {
        finder = finder.filter(Column::InStock.eq(true));
    }
    let items = finder
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Item::from)
        .collect();
    Ok(items)
}

pub async fn update_item(state: &AppState, id: i32, payload: ItemChanges) -> AppResult<Item> {
    let existing = find_item(&state.orm, id).await?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.set_name(Some(name))?;
    }
    if let Some(description) = payload.description {
        active.set_description(Some(description))?;
    }
    if let Some(price) = payload.price {
        active.set_price(Some(price))?;
    }
    if let Some(image_url) = payload.image_url {
        active.set_image_url(Some(image_url))?;
    }
    if let Some(image_alt) = payload.image_alt {
        active.set_image_alt(Some(image_alt))?;
    }
    if let Some(in_stock) = payload.in_stock {
        active.set_in_stock(in_stock);
    }

    if !active.is_changed() {
        return Ok(existing.into());
    }

    let item = active.update(&state.orm).await?;
    tracing::info!(item_id = item.id, "item updated");
    Ok(item.into())
}

/// Removes the item together with its category links. Items that appear on
/// an order are kept.
pub async fn delete_item(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let item = find_item(&txn, id).await?;

    let ordered = OrderDetails::find()
        .filter(DetailCol::ItemId.eq(id))
        .count(&txn)
        .await?;
    if ordered > 0 {
        return Err(AppError::Conflict(format!(
            "Item {id} is referenced by {ordered} order line(s)."
        )));
    }

    let links = ItemCategories::delete_many()
        .filter(LinkCol::ItemId.eq(id))
        .exec(&txn)
        .await?;
    item.delete(&txn).await?;

    txn.commit().await?;
    tracing::info!(item_id = id, links = links.rows_affected, "item deleted");
    Ok(())
}

/// Links an item to a category. Both ids are required; linking twice is a no-op.
pub async fn assign_category(
    state: &AppState,
    item_id: Option<i32>,
    category_id: Option<i32>,
) -> AppResult<ItemCategory> {
    let ItemCategoryLink {
        item_id,
        category_id,
    } = ItemCategoryLink::new(item_id, category_id)?;

    find_item(&state.orm, item_id).await?;
    if Categories::find_by_id(category_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let existing = ItemCategories::find()
        .filter(
            Condition::all()
                .add(LinkCol::ItemId.eq(item_id))
                .add(LinkCol::CategoryId.eq(category_id)),
        )
        .one(&state.orm)
        .await?;
    if let Some(link) = existing {
        return Ok(link.into());
    }

    let link = LinkActive {
        id: NotSet,
        item_id: Set(item_id),
        category_id: Set(category_id),
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(item_id, category_id, "category assigned");
    Ok(link.into())
}

/// Same as [`assign_category`], for links arriving as JSON such as seed files.
pub async fn assign_category_from_json(
    state: &AppState,
    payload: &Value,
) -> AppResult<ItemCategory> {
    let link = ItemCategoryLink::from_json(payload)?;
    assign_category(state, Some(link.item_id), Some(link.category_id)).await
}

pub async fn unassign_category(state: &AppState, item_id: i32, category_id: i32) -> AppResult<()> {
    let result = ItemCategories::delete_many()
        .filter(
            Condition::all()
                .add(LinkCol::ItemId.eq(item_id))
                .add(LinkCol::CategoryId.eq(category_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(item_id, category_id, "category unassigned");
    Ok(())
}

pub async fn categories_of_item(state: &AppState, item_id: i32) -> AppResult<Vec<Category>> {
    let item = find_item(&state.orm, item_id).await?;
    let categories: Vec<CategoryModel> = item
        .find_related(Categories)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?;
    tracing::debug!(item_id, count = categories.len(), "categories of item");
    Ok(categories.into_iter().map(Category::from).collect())
}

pub(crate) async fn find_item<C>(db: &C, id: i32) -> AppResult<ItemModel>
where
    C: ConnectionTrait,
{
    Items::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
}
