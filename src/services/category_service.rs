use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    entity::{
        categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel, name_taken},
        item_categories::{Column as LinkCol, Entity as ItemCategories},
        items::{Column as ItemCol, Entity as Items},
    },
    error::{AppError, AppResult},
    models::{Category, Item},
    state::AppState,
};

pub async fn create_category(state: &AppState, name: Option<String>) -> AppResult<Category> {
    let mut active = ActiveModel {
        id: NotSet,
        ..Default::default()
    };
    let taken = name.as_deref().map(name_taken).unwrap_or_default();
    active.set_name(&state.orm, name).await?;

    let category = active
        .insert(&state.orm)
        .await
        .map_err(|err| AppError::unique_or(err, taken))?;
    tracing::info!(category_id = category.id, name = %category.name, "category created");
    Ok(category.into())
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<Category> {
    find_category(&state.orm, id).await.map(Category::from)
}

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let categories = Categories::find()
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(categories)
}

pub async fn rename_category(state: &AppState, id: i32, name: Option<String>) -> AppResult<Category> {
    let existing = find_category(&state.orm, id).await?;

    let mut active: ActiveModel = existing.clone().into();
    let taken = name.as_deref().map(name_taken).unwrap_or_default();
    active.set_name(&state.orm, name).await?;
    if !active.is_changed() {
        return Ok(existing.into());
    }

    let category = active
        .update(&state.orm)
        .await
        .map_err(|err| AppError::unique_or(err, taken))?;
    tracing::info!(category_id = category.id, name = %category.name, "category renamed");
    Ok(category.into())
}

/// Deletes the category and every item link pointing at it. Items stay.
pub async fn delete_category(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let category = find_category(&txn, id).await?;
    let links = ItemCategories::delete_many()
        .filter(LinkCol::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    category.delete(&txn).await?;

    txn.commit().await?;
    tracing::info!(category_id = id, links = links.rows_affected, "category deleted");
    Ok(())
}

pub async fn items_in_category(state: &AppState, category_id: i32) -> AppResult<Vec<Item>> {
    let category = find_category(&state.orm, category_id).await?;
    let items = category
        .find_related(Items)
        .order_by_asc(ItemCol::Id)
        .all(&state.orm)
        .await?;
    tracing::debug!(category_id, count = items.len(), "items in category");
    Ok(items.into_iter().map(Item::from).collect())
}

async fn find_category<C>(db: &C, id: i32) -> AppResult<CategoryModel>
where
    C: ConnectionTrait,
{
    Categories::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}
