use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::users::{LoginRequest, RegisterRequest, UserChanges},
    entity::{
        order_details::{Column as DetailCol, Entity as OrderDetails},
        orders::{Column as OrderCol, Entity as Orders},
        users::{ActiveModel, Column, EMAIL_TAKEN, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    models::User,
    state::AppState,
};

pub async fn register_user(state: &AppState, payload: RegisterRequest) -> AppResult<User> {
    let RegisterRequest {
        firstname,
        lastname,
        email,
        password,
        address,
        city,
        state: region,
        zip,
    } = payload;

    let mut active = ActiveModel {
        id: NotSet,
        ..Default::default()
    };
    active.set_firstname(firstname);
    active.set_lastname(lastname)?;
    active.set_email(&state.orm, &email).await?;
    active.set_password(&password)?;
    active.set_address(address)?;
    active.set_city(city)?;
    active.set_state(region)?;
    active.set_zip(zip)?;

    let user = active
        .insert(&state.orm)
        .await
        .map_err(|err| AppError::unique_or(err, EMAIL_TAKEN))?;
    tracing::info!(user_id = user.id, "user registered");
    Ok(user.into())
}

pub async fn get_user(state: &AppState, id: i32) -> AppResult<User> {
    find_user(&state.orm, id).await.map(User::from)
}

pub async fn find_by_email(state: &AppState, email: &str) -> AppResult<Option<User>> {
    let user = Users::find()
        .filter(Column::Email.eq(email))
        .one(&state.orm)
        .await?
        .map(User::from);
    Ok(user)
}

pub async fn update_user(state: &AppState, id: i32, payload: UserChanges) -> AppResult<User> {
    let existing = find_user(&state.orm, id).await?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(firstname) = payload.firstname {
        active.set_firstname(firstname);
    }
    if let Some(lastname) = payload.lastname {
        active.set_lastname(Some(lastname))?;
    }
    if let Some(email) = payload.email {
        active.set_email(&state.orm, &email).await?;
    }
    if let Some(password) = payload.password {
        active.set_password(&password)?;
    }
    if let Some(address) = payload.address {
        active.set_address(Some(address))?;
    }
    if let Some(city) = payload.city {
        active.set_city(Some(city))?;
    }
    if let Some(region) = payload.state {
        active.set_state(Some(region))?;
    }
    if let Some(zip) = payload.zip {
        active.set_zip(Some(zip))?;
    }

    if !active.is_changed() {
        return Ok(existing.into());
    }

    let user = active
        .update(&state.orm)
        .await
        .map_err(|err| AppError::unique_or(err, EMAIL_TAKEN))?;
    tracing::info!(user_id = user.id, "user updated");
    Ok(user.into())
}

/// Looks the user up by email and checks the password. Unknown email and
/// wrong password are indistinguishable to the caller.
pub async fn authenticate(state: &AppState, payload: LoginRequest) -> AppResult<Option<User>> {
    let LoginRequest { email, password } = payload;
    let user = match find_by_email(state, &email).await? {
        Some(u) => u,
        None => {
            tracing::warn!("authentication rejected: unknown email");
            return Ok(None);
        }
    };

    if !user.authenticate(&password) {
        tracing::warn!(user_id = user.id, "authentication rejected: wrong password");
        return Ok(None);
    }

    tracing::debug!(user_id = user.id, "user authenticated");
    Ok(Some(user))
}

/// Deletes the user, their orders and the order lines of those orders.
pub async fn delete_user(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let user = find_user(&txn, id).await?;
    let order_ids: Vec<i32> = user
        .find_related(Orders)
        .all(&txn)
        .await?
        .into_iter()
        .map(|order| order.id)
        .collect();

    let details = OrderDetails::delete_many()
        .filter(DetailCol::OrderId.is_in(order_ids))
        .exec(&txn)
        .await?;
    let orders = Orders::delete_many()
        .filter(OrderCol::UserId.eq(id))
        .exec(&txn)
        .await?;
    user.delete(&txn).await?;

    txn.commit().await?;
    tracing::info!(
        user_id = id,
        orders = orders.rows_affected,
        order_details = details.rows_affected,
        "user deleted"
    );
    Ok(())
}

async fn find_user<C>(db: &C, id: i32) -> AppResult<UserModel>
where
    C: ConnectionTrait,
{
    Users::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
}
