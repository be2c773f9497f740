mod common;

use storefront_models::{
    config::AppConfig,
    dto::users::{LoginRequest, RegisterRequest, UserChanges},
    entity::users::EMAIL_TAKEN,
    error::AppError,
    services::user_service,
    state::AppState,
};
use sea_orm::{ConnectionTrait, DbBackend, Statement};

use common::{create_user, register_request, setup_state};

#[tokio::test]
async fn email_format_is_checked() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let user = user_service::register_user(&state, register_request("a@b.com", "secret")).await?;
    assert_eq!(user.email, "a@b.com");

    let err = user_service::register_user(&state, register_request("not-an-email", "secret"))
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("email"));
    assert_eq!(err.to_string(), "Invalid email address.");
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected_but_self_update_is_allowed() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let ada = create_user(&state, "ada@example.com").await?;
    let grace = create_user(&state, "grace@example.com").await?;

    let err = user_service::register_user(&state, register_request("ada@example.com", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(
        err.to_string(),
        "Email already exists. Please choose a different email."
    );

    let err = user_service::update_user(
        &state,
        grace.id,
        UserChanges {
            email: Some("ada@example.com".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let same = user_service::update_user(
        &state,
        ada.id,
        UserChanges {
            email: Some("ada@example.com".into()),
            city: Some("Cambridge".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(same.city, "Cambridge");
    Ok(())
}

#[tokio::test]
async fn required_profile_fields_reject_blank_values() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let cases: Vec<(&str, RegisterRequest)> = vec![
        ("lastname", RegisterRequest { lastname: None, ..register_request("x@y.com", "pw") }),
        ("address", RegisterRequest { address: Some("".into()), ..register_request("x@y.com", "pw") }),
        ("city", RegisterRequest { city: Some("  ".into()), ..register_request("x@y.com", "pw") }),
        ("state", RegisterRequest { state: None, ..register_request("x@y.com", "pw") }),
        ("zip", RegisterRequest { zip: Some("".into()), ..register_request("x@y.com", "pw") }),
    ];
    for (field, payload) in cases {
        let err = user_service::register_user(&state, payload).await.unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    let user = user_service::register_user(
        &state,
        RegisterRequest {
            firstname: None,
            ..register_request("x@y.com", "pw")
        },
    )
    .await?;
    assert_eq!(user.firstname, None);
    Ok(())
}

#[tokio::test]
async fn password_hash_is_write_only() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "ada@example.com").await?;

    assert!(matches!(user.password_hash(), Err(AppError::PasswordHashHidden)));
    assert!(user.authenticate("secret"));
    assert!(!user.authenticate("wrong"));

    let row = state
        .orm
        .query_one(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT _password_hash AS hash FROM users WHERE id = ?",
            [user.id.into()],
        ))
        .await?
        .expect("user row");
    let stored: String = row.try_get("", "hash")?;
    assert_ne!(stored, "secret");
    assert!(stored.starts_with("$argon2"));

    let value = serde_json::to_value(&user)?;
    assert!(value.get("password_hash").is_none());
    assert!(value.get("_password_hash").is_none());
    assert!(!format!("{user:?}").contains(&stored));
    Ok(())
}

#[tokio::test]
async fn authenticate_by_email_and_change_password() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "ada@example.com").await?;

    let login = |password: &str| LoginRequest {
        email: "ada@example.com".into(),
        password: password.into(),
    };

    let found = user_service::authenticate(&state, login("secret")).await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(user_service::authenticate(&state, login("wrong")).await?.is_none());
    assert!(
        user_service::authenticate(
            &state,
            LoginRequest {
                email: "nobody@example.com".into(),
                password: "secret".into(),
            },
        )
        .await?
        .is_none()
    );

    user_service::update_user(
        &state,
        user.id,
        UserChanges {
            password: Some("n3w-secret".into()),
            ..Default::default()
        },
    )
    .await?;
    assert!(user_service::authenticate(&state, login("secret")).await?.is_none());
    assert!(user_service::authenticate(&state, login("n3w-secret")).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn racing_registrations_with_one_email_yield_one_user_and_a_conflict() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = AppConfig {
        database_url: format!("sqlite://{}?mode=rwc", dir.path().join("race.db").display()),
        max_connections: 5,
        sql_logging: false,
    };
    let state = AppState::connect(&config).await?;

    for round in 0..10 {
        let email = format!("racer{round}@example.com");
        let (first, second) = tokio::join!(
            user_service::register_user(&state, register_request(&email, "secret")),
            user_service::register_user(&state, register_request(&email, "secret")),
        );

        let (created, rejected) = match (first, second) {
            (Ok(user), Err(err)) | (Err(err), Ok(user)) => (user, err),
            (first, second) => panic!("round {round}: expected one winner, got {first:?} / {second:?}"),
        };
        assert_eq!(created.email, email);
        assert!(
            matches!(&rejected, AppError::Conflict(message) if message == EMAIL_TAKEN),
            "round {round}: {rejected:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn firstname_can_be_cleared_and_absent_keys_are_left_alone() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = create_user(&state, "ada@example.com").await?;
    assert_eq!(user.firstname.as_deref(), Some("Ada"));

    let untouched: UserChanges = serde_json::from_str(r#"{ "city": "Cambridge" }"#)?;
    assert_eq!(untouched.firstname, None);
    let user = user_service::update_user(&state, user.id, untouched).await?;
    assert_eq!(user.firstname.as_deref(), Some("Ada"));

    let cleared: UserChanges = serde_json::from_str(r#"{ "firstname": null }"#)?;
    assert_eq!(cleared.firstname, Some(None));
    let user = user_service::update_user(&state, user.id, cleared).await?;
    assert_eq!(user.firstname, None);
    assert_eq!(user_service::get_user(&state, user.id).await?.firstname, None);

    let user = user_service::update_user(
        &state,
        user.id,
        UserChanges {
            firstname: Some(Some("Augusta".into())),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(user.firstname.as_deref(), Some("Augusta"));
    Ok(())
}
