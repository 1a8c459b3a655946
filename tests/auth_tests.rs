// tests/auth_tests.rs

use blog_api::{config::Config, routes, state::AppState};
use sqlx::postgres::PgPoolOptions;

async fn spawn_app() -> Option<String> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping integration test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "auth_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
    };

    let state = AppState::new(pool, config);
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await
        .unwrap();
    });

    Some(address)
}

fn unique_email() -> String {
    format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

#[tokio::test]
async fn register_works_and_hides_the_password() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email();

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": email,
            "password": "password123",
            "photo_url": "https://example.com/ada.png"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);

    let user: serde_json::Value = response.json().await.expect("Failed to parse user json");
    assert!(user["id"].as_i64().expect("id missing") > 0);
    assert_eq!(user["email"], serde_json::json!(email));
    assert!(
        user.as_object().unwrap().get("password").is_none(),
        "password must never be serialized"
    );
}

#[tokio::test]
async fn register_fails_validation() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    // Act: not an email address
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": "not-an-email",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn register_rejects_invalid_photo_url() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": unique_email(),
            "password": "password123",
            "photo_url": "definitely not a url"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn registering_the_same_email_twice_conflicts() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email();
    let payload = serde_json::json!({
        "name": "Ada Lovelace",
        "email": email,
        "password": "password123"
    });

    let first = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status().as_u16(), 201);

    // Act
    let second = client
        .post(&format!("{}/api/auth/register", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn login_returns_a_bearer_token() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");

    // Act
    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse login json");
    assert!(!body["token"].as_str().expect("token missing").is_empty());
    assert_eq!(body["type"], "Bearer");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let email = unique_email();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");

    // Act
    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": email,
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": unique_email(),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn writes_require_a_token() {
    // Arrange
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    // Act: a perfectly valid payload, but no Authorization header
    let response = client
        .post(&format!("{}/api/posts", address))
        .json(&serde_json::json!({
            "title": "My First Post",
            "body": "This is the content of my first post."
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 401);
}
