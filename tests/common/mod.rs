use axum_test::TestServer;
use serde_json::json;

use greenwork_api::config::DbPool;
use greenwork_api::services::jwt::JwtService;

#[allow(dead_code)]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub db: DbPool,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory
        // database for the lifetime of the test.
        let db = sqlx::sqlite::SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let jwt_service = JwtService::new(TEST_JWT_SECRET.to_string());
        let app = greenwork_api::create_app(db.clone(), jwt_service).await;
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, db }
    }

    /// Register a user through the API; returns (access_token, user_id).
    pub async fn register_user(&self, email: &str) -> (String, String) {
        let response = self
            .server
            .post("/api/register")
            .json(&json!({
                "email": email,
                "password": test_password(),
                "first_name": "Test",
                "last_name": "User"
            }))
            .await;

        let body: serde_json::Value = response.json();
        (
            body["access_token"].as_str().expect("access_token").to_string(),
            body["user"]["id"].as_str().expect("user id").to_string(),
        )
    }

    /// The registration endpoint honors a caller-supplied role, so an admin
    /// is just a registration with role=admin.
    pub async fn register_admin(&self, email: &str) -> (String, String) {
        let response = self
            .server
            .post("/api/register")
            .json(&json!({
                "email": email,
                "password": test_password(),
                "first_name": "Admin",
                "last_name": "User",
                "role": "admin"
            }))
            .await;

        let body: serde_json::Value = response.json();
        (
            body["access_token"].as_str().expect("access_token").to_string(),
            body["user"]["id"].as_str().expect("user id").to_string(),
        )
    }

    /// A company owned by a fresh user; returns (owner_token, owner_id, company_id).
    pub async fn create_company(&self) -> (String, String, String) {
        let (token, user_id) = self.register_user(&test_email()).await;

        let response = self
            .server
            .post("/api/companies")
            .authorization_bearer(&token)
            .json(&json!({
                "user_id": &user_id,
                "name": "Greenwork Offices",
                "email": test_email()
            }))
            .await;

        let body: serde_json::Value = response.json();
        let company_id = body["company"]["id"].as_str().expect("company id").to_string();

        (token, user_id, company_id)
    }

    /// A bookable room with its owning user; returns (user_id, room_id).
    pub async fn create_room(&self) -> (String, String) {
        let (_token, user_id, company_id) = self.create_company().await;

        let response = self
            .server
            .post("/api/rooms")
            .json(&json!({
                "company_id": &company_id,
                "name": "Meeting Room A",
                "capacity": 10
            }))
            .await;

        let body: serde_json::Value = response.json();
        let room_id = body["room"]["id"].as_str().expect("room id").to_string();

        (user_id, room_id)
    }
}

// Helper to generate unique test email
#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

// Helper to generate test password
#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}
