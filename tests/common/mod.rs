use actix_web::{web, App};
use anyhow::Result;
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;

use wagebook::auth::Claims;
use wagebook::config::Config;
use wagebook::database::models::{User, WorkerInput, ADMIN_ROLE};
use wagebook::database::repositories::{
    MonthlyWageRepository, RoleRepository, UserRepository, WorkerRepository,
};
use wagebook::services::PayrollService;
use wagebook::{AppState, AuthService};

/// Isolated file-backed test database with the real migrations applied.
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_file: NamedTempFile,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let database_url = format!("sqlite:{}", temp_file.path().display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(TestDb {
            pool,
            _temp_file: temp_file,
        })
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: ":memory:".to_string(), // overridden by TestDb
        jwt_secret: "test_jwt_secret_key_for_testing_only".to_string(),
        jwt_expiration_days: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
    }
}

pub struct TestApp {
    pub db: TestDb,
    pub config: Config,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let db = TestDb::new().await?;
        let config = test_config();

        Ok(TestApp { db, config })
    }

    /// Build an Actix app mirroring the production route table. The factory
    /// holds only pool clones, so it must not capture `&self` (`use<>`):
    /// callers pass it straight to `init_service` by value.
    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let user_repository = UserRepository::new(self.db.pool.clone());
        let role_repository = RoleRepository::new(self.db.pool.clone());
        let worker_repository = WorkerRepository::new(self.db.pool.clone());
        let wage_repository = MonthlyWageRepository::new(self.db.pool.clone());
        let auth_service = AuthService::new(user_repository, self.config.clone());
        let payroll_service =
            PayrollService::new(worker_repository.clone(), wage_repository.clone());

        let app_state = web::Data::new(AppState { auth_service });
        let role_repo_data = web::Data::new(role_repository);
        let worker_repo_data = web::Data::new(worker_repository);
        let wage_repo_data = web::Data::new(wage_repository);
        let payroll_data = web::Data::new(payroll_service);
        let config_data = web::Data::new(self.config.clone());

        use wagebook::handlers::{admin, auth, wages, workers};

        App::new()
            .app_data(app_state)
            .app_data(role_repo_data)
            .app_data(worker_repo_data)
            .app_data(wage_repo_data)
            .app_data(payroll_data)
            .app_data(config_data)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/admin")
                            .route("/bootstrap", web::post().to(admin::bootstrap_admin))
                            .route("/status", web::get().to(admin::authorization_status)),
                    )
                    .service(
                        web::scope("/workers")
                            .route("", web::post().to(workers::create_worker))
                            .route("", web::get().to(workers::get_workers))
                            .route("/{id}", web::get().to(workers::get_worker))
                            .route("/{id}", web::put().to(workers::update_worker))
                            .route("/{id}", web::delete().to(workers::delete_worker)),
                    )
                    .service(
                        web::scope("/wages")
                            .route("", web::get().to(wages::get_monthly_wages))
                            .route("/summary", web::get().to(wages::get_payroll_summary))
                            .route("/{worker_id}", web::get().to(wages::get_worker_wage))
                            .route("/{worker_id}", web::put().to(wages::set_monthly_wage)),
                    ),
            )
    }

    /// Insert a user directly and return it with a valid token. No role is
    /// granted, so the account is authenticated but not authorized.
    pub async fn create_user(&self) -> Result<(User, String)> {
        let user_repo = UserRepository::new(self.db.pool.clone());
        let password_hash = bcrypt::hash("Test123!", 4)?;
        let user = User::new(SafeEmail().fake(), password_hash, Name().fake());
        let user = user_repo.create_user(&user).await?;
        let token = AuthHelper::create_test_token(&user, &self.config)?;

        Ok((user, token))
    }

    /// Insert a user with the admin role granted.
    pub async fn create_admin(&self) -> Result<(User, String)> {
        let (user, token) = self.create_user().await?;
        let role_repo = RoleRepository::new(self.db.pool.clone());
        role_repo.grant(&user.id, ADMIN_ROLE).await?;

        Ok((user, token))
    }
}

pub struct AuthHelper;

impl AuthHelper {
    pub fn create_test_token(user: &User, config: &Config) -> Result<String> {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            exp: (Utc::now() + chrono::Duration::hours(24)).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .map_err(|e| anyhow::anyhow!("Failed to create test token: {}", e))
    }

    pub fn auth_header(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }
}

/// Mock data generators using the fake crate
pub struct MockData;

impl MockData {
    pub fn worker() -> WorkerInput {
        WorkerInput {
            name: Name().fake(),
            base_salary: (10000.0..50000.0).fake(),
            shift_hours: 8,
            overtime_rate_per_hour: (50.0..200.0).fake(),
        }
    }

}

/// Test assertion helpers
pub struct TestAssertions;

impl TestAssertions {
    /// Assert the envelope reports success and return its `data` payload.
    pub fn assert_success_response(body: &[u8]) -> serde_json::Value {
        let response: serde_json::Value =
            serde_json::from_slice(body).expect("Response should be valid JSON");

        assert_eq!(
            response["success"], true,
            "Expected successful response, got: {}",
            response
        );
        response["data"].clone()
    }

    pub fn assert_error_response(body: &[u8]) {
        let response: serde_json::Value =
            serde_json::from_slice(body).expect("Response should be valid JSON");

        assert_eq!(response["success"], false, "Response should be an error");
        assert!(
            response["message"].is_string(),
            "Error should carry a message"
        );
    }

    pub async fn assert_record_count(pool: &SqlitePool, table: &str, expected_count: i64) {
        let query = format!("SELECT COUNT(*) FROM {}", table);
        let result = sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(pool)
            .await
            .expect("Failed to count records");

        assert_eq!(
            result, expected_count,
            "Expected {} records in {} table, but found {}",
            expected_count, table, result
        );
    }
}
