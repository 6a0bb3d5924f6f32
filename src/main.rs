use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use wagebook::database::{
    init_database,
    repositories::{MonthlyWageRepository, RoleRepository, UserRepository, WorkerRepository},
};
use wagebook::handlers::{admin, auth, wages, workers};
use wagebook::middleware::RequestId;
use wagebook::services::PayrollService;
use wagebook::{AppState, AuthService, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Wagebook API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "Starting Wagebook API server (environment: {})",
        config.environment
    );

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    // Initialize repositories and services
    let user_repository = UserRepository::new(pool.clone());
    let role_repository = RoleRepository::new(pool.clone());
    let worker_repository = WorkerRepository::new(pool.clone());
    let wage_repository = MonthlyWageRepository::new(pool.clone());
    let auth_service = AuthService::new(user_repository.clone(), config.clone());
    let payroll_service =
        PayrollService::new(worker_repository.clone(), wage_repository.clone());

    let app_state = web::Data::new(AppState { auth_service });
    let role_repo_data = web::Data::new(role_repository);
    let worker_repo_data = web::Data::new(worker_repository);
    let wage_repo_data = web::Data::new(wage_repository);
    let payroll_data = web::Data::new(payroll_service);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(role_repo_data.clone())
            .app_data(worker_repo_data.clone())
            .app_data(wage_repo_data.clone())
            .app_data(payroll_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
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
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
