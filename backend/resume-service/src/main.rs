use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use chrono::Utc;
use resume_service::config::Config;
use resume_service::db::{self, PgResumeStore, ResumeStore};
use resume_service::handlers::{self, ResumeFeedState};
use resume_service::middleware::{self, TokenValidator};
use resume_service::openapi::ApiDoc;
use resume_service::services::{HotRankingService, ListingService};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: PgPool,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "resume-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "resume-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();

    let start = Instant::now();
    let pg_result = state.check_postgres().await;
    let pg_latency = Some(start.elapsed().as_millis() as u64);
    let ready = pg_result.is_ok();
    let postgres_check = match pg_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms: pg_latency,
        },
        Err(e) => ComponentCheck {
            status: ComponentStatus::Unhealthy,
            message: format!("PostgreSQL connection failed: {}", e),
            latency_ms: pg_latency,
        },
    };
    checks.insert("postgresql".to_string(), postgres_check);

    let status = if ready {
        ComponentStatus::Healthy
    } else {
        ComponentStatus::Unhealthy
    };

    let response = ReadinessResponse {
        ready,
        status,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn init_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = db::create_pool(&config.database)
        .await
        .context("failed to create database pool")?;

    if config.database.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("failed to run database migrations")?;
    }

    Ok(pool)
}

/// Resume Service
///
/// # Routes
///
/// - `/api/v1/resumes` - paginated listing, creation
/// - `/api/v1/resumes/hot` - hottest resumes by likes + comments
/// - `/api/v1/resumes/{id}` - read, update, delete, like, comments
/// - `/api/v1/comments/{id}` - edit, delete, replies, votes
/// - `/api/v1/health*`, `/metrics`, `/swagger-ui/`
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Container healthchecks: `resume-service healthcheck`
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" {
                let port = std::env::var("RESUME_SERVICE_PORT").unwrap_or_else(|_| "8080".into());
                let url = format!("http://127.0.0.1:{}/api/v1/health", port);
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"));
                    }
                }
            }
        }
    }

    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_tracing(config.as_ref().map(|c| c.app.json_logs).unwrap_or(false));

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting resume-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    if config.auth.jwt_secret.is_empty() {
        tracing::warn!("AUTH_JWT_SECRET not configured; every bearer token will be refused and writes will return 401");
    }

    let db_pool = match init_database(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database initialization failed: {:#}", e);
            eprintln!("ERROR: Failed to initialize database: {:#}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn ResumeStore> = Arc::new(PgResumeStore::new(db_pool.clone()));
    let feed_state = web::Data::new(ResumeFeedState {
        hot_ranking: Arc::new(HotRankingService::new(
            store.clone(),
            config.ranking.chunk_size,
        )),
        listing: Arc::new(ListingService::new(store)),
    });
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });
    let presentation = web::Data::new(config.presentation.clone());
    let token_validator = Arc::new(TokenValidator::new(&config.auth));

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);
    tracing::info!(
        "Hot ranking chunk size: {}, workers: {}",
        config.ranking.chunk_size,
        config.app.workers
    );

    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin.is_empty() {
                continue;
            }
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), openapi_doc.clone()),
            )
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(feed_state.clone())
            .app_data(health_state.clone())
            .app_data(presentation.clone())
            .app_data(handlers::json_config())
            .app_data(handlers::path_config())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(
                "/metrics",
                web::get().to(resume_service::metrics::serve_metrics),
            )
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .wrap(middleware::JwtAuthMiddleware::new(token_validator.clone()))
                    .wrap(middleware::MetricsMiddleware)
                    .configure(handlers::configure_routes),
            )
    })
    .bind(&http_bind_address)?
    .workers(config.app.workers)
    .run();

    let server_handle = server.handle();

    let mut tasks: JoinSet<io::Result<()>> = JoinSet::new();
    tasks.spawn(async move {
        tracing::info!("HTTP server is running");
        server.await
    });

    let mut first_error: Option<io::Error> = None;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = tasks.join_next() => {
                match result {
                    Some(Ok(Ok(_))) => {
                        tracing::info!("HTTP server stopped");
                    }
                    Some(Ok(Err(e))) => {
                        tracing::error!("HTTP server returned error: {}", e);
                        first_error.get_or_insert(e);
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::error!("Task join error: {}", e);
                        first_error.get_or_insert(io::Error::new(io::ErrorKind::Other, e.to_string()));
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                server_handle.stop(true).await;
                tasks.shutdown().await;
                break;
            }
        }
    }

    tracing::info!("Resume-service shutting down");

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
