/// Resume Service Library
///
/// HTTP backend for Roastume: resume uploads, community likes, threaded
/// comments with votes, a paginated resume listing and the "hottest resumes"
/// ranking.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Database rows, ranking values and client-facing views
/// - `services`: Business logic (hot ranking, listing, CRUD rules)
/// - `db`: `ResumeStore` seam, sqlx repositories, pool and migrations
/// - `middleware`: JWT authentication and request metrics
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors and the `/metrics` handler
/// - `openapi`: OpenAPI document
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
