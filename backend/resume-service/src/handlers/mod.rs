/// HTTP handlers for resume-service
///
/// - Resumes: hot list, paginated listing, CRUD, likes
/// - Comments: threaded comments, replies and votes
///
/// Routes are mounted under `/api/v1` by the binary.
pub mod comments;
pub mod resumes;

use actix_web::web;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::services::{HotRankingService, ListingService};

pub use comments::{
    create_comment, create_reply, delete_comment, list_replies, list_resume_comments,
    update_comment, vote_comment,
};
pub use resumes::{
    create_resume, delete_resume, get_resume, hot_resumes, list_resumes, my_resumes, toggle_like,
    update_resume,
};

/// Services behind the read-only resume feeds
#[derive(Clone)]
pub struct ResumeFeedState {
    pub hot_ranking: Arc<HotRankingService>,
    pub listing: Arc<ListingService>,
}

/// `{"error": "..."}` body returned for every failure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// `{"message": "..."}` body returned by deletions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON body errors rendered as `{"error": ...}` with status 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Unparseable path ids read as missing resources.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Resource not found".into()).into())
}

/// Read-only feed routes; they only need `ResumeFeedState`.
pub fn configure_feed_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/resumes", web::get().to(list_resumes))
        .route("/resumes/hot", web::get().to(hot_resumes));
}

/// Every API route. `/resumes/hot` and `/resumes/my` must be registered
/// before `/resumes/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_feed_routes(cfg);

    cfg.route("/resumes", web::post().to(create_resume))
        .route("/resumes/my", web::get().to(my_resumes))
        .service(
            web::resource("/resumes/{id}")
                .route(web::get().to(get_resume))
                .route(web::put().to(update_resume))
                .route(web::delete().to(delete_resume)),
        )
        .route("/resumes/{id}/like", web::post().to(toggle_like))
        .service(
            web::resource("/resumes/{id}/comments")
                .route(web::get().to(list_resume_comments))
                .route(web::post().to(create_comment)),
        )
        .service(
            web::resource("/comments/{id}")
                .route(web::put().to(update_comment))
                .route(web::delete().to(delete_comment)),
        )
        .service(
            web::resource("/comments/{id}/replies")
                .route(web::get().to(list_replies))
                .route(web::post().to(create_reply)),
        )
        .route("/comments/{id}/vote", web::post().to(vote_comment));
}
