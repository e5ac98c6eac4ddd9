/// Comment handlers - threaded comments, replies and votes
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::PresentationConfig;
use crate::error::{AppError, Result};
use crate::handlers::{ErrorResponse, MessageResponse};
use crate::middleware::AuthUser;
use crate::models::{CommentRecord, CommentView, VoteOutcome, VoteType};
use crate::services::{CommentService, CommentThread, VoteService};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub vote_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentListResponse {
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub comment: CommentView,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReplyListResponse {
    pub replies: Vec<CommentView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReplyResponse {
    pub reply: CommentView,
}

fn view(record: CommentRecord, presentation: &PresentationConfig) -> CommentView {
    CommentView::from_record(record, &presentation.default_avatar)
}

fn thread_view(thread: CommentThread, presentation: &PresentationConfig) -> CommentView {
    let replies = thread
        .replies
        .into_iter()
        .map(|reply| view(reply, presentation))
        .collect();
    view(thread.comment, presentation).with_replies(replies)
}

/// Top-level comments of a resume with their replies
#[utoipa::path(
    get,
    path = "/api/v1/resumes/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Comments oldest first", body = CommentListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_resume_comments(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let threads = service
        .list_for_resume(*resume_id)
        .await
        .map_err(|e| e.masked("Failed to fetch comments"))?;

    let comments = threads
        .into_iter()
        .map(|thread| thread_view(thread, &presentation))
        .collect();

    Ok(HttpResponse::Ok().json(CommentListResponse { comments }))
}

/// Comment on a resume
#[utoipa::path(
    post,
    path = "/api/v1/resumes/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Resume ID")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Missing text", body = ErrorResponse),
        (status = 404, description = "Resume not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    user: AuthUser,
    resume_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(*resume_id, &user, &req.text)
        .await
        .map_err(|e| e.masked("Failed to create comment"))?;

    Ok(HttpResponse::Created().json(CommentResponse {
        comment: view(comment, &presentation).with_replies(Vec::new()),
    }))
}

/// Edit one of the caller's comments
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_comment(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    user: AuthUser,
    comment_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service
        .update_comment(*comment_id, &user.id, &req.text)
        .await
        .map_err(|e| e.masked("Failed to update comment"))?;

    Ok(HttpResponse::Ok().json(CommentResponse {
        comment: view(comment, &presentation),
    }))
}

/// Delete one of the caller's comments and its replies
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service
        .delete_comment(*comment_id, &user.id)
        .await
        .map_err(|e| e.masked("Failed to delete comment"))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Comment deleted successfully".to_string(),
    }))
}

/// Replies to a comment, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/comments/{id}/replies",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Parent comment ID")),
    responses(
        (status = 200, description = "Replies oldest first", body = ReplyListResponse)
    )
)]
pub async fn list_replies(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let replies = service
        .list_replies(*comment_id)
        .await
        .map_err(|e| e.masked("Failed to fetch replies"))?;

    let replies = replies
        .into_iter()
        .map(|reply| view(reply, &presentation))
        .collect();

    Ok(HttpResponse::Ok().json(ReplyListResponse { replies }))
}

/// Reply to a comment
#[utoipa::path(
    post,
    path = "/api/v1/comments/{id}/replies",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Parent comment ID")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Reply created", body = ReplyResponse),
        (status = 400, description = "Missing text", body = ErrorResponse),
        (status = 404, description = "Parent comment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_reply(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    user: AuthUser,
    comment_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let reply = service
        .create_reply(*comment_id, &user, &req.text)
        .await
        .map_err(|e| e.masked("Failed to create reply"))?;

    Ok(HttpResponse::Created().json(ReplyResponse {
        reply: view(reply, &presentation),
    }))
}

/// Upvote or downvote a comment; repeating the same vote removes it
#[utoipa::path(
    post,
    path = "/api/v1/comments/{id}/vote",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote state after the toggle", body = VoteOutcome),
        (status = 400, description = "Invalid vote type", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn vote_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    comment_id: web::Path<Uuid>,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let vote_type = VoteType::parse(&req.vote_type).ok_or_else(|| {
        AppError::BadRequest("Invalid vote type. Must be 'upvote' or 'downvote'".into())
    })?;

    let service = VoteService::new((**pool).clone());
    let outcome = service
        .vote(*comment_id, &user.id, vote_type)
        .await
        .map_err(|e| e.masked("Failed to process vote"))?;

    Ok(HttpResponse::Ok().json(outcome))
}
