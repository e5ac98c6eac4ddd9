/// Resume handlers - feeds, CRUD and likes
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::config::PresentationConfig;
use crate::error::Result;
use crate::handlers::{ErrorResponse, MessageResponse, ResumeFeedState};
use crate::middleware::AuthUser;
use crate::models::{FileType, ResumeView};
use crate::services::hot_ranking::parse_hot_limit;
use crate::services::{LikeService, PageRequest, ResumeDetails, ResumeInput, ResumeService};

/// Raw query values are kept as strings so bad input falls back to defaults
/// instead of failing extraction.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListResumesQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Items per page, 1..=50 (default 9)
    pub page_size: Option<String>,
    /// Case-insensitive substring matched against name and blurb
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HotResumesQuery {
    /// Number of resumes, 1..=10 (default 3)
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyResumesQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "Blurb must be at most 2000 characters"))]
    pub blurb: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<FileType>,
}

impl From<&ResumeRequest> for ResumeInput {
    fn from(req: &ResumeRequest) -> Self {
        Self {
            name: req.name.clone(),
            blurb: req.blurb.clone(),
            file_url: req.file_url.clone(),
            file_type: req.file_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeView>,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumesResponse {
    pub resumes: Vec<ResumeView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumeResponse {
    pub resume: ResumeView,
}

fn detailed_view(details: ResumeDetails, presentation: &PresentationConfig) -> ResumeView {
    ResumeView::from_record(details.record, &presentation.default_avatar)
        .with_counts(details.likes, details.comments)
}

/// Paginated resume listing, newest first
#[utoipa::path(
    get,
    path = "/api/v1/resumes",
    tag = "resumes",
    params(ListResumesQuery),
    responses(
        (status = 200, description = "One page of resumes", body = ResumeListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_resumes(
    state: web::Data<ResumeFeedState>,
    presentation: web::Data<PresentationConfig>,
    query: web::Query<ListResumesQuery>,
) -> Result<HttpResponse> {
    let request = PageRequest::parse(query.page.as_deref(), query.page_size.as_deref());

    let page = state
        .listing
        .list_page(request, query.q.as_deref())
        .await
        .map_err(|e| e.masked("Failed to fetch resumes"))?;

    let resumes = page
        .items
        .into_iter()
        .map(|record| ResumeView::from_record(record, &presentation.default_avatar))
        .collect();

    Ok(HttpResponse::Ok().json(ResumeListResponse {
        resumes,
        total: page.total,
    }))
}

/// Top resumes by likes + comments
#[utoipa::path(
    get,
    path = "/api/v1/resumes/hot",
    tag = "resumes",
    params(HotResumesQuery),
    responses(
        (status = 200, description = "Hottest resumes in rank order", body = ResumesResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn hot_resumes(
    state: web::Data<ResumeFeedState>,
    presentation: web::Data<PresentationConfig>,
    query: web::Query<HotResumesQuery>,
) -> Result<HttpResponse> {
    let limit = parse_hot_limit(query.limit.as_deref());

    let records = state
        .hot_ranking
        .hot_resumes(limit)
        .await
        .map_err(|e| e.masked("Failed to fetch hot resumes"))?;

    let resumes = records
        .into_iter()
        .map(|record| ResumeView::from_record(record, &presentation.default_avatar))
        .collect();

    Ok(HttpResponse::Ok().json(ResumesResponse { resumes }))
}

/// Get a resume by ID
#[utoipa::path(
    get,
    path = "/api/v1/resumes/{id}",
    tag = "resumes",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume with exact counts", body = ResumeResponse),
        (status = 404, description = "Resume not found", body = ErrorResponse)
    )
)]
pub async fn get_resume(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ResumeService::new((**pool).clone());
    let details = service
        .get_resume(*resume_id)
        .await
        .map_err(|e| e.masked("Failed to fetch resume"))?;

    Ok(HttpResponse::Ok().json(ResumeResponse {
        resume: detailed_view(details, &presentation),
    }))
}

/// Create a resume owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/resumes",
    tag = "resumes",
    request_body = ResumeRequest,
    responses(
        (status = 201, description = "Resume created", body = ResumeResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_resume(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    user: AuthUser,
    req: web::Json<ResumeRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ResumeService::new((**pool).clone());
    let record = service
        .create_resume(&user, &ResumeInput::from(&*req))
        .await
        .map_err(|e| e.masked("Failed to create resume"))?;

    Ok(HttpResponse::Created().json(ResumeResponse {
        resume: ResumeView::from_record(record, &presentation.default_avatar),
    }))
}

/// Update one of the caller's resumes
#[utoipa::path(
    put,
    path = "/api/v1/resumes/{id}",
    tag = "resumes",
    params(("id" = Uuid, Path, description = "Resume ID")),
    request_body = ResumeRequest,
    responses(
        (status = 200, description = "Resume updated", body = ResumeResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Resume not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_resume(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    user: AuthUser,
    resume_id: web::Path<Uuid>,
    req: web::Json<ResumeRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ResumeService::new((**pool).clone());
    let details = service
        .update_resume(&user.id, *resume_id, &ResumeInput::from(&*req))
        .await
        .map_err(|e| e.masked("Failed to update resume"))?;

    Ok(HttpResponse::Ok().json(ResumeResponse {
        resume: detailed_view(details, &presentation),
    }))
}

/// Delete one of the caller's resumes
#[utoipa::path(
    delete,
    path = "/api/v1/resumes/{id}",
    tag = "resumes",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Resume not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_resume(
    pool: web::Data<PgPool>,
    user: AuthUser,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ResumeService::new((**pool).clone());
    service
        .delete_resume(&user.id, *resume_id)
        .await
        .map_err(|e| e.masked("Failed to delete resume"))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Resume deleted successfully".to_string(),
    }))
}

/// The caller's own resumes
#[utoipa::path(
    get,
    path = "/api/v1/resumes/my",
    tag = "resumes",
    params(MyResumesQuery),
    responses(
        (status = 200, description = "Caller's resumes, newest first", body = ResumesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_resumes(
    pool: web::Data<PgPool>,
    presentation: web::Data<PresentationConfig>,
    user: AuthUser,
    query: web::Query<MyResumesQuery>,
) -> Result<HttpResponse> {
    let service = ResumeService::new((**pool).clone());
    let records = service
        .my_resumes(&user.id, query.q.as_deref())
        .await
        .map_err(|e| e.masked("Failed to fetch resumes"))?;

    let resumes: Vec<ResumeView> = records
        .into_iter()
        .map(|record| ResumeView::from_record(record, &presentation.default_avatar))
        .collect();

    Ok(HttpResponse::Ok().json(ResumesResponse { resumes }))
}

/// Like or unlike a resume
#[utoipa::path(
    post,
    path = "/api/v1/resumes/{id}/like",
    tag = "likes",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Like state after the toggle", body = crate::models::LikeOutcome),
        (status = 404, description = "Resume not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    user: AuthUser,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let outcome = service
        .toggle_like(*resume_id, &user.id)
        .await
        .map_err(|e| e.masked("Failed to toggle like"))?;

    Ok(HttpResponse::Ok().json(outcome))
}
