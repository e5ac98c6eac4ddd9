/// OpenAPI documentation for Roastume Resume Service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers::{comments, resumes, ErrorResponse, MessageResponse};
use crate::models::{CommentView, FileType, LikeOutcome, ResumeView, VoteOutcome, VoteType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roastume Resume Service API",
        version = "1.0.0",
        description = "Resume sharing and feedback service. Lists resumes with pagination and substring search, ranks the hottest resumes by likes and comments, and manages likes, threaded comments and comment votes.",
        contact(
            name = "Roastume Team"
        ),
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        resumes::list_resumes,
        resumes::hot_resumes,
        resumes::my_resumes,
        resumes::get_resume,
        resumes::create_resume,
        resumes::update_resume,
        resumes::delete_resume,
        resumes::toggle_like,
        comments::list_resume_comments,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment,
        comments::list_replies,
        comments::create_reply,
        comments::vote_comment,
    ),
    components(schemas(
        ResumeView,
        CommentView,
        LikeOutcome,
        VoteOutcome,
        VoteType,
        FileType,
        ErrorResponse,
        MessageResponse,
        resumes::ResumeRequest,
        resumes::ResumeListResponse,
        resumes::ResumesResponse,
        resumes::ResumeResponse,
        comments::CommentRequest,
        comments::VoteRequest,
        comments::CommentListResponse,
        comments::CommentResponse,
        comments::ReplyListResponse,
        comments::ReplyResponse,
    )),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "resumes", description = "Resume listing, hot ranking and CRUD"),
        (name = "likes", description = "Resume likes"),
        (name = "comments", description = "Comments, replies and votes"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from the identity provider"))
                        .build(),
                ),
            )
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
