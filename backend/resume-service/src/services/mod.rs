/// Business logic layer for resume-service
///
/// - Hot ranking: chunked scan + bounded top-N selection
/// - Listing: offset pagination with a substring filter
/// - Resumes, likes, comments and votes: thin rules over the repositories
pub mod comments;
pub mod hot_ranking;
pub mod likes;
pub mod listing;
pub mod resumes;
pub mod votes;

pub use comments::{CommentService, CommentThread};
pub use hot_ranking::HotRankingService;
pub use likes::LikeService;
pub use listing::{ListingService, PageRequest};
pub use resumes::{ResumeDetails, ResumeInput, ResumeService};
pub use votes::VoteService;

/// Parse a query-string number the lenient way: blank, non-numeric and
/// non-finite input all read as absent. Rust float syntax applies, so hex
/// such as `0x10` is non-numeric too.
pub(crate) fn parse_finite(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
