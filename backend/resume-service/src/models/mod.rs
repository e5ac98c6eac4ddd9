/// Data models for resume-service
///
/// Three families live here:
/// - database rows (`*Record`, `*Row`) decoded with `sqlx::FromRow`
/// - ranking values that only exist for the lifetime of one scan
/// - client-facing views serialised as camelCase JSON
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================
// Database rows
// ============================================

/// Profile mirrored from the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resume joined with its owner's display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub blurb: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
}

/// Minimal projection read by the hot ranking scan
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ResumeScoreRow {
    pub id: Uuid,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: String,
    pub parent_id: Option<Uuid>,
    pub text: String,
    pub upvotes_count: i32,
    pub downvotes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentVote {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub user_id: String,
    pub vote_type: String,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Ranking
// ============================================

/// A resume scored for the hot list. Lives for one scan only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredEntry {
    pub id: Uuid,
    pub likes: i64,
    pub comments: i64,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl ScoredEntry {
    /// Composite popularity: likes plus comments, no decay or weighting.
    pub fn from_row(row: &ResumeScoreRow) -> Self {
        let likes = i64::from(row.likes_count.max(0));
        let comments = i64::from(row.comments_count.max(0));
        Self {
            id: row.id,
            likes,
            comments,
            score: likes + comments,
            created_at: row.created_at,
        }
    }

    /// Rank order: `Ordering::Less` means `self` ranks ahead of `other`.
    ///
    /// Descending on score, then likes, then comments, then created_at.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.likes.cmp(&self.likes))
            .then_with(|| other.comments.cmp(&self.comments))
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

/// One page of a listing plus the total number of matching rows
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

// ============================================
// Enumerations
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Pdf,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "upvote" => Some(VoteType::Upvote),
            "downvote" => Some(VoteType::Downvote),
            _ => None,
        }
    }
}

// ============================================
// Client-facing views
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeView {
    pub id: Uuid,
    pub name: String,
    pub blurb: Option<String>,
    pub likes: i64,
    /// Always empty; comments are fetched from their own endpoint.
    pub comments: Vec<CommentView>,
    pub comments_count: i64,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub owner_id: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    pub avatar: String,
}

impl ResumeView {
    pub fn from_record(record: ResumeRecord, default_avatar: &str) -> Self {
        Self {
            id: record.id,
            name: record.name,
            blurb: record.blurb,
            likes: i64::from(record.likes_count),
            comments: Vec::new(),
            comments_count: i64::from(record.comments_count),
            file_url: record.file_url,
            file_type: record.file_type,
            owner_id: record.user_id,
            created_at: record.created_at.timestamp_millis(),
            avatar: non_empty(record.author_avatar)
                .unwrap_or_else(|| default_avatar.to_string()),
        }
    }

    /// Override the denormalised counters with exact counts.
    pub fn with_counts(mut self, likes: i64, comments: i64) -> Self {
        self.likes = likes;
        self.comments_count = comments;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub replies: Option<Vec<CommentView>>,
}

impl CommentView {
    pub fn from_record(record: CommentRecord, default_avatar: &str) -> Self {
        Self {
            id: record.id,
            author: non_empty(record.author_name).unwrap_or_else(|| "Anonymous".to_string()),
            avatar: non_empty(record.author_avatar)
                .unwrap_or_else(|| default_avatar.to_string()),
            text: record.text,
            upvotes: i64::from(record.upvotes_count),
            downvotes: i64::from(record.downvotes_count),
            created_at: record.created_at.timestamp_millis(),
            replies: None,
        }
    }

    pub fn with_replies(mut self, replies: Vec<CommentView>) -> Self {
        self.replies = Some(replies);
        self
    }
}

/// Result of toggling a like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcome {
    pub liked: bool,
    pub likes_count: i64,
}

/// Result of toggling a comment vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub voted: bool,
    pub vote_type: Option<VoteType>,
    pub upvotes: i64,
    pub downvotes: i64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
