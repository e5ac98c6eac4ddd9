//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod memory_store;

use chrono::{DateTime, Duration, TimeZone, Utc};
use resume_service::models::ResumeRecord;
use uuid::Uuid;

/// Fixed reference instant so ordering assertions are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
}

/// A resume created `age_secs` seconds before `base_time()`.
pub fn resume(name: &str, blurb: Option<&str>, likes: i32, comments: i32, age_secs: i64) -> ResumeRecord {
    let created_at = base_time() - Duration::seconds(age_secs);
    ResumeRecord {
        id: Uuid::new_v4(),
        user_id: format!("user-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        blurb: blurb.map(str::to_string),
        file_url: Some(format!("https://files.roastume.dev/{}.pdf", age_secs)),
        file_type: Some("pdf".to_string()),
        likes_count: likes,
        comments_count: comments,
        created_at,
        updated_at: created_at,
        author_name: Some(name.to_string()),
        author_avatar: None,
    }
}

/// `count` resumes with scores spread out, one second apart.
pub fn many_resumes(count: usize) -> Vec<ResumeRecord> {
    (0..count)
        .map(|i| {
            let i = i as i32;
            resume(
                &format!("Resume {}", i),
                None,
                (i * 37) % 101,
                (i * 13) % 17,
                i64::from(i),
            )
        })
        .collect()
}
