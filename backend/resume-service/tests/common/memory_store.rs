//! In-memory `ResumeStore` with call counting and failure injection.

use async_trait::async_trait;
use resume_service::db::ResumeStore;
use resume_service::error::{AppError, Result};
use resume_service::models::{ResumeRecord, ResumeScoreRow};
use resume_service::services::listing::{matches_query, normalize_query};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    records: Vec<ResumeRecord>,
    chunk_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    /// 1-based chunk call that fails
    fail_on_chunk: Option<usize>,
    fail_batch: bool,
    fail_listing: bool,
    /// Ids missing from batch fetches, as if deleted mid-scan
    vanished: Mutex<HashSet<Uuid>>,
}

impl MemoryStore {
    pub fn new(mut records: Vec<ResumeRecord>) -> Self {
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing_on_chunk(mut self, call: usize) -> Self {
        self.fail_on_chunk = Some(call);
        self
    }

    pub fn failing_batch(mut self) -> Self {
        self.fail_batch = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn vanish(&self, id: Uuid) {
        self.vanished.lock().unwrap().insert(id);
    }

    pub fn chunk_calls(&self) -> usize {
        self.chunk_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    fn filtered(&self, query: Option<&str>) -> Vec<&ResumeRecord> {
        let needle = normalize_query(query);
        self.records
            .iter()
            .filter(|r| match &needle {
                Some(n) => matches_query(&r.name, r.blurb.as_deref(), n),
                None => true,
            })
            .collect()
    }
}

fn window<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn fetch_score_chunk(&self, offset: i64, limit: i64) -> Result<Vec<ResumeScoreRow>> {
        let call = self.chunk_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_chunk == Some(call) {
            return Err(AppError::DatabaseError(format!("chunk {} timed out", call)));
        }

        let rows: Vec<ResumeScoreRow> = self
            .records
            .iter()
            .map(|r| ResumeScoreRow {
                id: r.id,
                likes_count: r.likes_count,
                comments_count: r.comments_count,
                created_at: r.created_at,
            })
            .collect();

        Ok(window(&rows, offset, limit))
    }

    async fn fetch_resumes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ResumeRecord>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_batch {
            return Err(AppError::DatabaseError("batch fetch failed".into()));
        }

        let vanished = self.vanished.lock().unwrap();
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        // Reverse so callers cannot rely on store order.
        Ok(self
            .records
            .iter()
            .rev()
            .filter(|r| wanted.contains(&r.id) && !vanished.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn fetch_page(
        &self,
        offset: i64,
        limit: i64,
        query: Option<&str>,
    ) -> Result<Vec<ResumeRecord>> {
        if self.fail_listing {
            return Err(AppError::DatabaseError("connection reset".into()));
        }
        let matching: Vec<ResumeRecord> = self.filtered(query).into_iter().cloned().collect();
        Ok(window(&matching, offset, limit))
    }

    async fn count_resumes(&self, query: Option<&str>) -> Result<i64> {
        if self.fail_listing {
            return Err(AppError::DatabaseError("connection reset".into()));
        }
        Ok(self.filtered(query).len() as i64)
    }
}
