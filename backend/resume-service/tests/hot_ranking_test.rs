//! Integration Tests: Hot Resume Ranking
//!
//! Runs `HotRankingService` against an in-memory `ResumeStore`.
//!
//! Coverage:
//! - Chunked scan termination and chunk counts
//! - Rank order and tie-breaks over multi-chunk collections
//! - Batch re-assembly in rank order, vanished ids dropped
//! - Failure in any chunk or in the batch fetch aborts the scan

mod common;

use common::memory_store::MemoryStore;
use common::{many_resumes, resume};
use resume_service::error::AppError;
use resume_service::models::ScoredEntry;
use resume_service::services::HotRankingService;
use std::sync::Arc;
use uuid::Uuid;

fn service(store: &Arc<MemoryStore>, chunk_size: usize) -> HotRankingService {
    HotRankingService::new(store.clone(), chunk_size)
}

fn assert_ranked(entries: &[ScoredEntry]) {
    for pair in entries.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let key_a = (a.score, a.likes, a.comments, a.created_at);
        let key_b = (b.score, b.likes, b.comments, b.created_at);
        assert!(key_a >= key_b, "{:?} ranked ahead of {:?}", a, b);
    }
}

#[tokio::test]
async fn scan_of_2500_reads_three_chunks() {
    let store = Arc::new(MemoryStore::new(many_resumes(2500)));
    let ranked = service(&store, 1000).scan_top(10).await.unwrap();

    assert_eq!(store.chunk_calls(), 3);
    assert_eq!(ranked.len(), 10);
    assert_ranked(&ranked);
}

#[tokio::test]
async fn exact_multiple_reads_one_empty_chunk() {
    let store = Arc::new(MemoryStore::new(many_resumes(2000)));
    service(&store, 1000).scan_top(3).await.unwrap();

    assert_eq!(store.chunk_calls(), 3);
}

#[tokio::test]
async fn empty_collection_yields_nothing() {
    let store = Arc::new(MemoryStore::new(Vec::new()));
    let hot = service(&store, 1000).hot_resumes(3).await.unwrap();

    assert!(hot.is_empty());
    assert_eq!(store.chunk_calls(), 1);
    assert_eq!(store.batch_calls(), 0);
}

#[tokio::test]
async fn result_never_exceeds_record_count() {
    let store = Arc::new(MemoryStore::new(many_resumes(4)));
    let hot = service(&store, 1000).hot_resumes(10).await.unwrap();

    assert_eq!(hot.len(), 4);
}

#[tokio::test]
async fn winners_found_across_chunks() {
    let mut records = many_resumes(250);
    let oldest = resume("Oldest Star", None, 900, 50, 10_000);
    let middle = resume("Middle Star", None, 800, 10, 5_000);
    records.push(oldest.clone());
    records.push(middle.clone());

    let store = Arc::new(MemoryStore::new(records));
    let hot = service(&store, 100).hot_resumes(2).await.unwrap();

    let ids: Vec<Uuid> = hot.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![oldest.id, middle.id]);
    assert_eq!(store.chunk_calls(), 3);
}

#[tokio::test]
async fn composite_score_orders_results() {
    let a = resume("A", None, 5, 2, 30);
    let b = resume("B", None, 3, 3, 20);
    let c = resume("C", None, 1, 9, 10);

    let store = Arc::new(MemoryStore::new(vec![a.clone(), b.clone(), c.clone()]));
    let hot = service(&store, 1000).hot_resumes(3).await.unwrap();

    let names: Vec<&str> = hot.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn newer_resume_wins_tie() {
    let older = resume("Older", None, 4, 4, 100);
    let newer = resume("Newer", None, 4, 4, 1);

    let store = Arc::new(MemoryStore::new(vec![older, newer.clone()]));
    let hot = service(&store, 1).hot_resumes(1).await.unwrap();

    assert_eq!(hot[0].id, newer.id);
}

#[tokio::test]
async fn repeated_scans_are_identical() {
    let store = Arc::new(MemoryStore::new(many_resumes(1200)));
    let svc = service(&store, 500);

    let first = svc.scan_top(7).await.unwrap();
    let second = svc.scan_top(7).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn vanished_ids_are_dropped_and_order_kept() {
    let first = resume("First", None, 30, 0, 3);
    let second = resume("Second", None, 20, 0, 2);
    let third = resume("Third", None, 10, 0, 1);

    let store = Arc::new(MemoryStore::new(vec![
        third.clone(),
        first.clone(),
        second.clone(),
    ]));
    store.vanish(second.id);

    let hot = service(&store, 1000).hot_resumes(3).await.unwrap();
    let ids: Vec<Uuid> = hot.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, third.id]);
}

#[tokio::test]
async fn failure_in_second_chunk_aborts_scan() {
    let store = Arc::new(MemoryStore::new(many_resumes(2500)).failing_on_chunk(2));
    let result = service(&store, 1000).hot_resumes(3).await;

    assert!(matches!(result, Err(AppError::DatabaseError(_))));
    assert_eq!(store.chunk_calls(), 2);
    assert_eq!(store.batch_calls(), 0);
}

#[tokio::test]
async fn batch_failure_returns_error_not_partial_data() {
    let store = Arc::new(MemoryStore::new(many_resumes(10)).failing_batch());
    let result = service(&store, 1000).hot_resumes(3).await;

    assert!(result.is_err());
}
