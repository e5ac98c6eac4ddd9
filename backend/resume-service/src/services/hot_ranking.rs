/// Hot resume ranking
///
/// Scans the whole resume collection in fixed-size chunks (newest first),
/// scores every record as `likes + comments` and keeps the best N in a
/// bounded min-heap. Only the winners are then loaded in full.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::db::ResumeStore;
use crate::error::Result;
use crate::metrics::ranking::{
    HOT_RANKING_CHUNKS_TOTAL, HOT_RANKING_RECORDS_SCANNED, HOT_RANKING_SCAN_DURATION_SECONDS,
};
use crate::models::{ResumeRecord, ScoredEntry};
use crate::services::parse_finite;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_LIMIT: usize = 3;
pub const MAX_LIMIT: usize = 10;

/// Turn the raw `limit` query value into a list size in `1..=MAX_LIMIT`.
///
/// Missing, blank or non-numeric input yields `DEFAULT_LIMIT`. Fractions are
/// truncated toward zero before clamping.
pub fn parse_hot_limit(raw: Option<&str>) -> usize {
    match parse_finite(raw) {
        Some(value) => value.trunc().clamp(1.0, MAX_LIMIT as f64) as usize,
        None => DEFAULT_LIMIT,
    }
}

/// Heap slot. `Ord` is "ranks worse", so the heap top is the entry to evict.
#[derive(Debug)]
struct Slot {
    entry: ScoredEntry,
    seq: u64,
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entry
            .rank_cmp(&other.entry)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

/// Bounded best-N selection.
///
/// Produces exactly what a stable sort of every offered entry followed by a
/// truncation to N would: among fully tied entries the first one offered wins.
#[derive(Debug)]
pub struct TopN {
    capacity: usize,
    heap: BinaryHeap<Slot>,
    next_seq: u64,
}

impl TopN {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
            next_seq: 0,
        }
    }

    pub fn offer(&mut self, entry: ScoredEntry) {
        if self.capacity == 0 {
            return;
        }

        let slot = Slot {
            entry,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(slot);
            return;
        }

        if let Some(mut worst) = self.heap.peek_mut() {
            if slot < *worst {
                *worst = slot;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Entries in rank order, best first.
    pub fn into_ranked(self) -> Vec<ScoredEntry> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|slot| slot.entry)
            .collect()
    }
}

pub struct HotRankingService {
    store: Arc<dyn ResumeStore>,
    chunk_size: usize,
}

impl HotRankingService {
    pub fn new(store: Arc<dyn ResumeStore>, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Score the whole collection and return the best `limit` entries.
    ///
    /// Any chunk failure aborts the scan.
    pub async fn scan_top(&self, limit: usize) -> Result<Vec<ScoredEntry>> {
        let chunk = self.chunk_size as i64;
        let mut top = TopN::new(limit);
        let mut offset: i64 = 0;
        let mut scanned: usize = 0;
        let mut chunks: usize = 0;

        loop {
            let rows = self.store.fetch_score_chunk(offset, chunk).await?;
            HOT_RANKING_CHUNKS_TOTAL.inc();
            chunks += 1;
            scanned += rows.len();

            for row in &rows {
                top.offer(ScoredEntry::from_row(row));
            }

            if (rows.len() as i64) < chunk {
                break;
            }
            offset += chunk;
        }

        HOT_RANKING_RECORDS_SCANNED.observe(scanned as f64);
        debug!(scanned, chunks, kept = top.len(), "hot ranking scan finished");

        Ok(top.into_ranked())
    }

    /// Full records for the hottest `limit` resumes, in rank order.
    ///
    /// Ids that disappear between the scan and the batch fetch are dropped.
    pub async fn hot_resumes(&self, limit: usize) -> Result<Vec<ResumeRecord>> {
        let start = Instant::now();
        let result = self.load_hot_resumes(limit).await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        HOT_RANKING_SCAN_DURATION_SECONDS
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn load_hot_resumes(&self, limit: usize) -> Result<Vec<ResumeRecord>> {
        let ranked = self.scan_top(limit).await?;
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = ranked.iter().map(|entry| entry.id).collect();
        let mut by_id: HashMap<Uuid, ResumeRecord> = self
            .store
            .fetch_resumes_by_ids(&ids)
            .await?
            .into_iter()
            .map(|record| (record.id, record))
            .collect();

        Ok(ranked
            .iter()
            .filter_map(|entry| by_id.remove(&entry.id))
            .collect())
    }
}
