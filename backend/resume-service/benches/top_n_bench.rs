use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resume_service::models::ScoredEntry;
use resume_service::services::hot_ranking::TopN;
use uuid::Uuid;

fn entries(count: usize) -> Vec<ScoredEntry> {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let likes = ((i * 7919) % 211) as i64;
            let comments = ((i * 104_729) % 53) as i64;
            ScoredEntry {
                id: Uuid::new_v4(),
                likes,
                comments,
                score: likes + comments,
                created_at: base - Duration::seconds(i as i64),
            }
        })
        .collect()
}

/// Bounded heap selection against the full sort it replaces
fn bench_top_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("hot_top_n");

    for count in [1_000usize, 10_000, 100_000] {
        let data = entries(count);

        group.bench_with_input(BenchmarkId::new("bounded_heap", count), &data, |b, data| {
            b.iter(|| {
                let mut top = TopN::new(10);
                for entry in data {
                    top.offer(entry.clone());
                }
                black_box(top.into_ranked())
            });
        });

        group.bench_with_input(BenchmarkId::new("sort_truncate", count), &data, |b, data| {
            b.iter(|| {
                let mut all = data.clone();
                all.sort_by(|a, b| a.rank_cmp(b));
                all.truncate(10);
                black_box(all)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_top_n);
criterion_main!(benches);
