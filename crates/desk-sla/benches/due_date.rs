//! Due-date calculator benchmarks
//!
//! The hour-stepping walk is worst for STANDARD tickets opened on a Friday
//! evening.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use desk_common::{Impact, SlaLevel, Urgency};
use desk_sla::{compute_due_date, evaluate_sla_status, TriageEngine};

fn bench_due_date(c: &mut Criterion) {
    let friday_evening = Utc.with_ymd_and_hms(2024, 1, 12, 18, 0, 0).unwrap();
    let mut group = c.benchmark_group("compute_due_date");

    for level in SlaLevel::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| compute_due_date(black_box(level), black_box(&friday_evening)))
        });
    }

    group.finish();
}

fn bench_triage(c: &mut Criterion) {
    let engine = TriageEngine::default();
    let created = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

    c.bench_function("triage_and_evaluate", |b| {
        b.iter(|| {
            let decision = engine.triage(black_box(Impact::Major), black_box(Urgency::High), created);
            evaluate_sla_status(&decision.due_date, decision.sla_level, &now)
        })
    });
}

criterion_group!(benches, bench_due_date, bench_triage);
criterion_main!(benches);
