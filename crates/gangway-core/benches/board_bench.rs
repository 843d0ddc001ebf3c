//! # Board Benchmarks
//!
//! Performance benchmarks for gangway-core board operations.
//!
//! Run with: `cargo bench -p gangway-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gangway_core::{
    Deal, DealFilter, DealId, EventLog, Money, PipelineBoard, PortalCatalog, Priority, Role, Stage,
    UserContext, filter_deals,
};
use std::hint::black_box;

const PRIORITIES: [Priority; 4] = [
    Priority::Low,
    Priority::Medium,
    Priority::High,
    Priority::Urgent,
];

/// Create a board with N deals spread round-robin across the stages.
fn create_board(size: usize) -> PipelineBoard {
    let deals = (0..size)
        .map(|i| {
            Deal::new(
                format!("D{i:06}"),
                format!("Charter booking {i}"),
                format!("Client {}", i % 37),
                Money::new((i as u64).saturating_mul(1_000)),
                Stage::ALL[i % Stage::ALL.len()],
                PRIORITIES[i % PRIORITIES.len()],
                format!("Owner {}", i % 5),
            )
        })
        .collect();
    PipelineBoard::from_deals(deals).expect("seed")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");

    for size in [100, 1000, 10000].iter() {
        let board = create_board(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(board.aggregates()));
        });
    }

    group.finish();
}

fn bench_move_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_deal");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut board = create_board(size);
            let mut log = EventLog::new();
            let id = DealId::new(format!("D{:06}", size / 2));
            let mut flip = false;

            b.iter(|| {
                // Alternate targets so every iteration is a true move.
                let target = if flip { Stage::New } else { Stage::Offer };
                flip = !flip;
                black_box(board.move_deal(&id, target, &mut log)).expect("move")
            });
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1000, 10000].iter() {
        let board = create_board(*size);
        let snapshot = board.snapshot();
        let filter = DealFilter::search("client 1").with_priority(Priority::High);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(filter_deals(&snapshot, &filter)));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let catalog = PortalCatalog::builtin();
    let user = UserContext::new("u-bench", "Bench User", "bench@example.com")
        .with_permission("crm_access")
        .with_permission("access_concierge");

    let mut group = c.benchmark_group("resolve");

    for role in [Role::VipClient, Role::Staff, Role::Admin] {
        group.bench_with_input(
            BenchmarkId::from_parameter(role.as_str()),
            &role,
            |b, &role| {
                b.iter(|| black_box(catalog.resolve(role, &user)).expect("resolve"));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_aggregates,
    bench_move_deal,
    bench_filter,
    bench_resolve,
);

criterion_main!(benches);
