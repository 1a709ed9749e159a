//! Performance benchmarks for the Policy Impact Engine.
//!
//! This benchmark suite tracks the cost of:
//! - A single regime evaluation through the library: < 20μs mean
//! - A comparison across every registered regime: < 50μs mean
//! - A single impact request through the HTTP router: < 1ms mean
//! - A batch of 1000 comparison requests: < 500ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use policy_impact_engine::api::{AppState, create_router};
use policy_impact_engine::calculation::{compare_regimes, compute_policy_impact};
use policy_impact_engine::config::RegimeRegistry;
use policy_impact_engine::models::{FilingStatus, HouseholdProfile};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_registry() -> RegimeRegistry {
    RegimeRegistry::load("./config/policy").expect("Failed to load config")
}

fn household_body(income: u64, dependents: i32, filing_status: &str) -> String {
    serde_json::json!({
        "income": income.to_string(),
        "dependents": dependents,
        "filing_status": filing_status
    })
    .to_string()
}

/// Benchmark: One regime, one household, no HTTP.
fn bench_single_regime(c: &mut Criterion) {
    let registry = load_registry();
    let regime = registry.regime("high_income_surtax").unwrap();
    let profile = HouseholdProfile::new(
        Decimal::from_str("500000").unwrap(),
        2,
        FilingStatus::Single,
    );

    c.bench_function("single_regime", |b| {
        b.iter(|| black_box(compute_policy_impact(black_box(&profile), regime).unwrap()))
    });
}

/// Benchmark: Audited comparison across all registered regimes.
fn bench_compare(c: &mut Criterion) {
    let registry = load_registry();
    let profile = HouseholdProfile::new(
        Decimal::from_str("210000").unwrap(),
        3,
        FilingStatus::MarriedFilingJointly,
    );

    c.bench_function("compare_regimes", |b| {
        b.iter(|| black_box(compare_regimes(black_box(&profile), &registry).unwrap()))
    });
}

/// Benchmark: Impact request through the router.
///
/// Target: < 1ms mean
fn bench_impact_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_registry()));
    let body = household_body(500_000, 2, "single");

    c.bench_function("impact_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/regimes/tcja_baseline/impact")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 1000 comparison requests with varied households.
///
/// Target: < 500ms mean
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_registry());

    let requests: Vec<String> = (0..1000u64)
        .map(|i| {
            let status = if i % 2 == 0 { "single" } else { "married_filing_jointly" };
            household_body(i * 1_500, (i % 5) as i32, status)
        })
        .collect();

    let mut group = c.benchmark_group("large_batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/compare")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Income levels on either side of the surtax and phaseout thresholds.
fn bench_income_scaling(c: &mut Criterion) {
    let registry = load_registry();
    let regime = registry.regime("high_income_surtax").unwrap();

    let mut group = c.benchmark_group("income_scaling");

    for income in [0u64, 50_000, 210_000, 450_000, 2_000_000].iter() {
        let profile = HouseholdProfile::new(Decimal::from(*income), 2, FilingStatus::Single);
        group.bench_with_input(BenchmarkId::new("income", income), income, |b, _| {
            b.iter(|| black_box(compute_policy_impact(&profile, regime).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_regime,
    bench_compare,
    bench_impact_request,
    bench_batch_1000,
    bench_income_scaling,
);
criterion_main!(benches);
