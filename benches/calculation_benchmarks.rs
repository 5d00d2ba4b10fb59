//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers the hot paths:
//! - Single pay calculation, in-process and over HTTP
//! - Report aggregation over 1,000 and 10,000 records
//! - CSV export of 1,000 records
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, CalculationRequest, create_router};
use payroll_engine::calculation::{build_record, calculate_pay};
use payroll_engine::config::{ConfigLoader, PayPolicy};
use payroll_engine::export::{CsvExporter, ExportSink};
use payroll_engine::models::{
    CompensationProfile, Employee, FilingStatus, PayPeriodInput, PayType, PayrollRecord,
    ReportFilters, ReportType,
};
use payroll_engine::reporting::generate_report;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn hourly_profile() -> CompensationProfile {
    CompensationProfile {
        pay_type: PayType::Hourly,
        pay_rate: dec("35"),
        retirement_rate: dec("0.06"),
        filing_status: FilingStatus::Single,
    }
}

fn period(start: NaiveDate) -> PayPeriodInput {
    PayPeriodInput {
        pay_period_start: start,
        pay_period_end: start + Duration::days(13),
        regular_hours: dec("75"),
        overtime_hours: dec("10"),
        reported_tips: dec("200"),
    }
}

/// Creates `employee_count` employees spread over five departments.
fn create_employees(employee_count: u64) -> Vec<Employee> {
    (1..=employee_count)
        .map(|id| Employee {
            id,
            department_id: id % 5 + 1,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            employee_number: format!("EMP{:05}", id),
            pay_type: PayType::Hourly,
            pay_rate: dec("35"),
            filing_status: FilingStatus::Single,
            retirement_rate: dec("0.06"),
        })
        .collect()
}

/// Creates `count` records cycling through the employees, two weeks apart.
fn create_records(count: u64, employees: &[Employee]) -> Vec<PayrollRecord> {
    let policy = PayPolicy::default();
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let employee = &employees[(i as usize) % employees.len()];
            let input = period(base + Duration::days(14 * (i as i64 % 26)));
            let pay = calculate_pay(&employee.profile(), &input, &policy).unwrap();
            build_record(i + 1, employee.id, &input, &pay, Utc::now())
        })
        .collect()
}

/// Benchmark: One calculation without HTTP.
fn bench_calculate_pay(c: &mut Criterion) {
    let profile = hourly_profile();
    let input = period(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    let policy = PayPolicy::default();

    c.bench_function("calculate_pay", |b| {
        b.iter(|| black_box(calculate_pay(&profile, &input, &policy).unwrap()))
    });
}

/// Benchmark: One calculation through the router.
fn bench_calculate_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::seeded(config).expect("Failed to seed repository"));

    let request = CalculationRequest {
        profile: hourly_profile(),
        period: period(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("calculate_http", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
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

/// Benchmark: Report aggregation at increasing record counts.
fn bench_generate_report(c: &mut Criterion) {
    let employees = create_employees(100);
    let filters = ReportFilters::between(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        ReportType::Ytd,
    )
    .with_department(2);

    let mut group = c.benchmark_group("generate_report");
    for count in [1_000u64, 10_000] {
        let records = create_records(count, &employees);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("records", count), &records, |b, records| {
            b.iter(|| black_box(generate_report(records, &employees, &filters).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: CSV export of 1,000 records.
fn bench_export_records(c: &mut Criterion) {
    let employees = create_employees(100);
    let records = create_records(1_000, &employees);
    let exporter = CsvExporter::new(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

    c.bench_function("export_records_1000", |b| {
        b.iter(|| black_box(exporter.export_records(&records, &employees).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_calculate_pay,
    bench_calculate_http,
    bench_generate_report,
    bench_export_records,
);
criterion_main!(benches);
