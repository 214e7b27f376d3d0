use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use planning_rust::config::EditorProfile;
use planning_rust::models::event::EventDates;
use planning_rust::models::recurrence::{RecurrenceRule, RepeatEnd, RuleWeekday};
use planning_rust::models::time::rezone_keep_wall_clock;
use planning_rust::services::{generate_recurring_dates, plan_series};

fn series_start() -> chrono::DateTime<chrono_tz::Tz> {
    chrono_tz::Europe::Prague
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .unwrap()
}

fn bench_daily_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_generation");
    let profile = EditorProfile::default();
    let start = series_start();

    for count in [10u32, 50, 200] {
        let rule = RecurrenceRule::daily(1, RepeatEnd::Count(count));
        group.bench_with_input(BenchmarkId::new("daily", count), &rule, |b, rule| {
            b.iter(|| generate_recurring_dates(black_box(start), rule, &profile));
        });
    }

    group.finish();
}

fn bench_weekly_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_generation");
    let profile = EditorProfile::default();
    let start = series_start();

    for count in [10u32, 50, 200] {
        let rule = RecurrenceRule::weekly(
            1,
            vec![RuleWeekday::Mo, RuleWeekday::We, RuleWeekday::Fr],
            RepeatEnd::Count(count),
        );
        group.bench_with_input(BenchmarkId::new("weekly", count), &rule, |b, rule| {
            b.iter(|| generate_recurring_dates(black_box(start), rule, &profile));
        });
    }

    group.finish();
}

fn bench_plan_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_planning");
    let profile = EditorProfile::default();

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let mut dates = EventDates::new(start, start + Duration::hours(1), chrono_tz::Europe::Prague);
    dates.recurring_rule = Some(RecurrenceRule::daily(1, RepeatEnd::Count(200)));

    group.bench_function("daily_200_occurrences", |b| {
        b.iter(|| plan_series(black_box(&dates), &profile));
    });

    group.finish();
}

fn bench_rezone(c: &mut Criterion) {
    let mut group = c.benchmark_group("timezone");
    let start = series_start();

    group.bench_function("rezone_keep_wall_clock", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(rezone_keep_wall_clock(
                    black_box(start),
                    chrono_tz::America::New_York,
                ));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_daily_generation,
    bench_weekly_generation,
    bench_plan_series,
    bench_rezone
);
criterion_main!(benches);
