use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use loadtrend::{
    ActivityPreparer, ActivityType, DailyStressGenerator, ExtendedStats, Gender, HeartRateImpulseMode,
    HeartRateStats, PmcCalculator, PowerStats, PreparationOptions, RawActivity, StressCalculator,
    UserSettings,
};

/// Performance benchmarks for the training load pipeline
///
/// Each stage is measured over histories of increasing length.

fn create_benchmark_athlete() -> UserSettings {
    UserSettings {
        gender: Gender::Male,
        max_hr: 188.0,
        rest_hr: 48.0,
        lactate_threshold: None,
        cycling_ftp: Some(260.0),
        swim_ftp: Some(34.0),
    }
}

fn benchmark_options() -> PreparationOptions {
    PreparationOptions {
        mode: HeartRateImpulseMode::Hrss,
        power_enabled: true,
        swim_enabled: true,
        skip_types: Vec::new(),
    }
}

/// One activity per day, rotating through ride, run and swim
fn create_activity_history(days: i64) -> Vec<RawActivity> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    (0..days)
        .map(|i| {
            let (activity_type, power) = match i % 3 {
                0 => (
                    ActivityType::Ride,
                    Some(PowerStats {
                        has_power_meter: true,
                        weighted_power: Some(200.0 + (i % 60) as f64),
                    }),
                ),
                1 => (ActivityType::Run, None),
                _ => (ActivityType::Swim, None),
            };

            RawActivity {
                id: i.to_string(),
                name: format!("Session {}", i),
                start_time: (start + Duration::days(i)).and_hms_opt(6, 0, 0).unwrap(),
                activity_type,
                distance: Some(2500.0 + (i % 10) as f64 * 100.0),
                moving_time: 3600.0,
                elapsed_time: 3900.0,
                stats: Some(ExtendedStats {
                    heart_rate: Some(HeartRateStats {
                        training_impulse: Some(60.0 + (i % 40) as f64),
                    }),
                    power,
                }),
            }
        })
        .collect()
}

fn bench_stress_scores(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stress Scores");

    group.bench_function("power_stress_score", |b| {
        b.iter(|| StressCalculator::power_stress_score(black_box(3600.0), black_box(240.0), black_box(260.0)))
    });
    group.bench_function("heart_rate_stress_score", |b| {
        b.iter(|| {
            StressCalculator::heart_rate_stress_score(
                Gender::Female,
                black_box(185.0),
                black_box(55.0),
                black_box(165.0),
                black_box(120.0),
            )
        })
    });

    group.finish();
}

fn bench_prepare(c: &mut Criterion) {
    let settings = create_benchmark_athlete();
    let options = benchmark_options();
    let preparer = ActivityPreparer::new(&settings, &options);

    let mut group = c.benchmark_group("Activity Preparation");

    for &days in &[30, 365, 3650] {
        let activities = create_activity_history(days);

        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("prepare", days), &activities, |b, activities| {
            b.iter(|| preparer.prepare(black_box(activities)))
        });
    }

    group.finish();
}

fn bench_daily_stress(c: &mut Criterion) {
    let settings = create_benchmark_athlete();
    let options = benchmark_options();
    let preparer = ActivityPreparer::new(&settings, &options);

    let mut group = c.benchmark_group("Daily Stress");

    for &days in &[30, 365, 3650] {
        let prepared = preparer.prepare(&create_activity_history(days)).unwrap();
        let today = prepared.last().unwrap().date;

        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("generate", days), &prepared, |b, prepared| {
            b.iter(|| DailyStressGenerator::generate(black_box(prepared), today))
        });
    }

    group.finish();
}

fn bench_pmc(c: &mut Criterion) {
    let settings = create_benchmark_athlete();
    let options = benchmark_options();
    let preparer = ActivityPreparer::new(&settings, &options);
    let pmc_calculator = PmcCalculator::new();

    let mut group = c.benchmark_group("PMC Calculation");

    for &days in &[30, 365, 3650] {
        let prepared = preparer.prepare(&create_activity_history(days)).unwrap();
        let today = prepared.last().unwrap().date;
        let daily = DailyStressGenerator::generate(&prepared, today).unwrap();

        group.throughput(Throughput::Elements(daily.len() as u64));
        group.bench_with_input(BenchmarkId::new("compute_trend", days), &daily, |b, daily| {
            b.iter(|| pmc_calculator.compute_trend(black_box(daily)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stress_scores, bench_prepare, bench_daily_stress, bench_pmc);
criterion_main!(benches);
