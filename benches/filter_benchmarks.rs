use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use physio_filter::processing::filters::{BandType, ButterworthDesigner, Cutoff, NotchDesigner, ZeroPhaseFilter};
use physio_filter::{filter_pipeline, FilterSpec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLE_RATE_HZ: f64 = 1000.0;
const SIGNAL_LENGTHS: &[usize] = &[1_000, 10_000, 100_000];
const BUTTERWORTH_ORDERS: &[usize] = &[2, 4, 8];

fn noisy_emg(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE_HZ;
            let powerline = 0.3 * (2.0 * std::f64::consts::PI * 50.0 * t).sin();
            rng.gen_range(-1.0..1.0) + powerline
        })
        .collect()
}

fn benchmark_design(c: &mut Criterion) {
    let mut group = c.benchmark_group("design");
    let designer = ButterworthDesigner::default();

    for &order in BUTTERWORTH_ORDERS {
        group.bench_with_input(BenchmarkId::new("butterworth_bandpass", order), &order, |b, &n| {
            b.iter(|| {
                designer
                    .design_adaptive(black_box(n), Cutoff::Band(0.04, 0.9), BandType::Bandpass)
                    .unwrap()
            });
        });
    }

    // Order reduction walks down from n = 20
    group.bench_function("butterworth_reduced", |b| {
        b.iter(|| {
            designer
                .design_adaptive(black_box(20), Cutoff::Single(0.001), BandType::Lowpass)
                .unwrap()
        });
    });

    group.bench_function("notch_50hz", |b| {
        let notch = NotchDesigner::new(0.98);
        b.iter(|| notch.design(black_box(0.1)));
    });

    group.finish();
}

fn benchmark_zero_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("zero_phase");
    let coefficients = ButterworthDesigner::design(4, Cutoff::Single(0.1), BandType::Lowpass).unwrap();
    let filter = ZeroPhaseFilter::new(&coefficients, 4);

    for &len in SIGNAL_LENGTHS {
        let signal = noisy_emg(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("lowpass_n4", len), &signal, |b, signal| {
            b.iter(|| filter.apply(black_box(signal)));
        });
    }

    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let specs = [
        FilterSpec::bandpass(4, 20.0, 450.0),
        FilterSpec::notch(50.0, 0.98),
    ];

    for &len in SIGNAL_LENGTHS {
        let signal = noisy_emg(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("emg_bandpass_notch", len), &signal, |b, signal| {
            b.iter(|| filter_pipeline(black_box(signal), SAMPLE_RATE_HZ, &specs, false).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_design, benchmark_zero_phase, benchmark_pipeline);
criterion_main!(benches);
