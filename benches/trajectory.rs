use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ion_deposition::params::{ParameterUpdate, ParticleVariant, SimulationParameters};
use ion_deposition::simulation::{simulate_variants, SimulationEngine, TrajectorySimulator};
use ion_deposition::sweep::{linspace, sweep_parameter};

fn bench_single_trajectory(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory");
    let engine = TrajectorySimulator::default();
    let params = SimulationParameters::default().apply(ParameterUpdate::VoltageMultiplier(2.25));

    for variant in ParticleVariant::ALL {
        group.bench_with_input(BenchmarkId::new("simulate", variant), &variant, |b, &variant| {
            b.iter(|| engine.simulate(&params, variant))
        });
    }
    group.bench_function("both_variants", |b| b.iter(|| simulate_variants(&engine, &params)));
    group.finish();
}

fn bench_multiplier_sweep(c: &mut Criterion) {
    let engine = TrajectorySimulator::default();
    let base = SimulationParameters::default();
    let values = linspace(1.0, 4.0, 32);

    c.bench_function("sweep_voltage_multiplier_32", |b| {
        b.iter(|| {
            sweep_parameter(
                &engine,
                &base,
                ParticleVariant::A,
                values.iter().copied(),
                ParameterUpdate::VoltageMultiplier,
            )
        })
    });
}

criterion_group!(benches, bench_single_trajectory, bench_multiplier_sweep);
criterion_main!(benches);
