//! Benchmarks for noisy gate application
//!
//! Run with: cargo bench -p qnoise-inject

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qnoise_inject::{
    BuiltinSampler, Distribution, GateOp, NoiseProfile, NoisyAngleFactory, NoisyControlledGate,
};
use qnoise_ir::{Circuit, GateFamily, QubitId, Qubits};

fn gaussian(seed: u64) -> NoiseProfile {
    NoiseProfile::new(
        BuiltinSampler::seeded(Distribution::Gaussian, seed),
        vec![0.0, 0.01],
    )
    .with_failure_rate(0.01)
    .with_seed(seed)
}

/// Benchmark angle-perturbed rotations over growing registers
fn bench_noisy_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("noisy_rotation");

    for width in &[1u32, 8, 64] {
        group.bench_with_input(BenchmarkId::new("rx", width), width, |b, &n| {
            let factory = NoisyAngleFactory::new(GateFamily::Rx, gaussian(1));
            let gate = factory.construct(0.5);
            let qubits = Qubits::from((0..n).map(QubitId).collect::<Vec<_>>());
            b.iter(|| {
                let mut circuit = Circuit::with_size("bench", n);
                gate.apply(&mut circuit, black_box(&qubits)).unwrap();
                circuit
            });
        });
    }

    group.finish();
}

/// Benchmark the control/target model
fn bench_noisy_cx(c: &mut Criterion) {
    let gate = NoisyControlledGate::new(gaussian(2));
    let pair = Qubits::from([QubitId(0), QubitId(1)]);

    c.bench_function("noisy_cx", |b| {
        b.iter(|| {
            let mut circuit = Circuit::with_size("bench", 2);
            gate.apply(&mut circuit, black_box(&pair)).unwrap();
            circuit
        });
    });
}

criterion_group!(benches, bench_noisy_rotation, bench_noisy_cx);
criterion_main!(benches);
