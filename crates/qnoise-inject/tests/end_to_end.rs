//! End-to-end tests for noisy gate application.

use std::io::Write;

use qnoise_inject::{
    AxisOrder, GateOp, GateSet, Injected, NoiseProfile, NoiseTable, NoiseWrapper, NoisyAngleGate,
    NoisyControlledGate, NoisyGate, ProfileUpdate, Sample, SequenceSampler, TwoAxisNoise,
    inject,
};
use qnoise_ir::{
    Circuit, GateFamily, GateTemplate, ParameterExpression, QubitId, Qubits, StandardGate,
};

fn applied_angles(circuit: &Circuit) -> Vec<f64> {
    circuit
        .instructions()
        .iter()
        .filter_map(|inst| inst.gate.angle().and_then(ParameterExpression::as_f64))
        .collect()
}

fn assert_close(got: &[f64], expected: &[f64]) {
    assert_eq!(got.len(), expected.len(), "got {got:?}, expected {expected:?}");
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-12, "got {got:?}, expected {expected:?}");
    }
}

fn sequence(values: &[f64]) -> NoiseProfile {
    NoiseProfile::new(SequenceSampler::new(values.to_vec()), vec![])
}

// ---------------------------------------------------------------------------
// Angle perturbation
// ---------------------------------------------------------------------------

#[test]
fn rotation_over_three_qubits_uses_samples_in_order() {
    let factory = inject(GateFamily::Rx, sequence(&[0.1, -0.1, 0.3]))
        .into_angle_factory()
        .unwrap();

    let mut circuit = Circuit::new("e2e");
    let qubits = circuit.add_qubits(3);
    factory
        .construct(0.5)
        .apply(&mut circuit, &Qubits::from(qubits.clone()))
        .unwrap();

    assert_close(&applied_angles(&circuit), &[0.6, 0.4, 0.8]);
    for (inst, qubit) in circuit.instructions().iter().zip(&qubits) {
        assert_eq!(inst.name(), "rx");
        assert_eq!(inst.qubits, vec![*qubit]);
    }
}

#[test]
fn factory_constructions_draw_independent_offsets() {
    let factory = inject(GateFamily::Ry, sequence(&[0.1, 0.2]))
        .into_angle_factory()
        .unwrap();
    let first = factory.construct(1.0);
    let second = factory.construct(1.0);

    let mut circuit = Circuit::with_size("c", 1);
    let q = Qubits::from(QubitId(0));
    first.apply(&mut circuit, &q).unwrap();
    second.apply(&mut circuit, &q).unwrap();

    assert_close(&applied_angles(&circuit), &[1.1, 1.2]);
    assert_ne!(first, second);
    assert!(first.profile().ptr_eq(second.profile()));
}

#[test]
fn factory_update_reaches_constructed_gates() {
    let factory = inject(GateFamily::Rz, sequence(&[0.0]))
        .into_angle_factory()
        .unwrap();
    let gate = factory.construct(0.25);
    factory.update_model(ProfileUpdate::new().sampler(SequenceSampler::new([0.5])));

    let mut circuit = Circuit::with_size("c", 1);
    gate.apply(&mut circuit, &Qubits::from(QubitId(0))).unwrap();
    assert_close(&applied_angles(&circuit), &[0.75]);
}

#[test]
fn sampler_arity_error_surfaces_on_first_application() {
    let profile = NoiseProfile::new(
        qnoise_inject::BuiltinSampler::seeded(qnoise_inject::Distribution::Gaussian, 1),
        vec![0.0],
    );
    let gate = NoisyAngleGate::new(GateFamily::Rx, 0.5, profile);
    let mut circuit = Circuit::with_size("c", 1);
    let err = gate
        .apply(&mut circuit, &Qubits::from(QubitId(0)))
        .unwrap_err();
    assert!(matches!(
        err,
        qnoise_inject::NoiseError::InvalidSamplerArgs { got: 1, .. }
    ));
    assert_eq!(circuit.num_ops(), 0);
}

// ---------------------------------------------------------------------------
// Identity and equality
// ---------------------------------------------------------------------------

#[test]
fn wrappers_equal_only_themselves() {
    let a = NoisyGate::new(StandardGate::X, sequence(&[0.0]));
    let b = NoisyGate::new(StandardGate::X, sequence(&[0.0]));
    assert_eq!(a, a);
    assert_ne!(a, b);

    let factory = inject(GateFamily::Rx, sequence(&[0.0]))
        .into_angle_factory()
        .unwrap();
    let g1 = factory.construct(0.3);
    let g2 = factory.construct(0.3);
    assert_eq!(g1.label(), g2.label());
    assert_ne!(g1, g2);
    assert!(!g1.same_wrapper(&a));
}

// ---------------------------------------------------------------------------
// Failure modeling
// ---------------------------------------------------------------------------

#[test]
fn zero_failure_rate_never_substitutes_identity() {
    let gate = NoisyControlledGate::new(sequence(&[0.01]).with_failure_rate(0.0));
    let mut circuit = Circuit::with_size("c", 2);
    let pair = Qubits::from([QubitId(0), QubitId(1)]);
    for _ in 0..200 {
        gate.apply(&mut circuit, &pair).unwrap();
    }
    assert!(circuit.instructions().iter().all(|inst| !inst.is_identity()));
    assert_eq!(circuit.count_ops().get("cx"), Some(&200));
}

#[test]
fn full_failure_rate_always_substitutes_identity() {
    let gate = NoisyControlledGate::new(sequence(&[0.01]).with_failure_rate(1.0));
    let mut circuit = Circuit::with_size("c", 2);
    let pair = Qubits::from([QubitId(0), QubitId(1)]);
    for _ in 0..200 {
        gate.apply(&mut circuit, &pair).unwrap();
    }
    assert!(circuit.instructions().iter().all(|inst| inst.is_identity()));
}

#[test]
fn seeded_failures_are_reproducible() {
    let run = || {
        let gate = NoisyGate::new(
            StandardGate::H,
            sequence(&[0.0]).with_failure_rate(0.5).with_seed(99),
        );
        let mut circuit = Circuit::with_size("c", 4);
        let all = Qubits::from((0..4).map(QubitId).collect::<Vec<_>>());
        for _ in 0..10 {
            gate.apply(&mut circuit, &all).unwrap();
        }
        circuit
            .instructions()
            .iter()
            .map(|inst| inst.is_identity())
            .collect::<Vec<_>>()
    };
    let first = run();
    assert_eq!(first, run());
    assert!(first.iter().any(|&failed| failed));
    assert!(first.iter().any(|&failed| !failed));
}

#[test]
fn control_target_update_reaches_every_source() {
    let gate = NoisyControlledGate::new(sequence(&[0.1]));
    gate.update_model(
        ProfileUpdate::new()
            .sampler(SequenceSampler::from_samples([Sample::from([0.3, 0.7])]))
            .failure_rate(0.0),
    );

    let mut circuit = Circuit::with_size("c", 2);
    gate.apply(&mut circuit, &Qubits::from([QubitId(0), QubitId(1)]))
        .unwrap();
    assert_close(&applied_angles(&circuit), &[0.3, 0.7]);
    assert!(gate.target_profile().ptr_eq(gate.failure_profile()));
    assert!(gate.control_profile().ptr_eq(gate.failure_profile()));
}

// ---------------------------------------------------------------------------
// Two-axis composite
// ---------------------------------------------------------------------------

#[test]
fn two_axis_inverse_matrix_is_conjugate_transpose() {
    let m = 0.37;
    let gate = TwoAxisNoise::new(StandardGate::H, 1.5, AxisOrder::XThenY, sequence(&[m, -m]))
        .unwrap();
    let forward = gate.matrix().unwrap().unwrap();
    let inverse = gate.inverted().unwrap();
    assert_eq!(inverse.order(), AxisOrder::YThenX);
    let backward = inverse.matrix().unwrap().unwrap();

    // Near-equality: the inverse only undoes the noise for a sign-symmetric draw.
    assert!(backward.approx_eq(&forward.dagger(), 1e-9));
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[test]
fn dispatcher_preserves_names() {
    for family in [GateFamily::Rx, GateFamily::Ry, GateFamily::Rz] {
        let injected = inject(family, sequence(&[0.0]));
        assert!(injected.is_noisy());
        assert_eq!(injected.name(), family.name());
    }
    assert_eq!(inject(StandardGate::CX, sequence(&[0.0])).name(), "cx");
}

#[test]
fn dispatcher_passes_unknown_gates_through() {
    let injected = inject(StandardGate::Swap, sequence(&[0.0]));
    match injected {
        Injected::Unchanged(GateTemplate::Fixed(gate)) => assert_eq!(gate, StandardGate::Swap),
        other => panic!("expected pass-through, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn table_from_file_builds_gate_set() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "rz:\n  pdf: constant\n  pdf_args: [0.05]\ncx:\n  pdf: constant\n  pdf_args: [0.2, 0.1]\n"
    )
    .unwrap();

    let table = NoiseTable::load(Some(file.path())).unwrap().unwrap();
    let set = GateSet::from_table(&table).unwrap();
    assert_eq!(set.noisy_gates(), vec!["rz", "cx"]);

    let mut circuit = Circuit::with_size("c", 2);
    set.rotation(GateFamily::Rz, 1.0)
        .apply(&mut circuit, &Qubits::from(QubitId(1)))
        .unwrap();
    set.fixed(StandardGate::CX)
        .apply(&mut circuit, &Qubits::from([QubitId(0), QubitId(1)]))
        .unwrap();

    let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["rz", "cx", "crx", "rz"]);
    assert_close(&applied_angles(&circuit), &[1.05, 0.2, 0.1]);
}

#[test]
fn missing_table_disables_noise() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = NoiseTable::load(Some(dir.path().join("absent.yaml").as_path())).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn incomplete_record_keeps_other_gates_noisy() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "rx:\n  epsilon: 0.1\nrz:\n  pdf: gaussian\ncx:\n  pdf: constant\n  pdf_args: [0.2, 0.1]\n"
    )
    .unwrap();

    let table = NoiseTable::load(Some(file.path())).unwrap().unwrap();
    let set = GateSet::from_table(&table).unwrap();
    assert_eq!(set.noisy_gates(), vec!["cx"]);

    let mut circuit = Circuit::with_size("c", 2);
    set.rotation(GateFamily::Rx, 0.5)
        .apply(&mut circuit, &Qubits::from(QubitId(0)))
        .unwrap();
    set.rotation(GateFamily::Rz, 0.5)
        .apply(&mut circuit, &Qubits::from(QubitId(1)))
        .unwrap();
    set.fixed(StandardGate::CX)
        .apply(&mut circuit, &Qubits::from([QubitId(0), QubitId(1)]))
        .unwrap();

    let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["rx", "rz", "cx", "crx", "rz"]);
    assert_close(&applied_angles(&circuit), &[0.5, 0.5, 0.2, 0.1]);
}

#[test]
fn malformed_table_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rx:\n  pdf: cauchy\n  pdf_args: [0.1]").unwrap();
    assert!(NoiseTable::load(Some(file.path())).is_err());
}
