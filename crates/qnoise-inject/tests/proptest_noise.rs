//! Property tests for noise wrappers.

use proptest::prelude::*;

use qnoise_inject::{
    AxisOrder, GateOp, NoiseProfile, NoisyControlledGate, NoisyGate, SequenceSampler,
    TwoAxisNoise,
};
use qnoise_ir::{Circuit, QubitId, Qubits, StandardGate};

fn order() -> impl Strategy<Value = AxisOrder> {
    prop_oneof![Just(AxisOrder::XThenY), Just(AxisOrder::YThenX)]
}

proptest! {
    #[test]
    fn two_axis_matrix_is_unitary(
        ratio in 0.0f64..20.0,
        magnitude in -std::f64::consts::PI..std::f64::consts::PI,
        order in order(),
    ) {
        let gate = TwoAxisNoise::new(
            StandardGate::H,
            ratio,
            order,
            NoiseProfile::new(SequenceSampler::new([magnitude]), vec![]),
        )
        .unwrap();
        let m = gate.matrix().unwrap().unwrap();
        prop_assert!(m.is_unitary());
    }

    #[test]
    fn control_target_matrix_is_unitary(dt in -1.0f64..1.0, dc in -1.0f64..1.0) {
        let gate = NoisyControlledGate::new(NoiseProfile::new(
            SequenceSampler::new([0.0]),
            vec![],
        ));
        let m = gate.matrix_for(dt, dc);
        prop_assert!(m.is_unitary());
    }

    #[test]
    fn zero_failure_rate_never_drops(seed in any::<u64>(), width in 1u32..8) {
        let gate = NoisyGate::new(
            StandardGate::X,
            NoiseProfile::new(SequenceSampler::new([0.0]), vec![])
                .with_failure_rate(0.0)
                .with_seed(seed),
        );
        let mut circuit = Circuit::with_size("p", width);
        let qubits = Qubits::from((0..width).map(QubitId).collect::<Vec<_>>());
        gate.apply(&mut circuit, &qubits).unwrap();

        prop_assert_eq!(circuit.num_ops(), width as usize);
        prop_assert!(circuit.instructions().iter().all(|inst| inst.name() == "x"));
    }
}
