//! Two-axis composite rotation noise.
//!
//! A sampled magnitude `m` is split between an X and a Y rotation with
//! weights `x = 0.5·r/(r+1)` and `y = 0.5/(r+1)`, where `r` is the ratio of
//! X to Y noise. The two rotations do not commute, so the order is part of
//! the variant: [`AxisOrder::XThenY`] and [`AxisOrder::YThenX`] are each
//! other's inverse construction.

use std::fmt;

use qnoise_ir::{Circuit, ParameterExpression, Qubits, StandardGate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{NoiseError, NoiseResult};
use crate::op::{GateOp, NoiseWrapper, WrapperId, identity_eq, latex_form, require_operands};
use crate::profile::SharedProfile;
use crate::unitary::{GateMatrix, Unitary2x2};

/// Order of the two noise rotations in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// Base gate, then `rx`, then `ry`.
    #[default]
    XThenY,
    /// `ry`, then `rx`, then the base gate.
    YThenX,
}

impl AxisOrder {
    /// The order used by the inverse.
    pub fn reversed(self) -> Self {
        match self {
            AxisOrder::XThenY => AxisOrder::YThenX,
            AxisOrder::YThenX => AxisOrder::XThenY,
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisOrder::XThenY => f.write_str("xy"),
            AxisOrder::YThenX => f.write_str("yx"),
        }
    }
}

/// Single-qubit gate followed (or preceded) by a small X/Y rotation.
#[derive(Debug)]
pub struct TwoAxisNoise {
    id: WrapperId,
    base: StandardGate,
    ratio: f64,
    order: AxisOrder,
    profile: SharedProfile,
}

impl TwoAxisNoise {
    /// Wrap a single-qubit `base`.
    pub fn new(
        base: StandardGate,
        ratio: f64,
        order: AxisOrder,
        profile: impl Into<SharedProfile>,
    ) -> NoiseResult<Self> {
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(NoiseError::InvalidRatio(ratio));
        }
        if base.num_qubits() != 1 {
            return Err(NoiseError::UnsupportedGate {
                gate_name: base.name().to_string(),
                reason: "two-axis noise needs a single-qubit gate".to_string(),
            });
        }
        Ok(Self {
            id: WrapperId::next(),
            base,
            ratio,
            order,
            profile: profile.into(),
        })
    }

    /// The wrapped gate.
    pub fn base(&self) -> &StandardGate {
        &self.base
    }

    /// Ratio of X to Y noise.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Rotation order.
    pub fn order(&self) -> AxisOrder {
        self.order
    }

    /// `(x_weight, y_weight)`.
    pub fn weights(&self) -> (f64, f64) {
        let denom = self.ratio + 1.0;
        (0.5 * self.ratio / denom, 0.5 / denom)
    }

    /// Noise unitary for magnitude `m`, without drawing a sample.
    pub fn noise_matrix(&self, magnitude: f64) -> Unitary2x2 {
        let (xw, yw) = self.weights();
        let rx = Unitary2x2::rx(magnitude * xw);
        let ry = Unitary2x2::ry(magnitude * yw);
        match self.order {
            AxisOrder::XThenY => ry * rx,
            AxisOrder::YThenX => rx * ry,
        }
    }

    /// A new instance with the same settings and profile.
    pub fn fresh(&self) -> Self {
        Self {
            id: WrapperId::next(),
            base: self.base.clone(),
            ratio: self.ratio,
            order: self.order,
            profile: self.profile.clone(),
        }
    }

    /// Inverse: reversed order around the inverse base gate, same profile.
    pub fn inverted(&self) -> NoiseResult<Self> {
        let base = self
            .base
            .inverse()
            .ok_or_else(|| NoiseError::NotInvertible(self.base.name().to_string()))?;
        Ok(Self {
            id: WrapperId::next(),
            base,
            ratio: self.ratio,
            order: self.order.reversed(),
            profile: self.profile.clone(),
        })
    }
}

impl GateOp for TwoAxisNoise {
    fn label(&self) -> String {
        format!("{}_noisy", self.base)
    }

    fn latex(&self) -> String {
        format!("{}${{}}_{{noisy}}$", latex_form(&self.base))
    }

    fn num_qubits(&self) -> u32 {
        1
    }

    /// Noise unitary of one fresh sample.
    fn matrix(&self) -> NoiseResult<Option<GateMatrix>> {
        let magnitude = self.sample()?.scalar()?;
        Ok(Some(GateMatrix::Single(self.noise_matrix(magnitude))))
    }

    fn inverse(&self) -> NoiseResult<Box<dyn GateOp>> {
        Ok(Box::new(self.inverted()?))
    }

    fn apply(&self, circuit: &mut Circuit, qubits: &Qubits) -> NoiseResult<()> {
        require_operands(self.base.name(), qubits)?;
        let (xw, yw) = self.weights();
        for &qubit in qubits {
            let magnitude = self.sample()?.scalar()?;
            let rx = StandardGate::Rx(ParameterExpression::constant(magnitude * xw));
            let ry = StandardGate::Ry(ParameterExpression::constant(magnitude * yw));
            trace!(order = %self.order, magnitude, %qubit, "applying two-axis noise");
            match self.order {
                AxisOrder::XThenY => {
                    circuit.apply(self.base.clone(), &[qubit])?;
                    circuit.apply(rx, &[qubit])?;
                    circuit.apply(ry, &[qubit])?;
                }
                AxisOrder::YThenX => {
                    circuit.apply(ry, &[qubit])?;
                    circuit.apply(rx, &[qubit])?;
                    circuit.apply(self.base.clone(), &[qubit])?;
                }
            }
        }
        Ok(())
    }
}

impl NoiseWrapper for TwoAxisNoise {
    fn id(&self) -> WrapperId {
        self.id
    }

    fn profile(&self) -> &SharedProfile {
        &self.profile
    }
}

identity_eq!(TwoAxisNoise);
