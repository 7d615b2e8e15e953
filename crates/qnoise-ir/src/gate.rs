//! The standard gate library and single-angle gate families.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameter::ParameterExpression;

/// A gate with all of its angles fixed (possibly symbolically).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// `id`
    I,
    /// `x`
    X,
    /// `y`
    Y,
    /// `z`
    Z,
    /// `h`
    H,
    /// `s`, square root of Z.
    S,
    /// `sdg`
    Sdg,
    /// `t`, fourth root of Z.
    T,
    /// `tdg`
    Tdg,
    /// `sx`, square root of X.
    SX,
    /// `sxdg`
    SXdg,
    /// `rx(θ)`
    Rx(ParameterExpression),
    /// `ry(θ)`
    Ry(ParameterExpression),
    /// `rz(θ)`
    Rz(ParameterExpression),
    /// `p(λ)`
    P(ParameterExpression),
    /// `u(θ, φ, λ)`
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    /// `cx`, control first.
    CX,
    /// `cy`
    CY,
    /// `cz`
    CZ,
    /// `swap`
    Swap,
    /// `iswap`
    ISwap,
    /// `crx(θ)`
    CRx(ParameterExpression),
    /// `cry(θ)`
    CRy(ParameterExpression),
    /// `crz(θ)`
    CRz(ParameterExpression),
    /// `ccx`, two controls then the target.
    CCX,
}

impl StandardGate {
    /// Lowercase gate name, as used in noise tables.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CCX => "ccx",
        }
    }

    /// Look up a gate without parameters by name.
    ///
    /// Parameterized gates are looked up through [`GateFamily::from_name`].
    pub fn from_name(name: &str) -> Option<StandardGate> {
        let gate = match name {
            "id" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "sx" => StandardGate::SX,
            "sxdg" => StandardGate::SXdg,
            "cx" => StandardGate::CX,
            "cy" => StandardGate::CY,
            "cz" => StandardGate::CZ,
            "swap" => StandardGate::Swap,
            "iswap" => StandardGate::ISwap,
            "ccx" => StandardGate::CCX,
            _ => return None,
        };
        Some(gate)
    }

    /// Arity.
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_) => 2,
            StandardGate::CCX => 3,
            _ => 1,
        }
    }

    /// Angles, in declaration order.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p) => vec![p],
            StandardGate::U(a, b, c) => vec![a, b, c],
            _ => vec![],
        }
    }

    /// True while an angle is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// The family this gate was built from, for single-angle gates.
    pub fn family(&self) -> Option<GateFamily> {
        match self {
            StandardGate::Rx(_) => Some(GateFamily::Rx),
            StandardGate::Ry(_) => Some(GateFamily::Ry),
            StandardGate::Rz(_) => Some(GateFamily::Rz),
            StandardGate::P(_) => Some(GateFamily::P),
            StandardGate::CRx(_) => Some(GateFamily::CRx),
            StandardGate::CRy(_) => Some(GateFamily::CRy),
            StandardGate::CRz(_) => Some(GateFamily::CRz),
            _ => None,
        }
    }

    /// The angle of a single-angle gate.
    pub fn angle(&self) -> Option<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p) => Some(p),
            _ => None,
        }
    }

    /// Rebuild a single-angle gate with a different angle.
    ///
    /// Returns `None` for gates without exactly one angle.
    pub fn with_angle(&self, angle: ParameterExpression) -> Option<StandardGate> {
        self.family().map(|family| family.build(angle))
    }

    /// The exact inverse, when it is expressible as a standard gate.
    ///
    /// `iswap` has no standard-gate inverse and yields `None`.
    pub fn inverse(&self) -> Option<StandardGate> {
        let inv = match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::U(theta, phi, lambda) => {
                StandardGate::U(theta.negated(), lambda.negated(), phi.negated())
            }
            StandardGate::ISwap => return None,
            gate => match (gate.family(), gate.angle()) {
                (Some(family), Some(angle)) => family.build(angle.negated()),
                // Remaining gates are Hermitian.
                _ => gate.clone(),
            },
        };
        Some(inv)
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.parameters();
        if params.is_empty() {
            return write!(f, "{}", self.name());
        }
        let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.name(), rendered.join(", "))
    }
}

/// A single-angle gate family, i.e. a gate still awaiting its angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateFamily {
    /// `rx(θ)`
    Rx,
    /// `ry(θ)`
    Ry,
    /// `rz(θ)`
    Rz,
    /// `p(λ)`
    P,
    /// `crx(θ)`
    CRx,
    /// `cry(θ)`
    CRy,
    /// `crz(θ)`
    CRz,
}

impl GateFamily {
    /// Name shared by every gate of this family.
    pub fn name(self) -> &'static str {
        match self {
            GateFamily::Rx => "rx",
            GateFamily::Ry => "ry",
            GateFamily::Rz => "rz",
            GateFamily::P => "p",
            GateFamily::CRx => "crx",
            GateFamily::CRy => "cry",
            GateFamily::CRz => "crz",
        }
    }

    /// Look a family up by gate name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rx" => Some(GateFamily::Rx),
            "ry" => Some(GateFamily::Ry),
            "rz" => Some(GateFamily::Rz),
            "p" => Some(GateFamily::P),
            "crx" => Some(GateFamily::CRx),
            "cry" => Some(GateFamily::CRy),
            "crz" => Some(GateFamily::CRz),
            _ => None,
        }
    }

    /// Construct a gate of this family.
    pub fn build(self, angle: impl Into<ParameterExpression>) -> StandardGate {
        let angle = angle.into();
        match self {
            GateFamily::Rx => StandardGate::Rx(angle),
            GateFamily::Ry => StandardGate::Ry(angle),
            GateFamily::Rz => StandardGate::Rz(angle),
            GateFamily::P => StandardGate::P(angle),
            GateFamily::CRx => StandardGate::CRx(angle),
            GateFamily::CRy => StandardGate::CRy(angle),
            GateFamily::CRz => StandardGate::CRz(angle),
        }
    }

    /// Number of qubits of gates in this family.
    pub fn num_qubits(self) -> u32 {
        match self {
            GateFamily::CRx | GateFamily::CRy | GateFamily::CRz => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for GateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Either a fully specified gate or a family awaiting its angle.
///
/// This is the shape a gate takes when it is handed around before use,
/// e.g. to a noise dispatcher that must treat `rx` differently from
/// `rx(0.3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateTemplate {
    /// A gate family; constructing a gate needs an angle.
    Family(GateFamily),
    /// A concrete gate.
    Fixed(StandardGate),
}

impl GateTemplate {
    /// Gate name, shared by a family and the gates it builds.
    pub fn name(&self) -> &'static str {
        match self {
            GateTemplate::Family(family) => family.name(),
            GateTemplate::Fixed(gate) => gate.name(),
        }
    }
}

impl From<GateFamily> for GateTemplate {
    fn from(family: GateFamily) -> Self {
        GateTemplate::Family(family)
    }
}

impl From<StandardGate> for GateTemplate {
    fn from(gate: StandardGate) -> Self {
        GateTemplate::Fixed(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_family_round_trip() {
        let gate = GateFamily::Ry.build(0.25);
        assert_eq!(gate.family(), Some(GateFamily::Ry));
        assert_eq!(gate.angle().and_then(ParameterExpression::as_f64), Some(0.25));
        assert_eq!(GateFamily::from_name("ry"), Some(GateFamily::Ry));
        assert_eq!(GateFamily::from_name("h"), None);
        assert!(StandardGate::H.with_angle(0.1.into()).is_none());
    }

    #[test]
    fn test_inverse() {
        assert_eq!(StandardGate::S.inverse(), Some(StandardGate::Sdg));
        assert_eq!(StandardGate::H.inverse(), Some(StandardGate::H));
        assert_eq!(StandardGate::CX.inverse(), Some(StandardGate::CX));
        assert_eq!(StandardGate::ISwap.inverse(), None);
        assert_eq!(
            StandardGate::Rz(ParameterExpression::constant(0.4)).inverse(),
            Some(StandardGate::Rz(ParameterExpression::constant(-0.4)))
        );
        assert_eq!(
            StandardGate::U(0.1.into(), 0.2.into(), 0.3.into()).inverse(),
            Some(StandardGate::U((-0.1).into(), (-0.3).into(), (-0.2).into()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(StandardGate::CX.to_string(), "cx");
        assert_eq!(StandardGate::Rx(0.5.into()).to_string(), "rx(0.5)");
        assert_eq!(GateTemplate::from(GateFamily::Rz).name(), "rz");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(StandardGate::from_name("cx"), Some(StandardGate::CX));
        assert_eq!(StandardGate::from_name("rx"), None);
        for name in ["id", "h", "sdg", "swap", "ccx"] {
            assert_eq!(StandardGate::from_name(name).map(|g| g.name()), Some(name));
        }
    }
}
