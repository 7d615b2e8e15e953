//! Small dense unitaries for gate introspection.
//!
//! Noisy wrappers expose the matrix of one noise realization; these types
//! hold those matrices and the handful of operations tests and callers need
//! (products, adjoints, tolerant comparison).
//!
//! Two-qubit matrices use the basis `|q0 q1⟩` with the first operand as the
//! most significant bit, so a controlled gate with `q0` as control has its
//! target block in the lower-right corner.

use num_complex::Complex64;
use std::f64::consts::PI;

use qnoise_ir::StandardGate;

/// Default tolerance for matrix comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Hadamard.
    pub fn h() -> Self {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Pauli-X.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Pauli-Y.
    pub fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Pauli-Z.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// Diagonal phase gate `diag(1, e^{iλ})`; S, T and their adjoints are
    /// special cases.
    pub fn p(lambda: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda))
    }

    /// sqrt(X); `dagger()` gives sqrt(X)-dagger.
    pub fn sx() -> Self {
        let plus = Complex64::new(0.5, 0.5);
        let minus = Complex64::new(0.5, -0.5);
        Self::new(plus, minus, minus, plus)
    }

    /// `exp(-iθX/2)`.
    pub fn rx(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::new(c, s, s, c)
    }

    /// `exp(-iθY/2)`.
    pub fn ry(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new((theta / 2.0).sin(), 0.0);
        Self::new(c, -s, s, c)
    }

    /// `exp(-iθZ/2)`.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            ZERO,
            ZERO,
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// U(θ, φ, λ).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Matrix product `self * other`.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Check `U·U† ≈ I`.
    pub fn is_unitary(&self) -> bool {
        self.mul(&self.dagger())
            .approx_eq(&Self::identity(), 1e-9)
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A 4x4 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary4x4 {
    /// Matrix elements, row-major.
    pub data: [Complex64; 16],
}

impl Unitary4x4 {
    /// The identity matrix.
    pub fn identity() -> Self {
        let mut data = [ZERO; 16];
        for i in 0..4 {
            data[i * 4 + i] = ONE;
        }
        Self { data }
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * 4 + col]
    }

    /// Controlled gate with `q0` as control and `block` acting on `q1`.
    pub fn controlled(block: &Unitary2x2) -> Self {
        let mut m = Self::identity();
        m.data[2 * 4 + 2] = block.data[0];
        m.data[2 * 4 + 3] = block.data[1];
        m.data[3 * 4 + 2] = block.data[2];
        m.data[3 * 4 + 3] = block.data[3];
        m
    }

    /// Tensor product `a ⊗ b` (`a` on `q0`, `b` on `q1`).
    pub fn kron(a: &Unitary2x2, b: &Unitary2x2) -> Self {
        let mut data = [ZERO; 16];
        for ar in 0..2 {
            for ac in 0..2 {
                let av = a.data[ar * 2 + ac];
                for br in 0..2 {
                    for bc in 0..2 {
                        data[(ar * 2 + br) * 4 + (ac * 2 + bc)] = av * b.data[br * 2 + bc];
                    }
                }
            }
        }
        Self { data }
    }

    /// SWAP.
    pub fn swap() -> Self {
        let mut data = [ZERO; 16];
        data[0] = ONE;
        data[4 + 2] = ONE;
        data[2 * 4 + 1] = ONE;
        data[15] = ONE;
        Self { data }
    }

    /// iSWAP.
    pub fn iswap() -> Self {
        let mut m = Self::swap();
        m.data[4 + 2] = Complex64::new(0.0, 1.0);
        m.data[2 * 4 + 1] = Complex64::new(0.0, 1.0);
        m
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        let mut data = [ZERO; 16];
        for r in 0..4 {
            for c in 0..4 {
                data[r * 4 + c] = (0..4).map(|k| self.get(r, k) * other.get(k, c)).sum();
            }
        }
        Self { data }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let mut data = [ZERO; 16];
        for r in 0..4 {
            for c in 0..4 {
                data[c * 4 + r] = self.get(r, c).conj();
            }
        }
        Self { data }
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Check `U·U† ≈ I`.
    pub fn is_unitary(&self) -> bool {
        self.mul(&self.dagger())
            .approx_eq(&Self::identity(), 1e-9)
    }
}

/// Matrix of a one- or two-qubit operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateMatrix {
    /// Single-qubit matrix.
    Single(Unitary2x2),
    /// Two-qubit matrix.
    Two(Unitary4x4),
}

impl GateMatrix {
    /// Matrix of a standard gate, when all of its parameters are bound.
    ///
    /// Three-qubit gates and symbolic parameters yield `None`.
    pub fn of(gate: &StandardGate) -> Option<Self> {
        let angle = || gate.angle().and_then(|p| p.as_f64());
        let m = match gate {
            StandardGate::I => GateMatrix::Single(Unitary2x2::identity()),
            StandardGate::X => GateMatrix::Single(Unitary2x2::x()),
            StandardGate::Y => GateMatrix::Single(Unitary2x2::y()),
            StandardGate::Z => GateMatrix::Single(Unitary2x2::z()),
            StandardGate::H => GateMatrix::Single(Unitary2x2::h()),
            StandardGate::S => GateMatrix::Single(Unitary2x2::p(PI / 2.0)),
            StandardGate::Sdg => GateMatrix::Single(Unitary2x2::p(-PI / 2.0)),
            StandardGate::T => GateMatrix::Single(Unitary2x2::p(PI / 4.0)),
            StandardGate::Tdg => GateMatrix::Single(Unitary2x2::p(-PI / 4.0)),
            StandardGate::SX => GateMatrix::Single(Unitary2x2::sx()),
            StandardGate::SXdg => GateMatrix::Single(Unitary2x2::sx().dagger()),
            StandardGate::Rx(_) => GateMatrix::Single(Unitary2x2::rx(angle()?)),
            StandardGate::Ry(_) => GateMatrix::Single(Unitary2x2::ry(angle()?)),
            StandardGate::Rz(_) => GateMatrix::Single(Unitary2x2::rz(angle()?)),
            StandardGate::P(_) => GateMatrix::Single(Unitary2x2::p(angle()?)),
            StandardGate::U(theta, phi, lambda) => GateMatrix::Single(Unitary2x2::u(
                theta.as_f64()?,
                phi.as_f64()?,
                lambda.as_f64()?,
            )),
            StandardGate::CX => GateMatrix::Two(Unitary4x4::controlled(&Unitary2x2::x())),
            StandardGate::CY => GateMatrix::Two(Unitary4x4::controlled(&Unitary2x2::y())),
            StandardGate::CZ => GateMatrix::Two(Unitary4x4::controlled(&Unitary2x2::z())),
            StandardGate::Swap => GateMatrix::Two(Unitary4x4::swap()),
            StandardGate::ISwap => GateMatrix::Two(Unitary4x4::iswap()),
            StandardGate::CRx(_) => {
                GateMatrix::Two(Unitary4x4::controlled(&Unitary2x2::rx(angle()?)))
            }
            StandardGate::CRy(_) => {
                GateMatrix::Two(Unitary4x4::controlled(&Unitary2x2::ry(angle()?)))
            }
            StandardGate::CRz(_) => {
                GateMatrix::Two(Unitary4x4::controlled(&Unitary2x2::rz(angle()?)))
            }
            StandardGate::CCX => return None,
        };
        Some(m)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        match self {
            GateMatrix::Single(m) => GateMatrix::Single(m.dagger()),
            GateMatrix::Two(m) => GateMatrix::Two(m.dagger()),
        }
    }

    /// Tolerant comparison; matrices of different size never match.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        match (self, other) {
            (GateMatrix::Single(a), GateMatrix::Single(b)) => a.approx_eq(b, tol),
            (GateMatrix::Two(a), GateMatrix::Two(b)) => a.approx_eq(b, tol),
            _ => false,
        }
    }

    /// Check unitarity.
    pub fn is_unitary(&self) -> bool {
        match self {
            GateMatrix::Single(m) => m.is_unitary(),
            GateMatrix::Two(m) => m.is_unitary(),
        }
    }

    /// The 2x2 matrix, if single-qubit.
    pub fn as_single(&self) -> Option<&Unitary2x2> {
        match self {
            GateMatrix::Single(m) => Some(m),
            GateMatrix::Two(_) => None,
        }
    }

    /// The 4x4 matrix, if two-qubit.
    pub fn as_two(&self) -> Option<&Unitary4x4> {
        match self {
            GateMatrix::Two(m) => Some(m),
            GateMatrix::Single(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations_are_unitary() {
        for theta in [0.0, 0.3, -1.2, PI] {
            assert!(Unitary2x2::rx(theta).is_unitary());
            assert!(Unitary2x2::ry(theta).is_unitary());
            assert!(Unitary2x2::rz(theta).is_unitary());
        }
    }

    #[test]
    fn test_rx_pi_is_x_up_to_phase() {
        let rx_pi = Unitary2x2::rx(PI);
        let minus_i = Complex64::new(0.0, -1.0);
        let expected = Unitary2x2::new(ZERO, minus_i, minus_i, ZERO);
        assert!(rx_pi.approx_eq(&expected, EPSILON));
    }

    #[test]
    fn test_dagger_inverts_rotation() {
        let m = Unitary2x2::ry(0.7);
        assert!(m.dagger().approx_eq(&Unitary2x2::ry(-0.7), EPSILON));
        assert!((m * m.dagger()).approx_eq(&Unitary2x2::identity(), EPSILON));
    }

    #[test]
    fn test_controlled_x_permutes_basis() {
        let cx = Unitary4x4::controlled(&Unitary2x2::x());
        // |10⟩ → |11⟩
        assert_eq!(cx.get(3, 2), ONE);
        assert_eq!(cx.get(2, 2), ZERO);
        assert!(cx.mul(&cx).approx_eq(&Unitary4x4::identity(), EPSILON));
    }

    #[test]
    fn test_kron_with_identity() {
        let m = Unitary4x4::kron(&Unitary2x2::identity(), &Unitary2x2::x());
        // X on q1 flips the low bit.
        assert_eq!(m.get(1, 0), ONE);
        assert_eq!(m.get(3, 2), ONE);
        assert!(m.is_unitary());
    }

    #[test]
    fn test_standard_gate_matrices() {
        let s = GateMatrix::of(&StandardGate::S).unwrap();
        let sdg = GateMatrix::of(&StandardGate::Sdg).unwrap();
        assert!(s.dagger().approx_eq(&sdg, EPSILON));

        assert!(GateMatrix::of(&StandardGate::Rx("theta".into())).is_none());
        assert!(GateMatrix::of(&StandardGate::CCX).is_none());
        assert!(GateMatrix::of(&StandardGate::ISwap).unwrap().is_unitary());
        assert!(GateMatrix::of(&StandardGate::CX).unwrap().as_two().is_some());
    }
}
