//! Gate definitions for QSCORE
//!
//! Two gate shapes cover everything the engine runs: a general 2x2
//! complex unitary on one target qubit, and a diagonal phase rotation
//! that may be gated on a control qubit.

use crate::error::{QscoreError, QscoreResult};
use crate::types::{Angle, QubitId};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// 2x2 complex gate matrix, row-major: `matrix[new_bit][old_bit]`
pub type GateMatrix = [[Complex64; 2]; 2];

/// The fixed Hadamard-like mixing matrix: 1/sqrt(2) * [[1, 1], [1, -1]]
pub const MIXING_MATRIX: GateMatrix = [
    [
        Complex64::new(FRAC_1_SQRT_2, 0.0),
        Complex64::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex64::new(FRAC_1_SQRT_2, 0.0),
        Complex64::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

/// Single gate operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// General single-qubit unitary applied to one target qubit
    Unitary {
        /// Target qubit index
        target: QubitId,
        /// 2x2 complex matrix
        matrix: GateMatrix,
    },

    /// Diagonal phase rotation, optionally gated on a control qubit.
    ///
    /// Basis indices whose control bit is 1 (all indices when `control`
    /// is `None`) are multiplied by `exp(+i*angle/2)` when the target
    /// bit is 0 and `exp(-i*angle/2)` when it is 1. No basis mixing.
    Phase {
        /// Target qubit index
        target: QubitId,
        /// Optional control qubit index
        control: Option<QubitId>,
        /// Rotation angle in radians
        angle: Angle,
    },
}

impl Gate {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Hadamard-like mixing gate on `target`
    pub fn hadamard(target: QubitId) -> Self {
        Gate::Unitary {
            target,
            matrix: MIXING_MATRIX,
        }
    }

    /// General unitary gate from a fixed 2x2 matrix
    pub fn unitary(target: QubitId, matrix: GateMatrix) -> Self {
        Gate::Unitary { target, matrix }
    }

    /// General unitary gate from dynamically-shaped rows.
    ///
    /// Rejects anything that is not exactly 2x2.
    pub fn unitary_from_rows(target: QubitId, rows: &[Vec<Complex64>]) -> QscoreResult<Self> {
        if rows.len() != 2 || rows.iter().any(|r| r.len() != 2) {
            return Err(QscoreError::InvalidGate(format!(
                "gate matrix must be 2x2, got {}x{}",
                rows.len(),
                rows.first().map_or(0, |r| r.len())
            )));
        }
        let matrix = [[rows[0][0], rows[0][1]], [rows[1][0], rows[1][1]]];
        Ok(Gate::Unitary { target, matrix })
    }

    /// Uncontrolled phase rotation on `target`
    pub fn phase(target: QubitId, angle: Angle) -> Self {
        Gate::Phase {
            target,
            control: None,
            angle,
        }
    }

    /// Controlled phase rotation: rotates `target` where bit `control` is 1
    pub fn controlled_phase(control: QubitId, target: QubitId, angle: Angle) -> Self {
        Gate::Phase {
            target,
            control: Some(control),
            angle,
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate this gate against a register of `num_qubits` qubits
    pub fn validate(&self, num_qubits: usize) -> QscoreResult<()> {
        for &qubit in &self.qubits() {
            if qubit >= num_qubits {
                return Err(QscoreError::QubitOutOfRange { qubit, num_qubits });
            }
        }

        match self {
            Gate::Unitary { matrix, .. } => {
                let finite = matrix
                    .iter()
                    .flatten()
                    .all(|c| c.re.is_finite() && c.im.is_finite());
                if !finite {
                    return Err(QscoreError::InvalidGate(
                        "matrix entries must be finite".to_string(),
                    ));
                }
            }
            Gate::Phase { target, control, angle } => {
                if !angle.is_finite() {
                    return Err(QscoreError::InvalidAngle(*angle));
                }
                if *control == Some(*target) {
                    return Err(QscoreError::InvalidGate(format!(
                        "control and target are both qubit {}",
                        target
                    )));
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Unitary { target, .. } => vec![*target],
            Gate::Phase { target, control, .. } => match control {
                Some(c) => vec![*c, *target],
                None => vec![*target],
            },
        }
    }

    /// Target qubit of this gate
    pub fn target(&self) -> QubitId {
        match self {
            Gate::Unitary { target, .. } | Gate::Phase { target, .. } => *target,
        }
    }

    /// Check if gate is a general unitary
    pub fn is_unitary(&self) -> bool {
        matches!(self, Gate::Unitary { .. })
    }

    /// Check if gate is a diagonal phase rotation
    pub fn is_phase(&self) -> bool {
        matches!(self, Gate::Phase { .. })
    }

    /// Check if gate is gated on a control qubit
    pub fn is_controlled(&self) -> bool {
        matches!(
            self,
            Gate::Phase {
                control: Some(_),
                ..
            }
        )
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Unitary { .. } => "unitary",
            Gate::Phase { control: None, .. } => "phase",
            Gate::Phase {
                control: Some(_), ..
            } => "cphase",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Unitary { target, .. } => write!(f, "unitary q[{}]", target),
            Gate::Phase {
                target,
                control: None,
                angle,
            } => write!(f, "phase({}) q[{}]", angle, target),
            Gate::Phase {
                target,
                control: Some(c),
                angle,
            } => write!(f, "cphase({}) q[{}],q[{}]", angle, c, target),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
