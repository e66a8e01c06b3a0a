//! State vector and operator kernels for QSCORE
//!
//! An n-qubit register is 2^n complex amplitudes. The register is owned
//! by one circuit execution: created in the basis state |0...0>, evolved
//! gate by gate, and discarded once a score has been extracted.

use num_complex::Complex64;
use qscore_core::constants::numeric::NORM_TOLERANCE;
use qscore_core::constants::register::{state_len, MAX_QUBITS};
use qscore_core::error::{QscoreError, QscoreResult};
use qscore_core::gate::{Gate, GateMatrix};
use qscore_core::types::{Angle, QubitId};
use qscore_core::Circuit;
use qscore_noise::NoiseModel;
use rand::Rng;
use std::fmt;

/// n-qubit amplitude register
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    num_qubits: usize,

    /// 2^n complex amplitudes, indexed by basis-state id
    amps: Vec<Complex64>,
}

impl StateVector {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create the basis state |0...0> for an n-qubit register.
    ///
    /// The qubit count is checked before the 2^n allocation happens.
    pub fn new(num_qubits: usize) -> QscoreResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(QscoreError::InvalidQubitCount {
                qubits: num_qubits,
                max: MAX_QUBITS,
            });
        }

        let mut amps = vec![Complex64::new(0.0, 0.0); state_len(num_qubits)];
        amps[0] = Complex64::new(1.0, 0.0);

        Ok(Self { num_qubits, amps })
    }

    /// Create from explicit amplitudes.
    ///
    /// The length must be a power of two between 2 and 2^MAX_QUBITS and
    /// every entry must be finite. No normalization is performed.
    pub fn from_amplitudes(amps: Vec<Complex64>) -> QscoreResult<Self> {
        let len = amps.len();
        if len < 2 || !len.is_power_of_two() || len > state_len(MAX_QUBITS) {
            return Err(QscoreError::InvalidQubitCount {
                qubits: len.trailing_zeros() as usize,
                max: MAX_QUBITS,
            });
        }
        if amps.iter().any(|c| !c.re.is_finite() || !c.im.is_finite()) {
            return Err(QscoreError::NumericalInstability(
                "non-finite amplitude".to_string(),
            ));
        }

        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amps,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get number of basis states (2^n)
    pub fn len(&self) -> usize {
        self.amps.len()
    }

    /// Always false: a register has at least two amplitudes
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the amplitude slice
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amps
    }

    /// Get one amplitude
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amps.get(index).copied()
    }

    /// Raw probabilities |a_i|^2, without drift correction.
    ///
    /// Use `measure::distribution` for the checked, renormalizing form.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|c| c.norm_sqr()).collect()
    }

    // ========================================================================
    // Norm
    // ========================================================================

    /// L2 norm of the amplitude vector
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Squared L2 norm (sum of squared magnitudes)
    pub fn norm_squared(&self) -> f64 {
        self.amps.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Check the unit-norm invariant within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_squared() - 1.0).abs() <= tolerance
    }

    /// Divide every amplitude by the current norm
    pub fn renormalize(&mut self) -> QscoreResult<()> {
        let norm = self.norm();
        if !norm.is_finite() {
            return Err(QscoreError::NumericalInstability(
                "non-finite norm".to_string(),
            ));
        }
        if norm == 0.0 {
            return Err(QscoreError::DegenerateState);
        }
        for amp in &mut self.amps {
            *amp /= norm;
        }
        Ok(())
    }

    /// Fail with NumericalInstability if any amplitude is NaN/Inf
    pub fn check_finite(&self) -> QscoreResult<()> {
        if self
            .amps
            .iter()
            .any(|c| !c.re.is_finite() || !c.im.is_finite())
        {
            return Err(QscoreError::NumericalInstability(
                "non-finite amplitude".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Gate Application Kernel
    // ========================================================================

    /// Apply a 2x2 unitary to one target qubit.
    ///
    /// Accumulates into a freshly zeroed buffer: two source indices write
    /// into the same destination, so computing in place would corrupt
    /// the result.
    pub fn apply_unitary(&mut self, matrix: &GateMatrix, target: QubitId) -> QscoreResult<()> {
        if target >= self.num_qubits {
            return Err(QscoreError::QubitOutOfRange {
                qubit: target,
                num_qubits: self.num_qubits,
            });
        }
        if matrix
            .iter()
            .flatten()
            .any(|c| !c.re.is_finite() || !c.im.is_finite())
        {
            return Err(QscoreError::InvalidGate(
                "matrix entries must be finite".to_string(),
            ));
        }

        let mask = 1usize << target;
        let mut next = vec![Complex64::new(0.0, 0.0); self.amps.len()];

        for (i, &amp) in self.amps.iter().enumerate() {
            let bit = (i >> target) & 1;
            for (new_bit, row) in matrix.iter().enumerate() {
                let j = if new_bit == bit { i } else { i ^ mask };
                next[j] += row[bit] * amp;
            }
        }

        self.amps = next;
        Ok(())
    }

    /// Apply the Hadamard-like mixing gate to one qubit
    pub fn apply_mixing(&mut self, target: QubitId) -> QscoreResult<()> {
        self.apply_unitary(&qscore_core::MIXING_MATRIX, target)
    }

    // ========================================================================
    // Phase Operator
    // ========================================================================

    /// Apply a diagonal phase rotation.
    ///
    /// Each basis index whose control bit is 1 (every index when
    /// `control` is None) is multiplied by exp(+i*angle/2) when its
    /// target bit is 0 and exp(-i*angle/2) when it is 1. Magnitudes are
    /// untouched; there is no basis mixing.
    pub fn apply_phase(
        &mut self,
        target: QubitId,
        control: Option<QubitId>,
        angle: Angle,
    ) -> QscoreResult<()> {
        if target >= self.num_qubits {
            return Err(QscoreError::QubitOutOfRange {
                qubit: target,
                num_qubits: self.num_qubits,
            });
        }
        if let Some(c) = control {
            if c >= self.num_qubits {
                return Err(QscoreError::QubitOutOfRange {
                    qubit: c,
                    num_qubits: self.num_qubits,
                });
            }
            if c == target {
                return Err(QscoreError::InvalidGate(format!(
                    "control and target are both qubit {}",
                    target
                )));
            }
        }
        if !angle.is_finite() {
            return Err(QscoreError::InvalidAngle(angle));
        }

        let plus = Complex64::from_polar(1.0, angle / 2.0);
        let minus = Complex64::from_polar(1.0, -angle / 2.0);
        let target_mask = 1usize << target;
        let control_mask = control.map(|c| 1usize << c);

        for (i, amp) in self.amps.iter_mut().enumerate() {
            if let Some(mask) = control_mask {
                if i & mask == 0 {
                    continue;
                }
            }
            *amp *= if i & target_mask == 0 { plus } else { minus };
        }

        Ok(())
    }

    /// Controlled phase rotation (control bit must be 1)
    pub fn apply_controlled_phase(
        &mut self,
        control: QubitId,
        target: QubitId,
        angle: Angle,
    ) -> QscoreResult<()> {
        self.apply_phase(target, Some(control), angle)
    }

    // ========================================================================
    // Diffusion
    // ========================================================================

    /// Elementwise inversion about the mean: a_i <- 2*mean - a_i over the
    /// raw complex amplitudes.
    ///
    /// The unit-norm invariant is not part of this operator's contract;
    /// renormalize before treating the result as a probability source.
    pub fn diffuse(&mut self) {
        let len = self.amps.len() as f64;
        let mean = self.amps.iter().copied().sum::<Complex64>() / len;
        for amp in &mut self.amps {
            *amp = mean * 2.0 - *amp;
        }
    }

    // ========================================================================
    // Gate / Circuit Dispatch
    // ========================================================================

    /// Apply one gate
    pub fn apply_gate(&mut self, gate: &Gate) -> QscoreResult<()> {
        match gate {
            Gate::Unitary { target, matrix } => self.apply_unitary(matrix, *target),
            Gate::Phase {
                target,
                control,
                angle,
            } => self.apply_phase(*target, *control, *angle),
        }
    }

    /// Apply every gate of a circuit in order
    pub fn apply_circuit(&mut self, circuit: &Circuit) -> QscoreResult<()> {
        if circuit.num_qubits() != self.num_qubits {
            return Err(QscoreError::RegisterMismatch {
                circuit: circuit.num_qubits(),
                register: self.num_qubits,
            });
        }
        for gate in circuit.gates() {
            self.apply_gate(gate)?;
        }
        Ok(())
    }

    // ========================================================================
    // Noise / Renormalization Stage
    // ========================================================================

    /// Renormalize, then (when the model's decoherence flag is set) add a
    /// bounded zero-mean complex perturbation to every amplitude and
    /// renormalize again.
    pub fn apply_noise<R: Rng + ?Sized>(
        &mut self,
        model: &NoiseModel,
        rng: &mut R,
    ) -> QscoreResult<()> {
        model.validate()?;
        self.renormalize()?;

        if model.decoherence() && model.perturbation_scale() > 0.0 {
            let scale = model.perturbation_scale();
            for amp in &mut self.amps {
                let re: f64 = rng.gen_range(-scale..=scale);
                let im: f64 = rng.gen_range(-scale..=scale);
                *amp += Complex64::new(re, im);
            }
            self.renormalize()?;
        }

        Ok(())
    }

    /// Check the unit-norm invariant at the default unitary-path tolerance
    pub fn assert_unit_norm(&self) -> QscoreResult<()> {
        self.check_finite()?;
        if !self.is_normalized(NORM_TOLERANCE) {
            return Err(QscoreError::NumericalInstability(format!(
                "norm drifted to {}",
                self.norm()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateVector({} qubits, {} amplitudes, norm={:.6})",
            self.num_qubits,
            self.amps.len(),
            self.norm()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
