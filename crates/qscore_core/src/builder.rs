//! Circuit builder for QSCORE
//!
//! Fluent builder for gate schedules, including the composite layers the
//! orchestrator sequences: the full mixing layer and the Fourier-style
//! transform schedule.

use crate::circuit::Circuit;
use crate::error::QscoreResult;
use crate::gate::{Gate, GateMatrix};
use crate::types::{Angle, QubitId};
use std::f64::consts::PI;

/// Fluent circuit builder (consuming self pattern)
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
        }
    }

    // ========================================================================
    // Single Gates
    // ========================================================================

    /// Add Hadamard-like mixing gate
    pub fn h(mut self, qubit: QubitId) -> Self {
        let _ = self.circuit.add_gate(Gate::hadamard(qubit));
        self
    }

    /// Add a general 2x2 unitary gate
    pub fn unitary(mut self, qubit: QubitId, matrix: GateMatrix) -> Self {
        let _ = self.circuit.add_gate(Gate::unitary(qubit, matrix));
        self
    }

    /// Add an uncontrolled phase rotation
    pub fn phase(mut self, qubit: QubitId, angle: Angle) -> Self {
        let _ = self.circuit.add_gate(Gate::phase(qubit, angle));
        self
    }

    /// Add a controlled phase rotation
    pub fn cphase(mut self, control: QubitId, target: QubitId, angle: Angle) -> Self {
        let _ = self
            .circuit
            .add_gate(Gate::controlled_phase(control, target, angle));
        self
    }

    // ========================================================================
    // Composite Layers
    // ========================================================================

    /// Mixing layer: Hadamard on every qubit
    pub fn h_layer(mut self) -> Self {
        for qubit in 0..self.circuit.num_qubits() {
            let _ = self.circuit.add_gate(Gate::hadamard(qubit));
        }
        self
    }

    /// Phase rotation on each qubit from a slice of angles
    pub fn phase_layer(mut self, angles: &[Angle]) -> Self {
        for (qubit, &angle) in angles.iter().enumerate().take(self.circuit.num_qubits()) {
            let _ = self.circuit.add_gate(Gate::phase(qubit, angle));
        }
        self
    }

    /// Discrete-Fourier-style transform schedule.
    ///
    /// For each qubit j: a mixing gate on j, then for each k > j a
    /// controlled phase with control k, target j, angle pi / 2^(k-j).
    pub fn fourier(mut self) -> Self {
        let n = self.circuit.num_qubits();
        for j in 0..n {
            let _ = self.circuit.add_gate(Gate::hadamard(j));
            for k in (j + 1)..n {
                let angle = PI / (1u64 << (k - j)) as f64;
                let _ = self.circuit.add_gate(Gate::controlled_phase(k, j, angle));
            }
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build with full gate validation
    pub fn build_validated(self) -> QscoreResult<Circuit> {
        self.circuit.validate_gates()?;
        Ok(self.circuit)
    }

    /// Peek at the circuit under construction
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_h_layer() {
        let circuit = CircuitBuilder::new(4).h_layer().build();
        assert_eq!(circuit.gate_count(), 4);
        assert_eq!(circuit.count_unitary(), 4);
    }

    #[test]
    fn test_phase_layer_truncates_to_width() {
        let circuit = CircuitBuilder::new(2).phase_layer(&[0.1, 0.2, 0.3]).build();
        assert_eq!(circuit.gate_count(), 2);
    }

    #[test]
    fn test_fourier_gate_count() {
        // n H gates plus n*(n-1)/2 controlled phases
        let circuit = CircuitBuilder::new(4).fourier().build();
        assert_eq!(circuit.count_unitary(), 4);
        assert_eq!(circuit.count_controlled(), 6);
    }

    #[test]
    fn test_fourier_angles_halve() {
        let circuit = CircuitBuilder::new(3).fourier().build();

        // First two controlled phases rotate qubit 0: pi/2 from control 1,
        // pi/4 from control 2.
        let angles: Vec<f64> = circuit
            .gates()
            .iter()
            .filter_map(|g| match g {
                Gate::Phase {
                    control: Some(_),
                    angle,
                    target: 0,
                } => Some(*angle),
                _ => None,
            })
            .collect();
        assert_eq!(angles.len(), 2);
        assert_relative_eq!(angles[0], PI / 2.0, max_relative = 1e-12);
        assert_relative_eq!(angles[1], PI / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_gate_dropped_then_caught_by_validated_build() {
        // Builder swallows the range error; build() keeps only valid gates.
        let circuit = CircuitBuilder::new(1).h(0).h(5).build();
        assert_eq!(circuit.gate_count(), 1);
        assert!(circuit.validate_gates().is_ok());
    }

    #[test]
    fn test_build_validated() {
        assert!(CircuitBuilder::new(2)
            .h(0)
            .cphase(0, 1, 0.5)
            .build_validated()
            .is_ok());
    }
}
