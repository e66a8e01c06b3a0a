//! Circuit structure for QSCORE
//!
//! An ordered gate list over a fixed-width register. Gates are validated
//! as they are added; the qubit count bounds the state vector a circuit
//! may later be applied to.

use crate::error::QscoreResult;
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ordered gate sequence plus qubit count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_qubits: usize, gates: Vec<Gate>) -> QscoreResult<Self> {
        let circuit = Self {
            num_qubits,
            gates,
            name: None,
        };
        circuit.validate_gates()?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate, validating it against this circuit's register width
    pub fn add_gate(&mut self, gate: Gate) -> QscoreResult<()> {
        gate.validate(self.num_qubits)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QscoreResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count general unitary gates
    pub fn count_unitary(&self) -> usize {
        self.gates.iter().filter(|g| g.is_unitary()).count()
    }

    /// Count phase rotations (controlled or not)
    pub fn count_phase(&self) -> usize {
        self.gates.iter().filter(|g| g.is_phase()).count()
    }

    /// Count controlled phase rotations
    pub fn count_controlled(&self) -> usize {
        self.gates.iter().filter(|g| g.is_controlled()).count()
    }

    /// Get set of qubits touched by at least one gate
    pub fn used_qubits(&self) -> HashSet<QubitId> {
        self.gates.iter().flat_map(|g| g.qubits()).collect()
    }

    /// Validate every gate against the register width
    pub fn validate_gates(&self) -> QscoreResult<()> {
        for gate in &self.gates {
            gate.validate(self.num_qubits)?;
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} gates){}",
            self.num_qubits,
            self.gates.len(),
            self.name
                .as_deref()
                .map(|n| format!(" '{}'", n))
                .unwrap_or_default()
        )?;
        for gate in &self.gates {
            writeln!(f, "  {}", gate)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
