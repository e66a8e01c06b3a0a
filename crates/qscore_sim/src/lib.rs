//! # QSCORE Sim
//!
//! State vector kernel, operators, and measurement for the QSCORE
//! scoring engine.
//!
//! The simulator is self-contained: a register is a `Vec` of 2^n complex
//! amplitudes, gates are applied through a snapshot kernel, and every
//! stochastic step draws from an injectable random source.
//!
//! ## Quick Start
//!
//! ```rust
//! use qscore_core::prelude::*;
//! use qscore_sim::prelude::*;
//!
//! // Uniform superposition over 2 qubits
//! let circuit = CircuitBuilder::new(2).h_layer().build();
//! let mut state = StateVector::new(2).unwrap();
//! state.apply_circuit(&circuit).unwrap();
//!
//! let probs = measure::distribution(&state).unwrap();
//! assert!((probs[0] - 0.25).abs() < 1e-9);
//! ```
//!
//! ## Sampling
//!
//! ```rust
//! use qscore_sim::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let state = StateVector::new(3).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // A basis state always samples to itself
//! assert_eq!(measure::sample(&state, &mut rng).unwrap(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Amplitude register and operator kernels
pub mod state;

/// Distribution, sampling, and derived statistics
pub mod measure;

pub use state::StateVector;

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::measure;
    pub use crate::state::StateVector;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qscore_core::prelude::*;
    use qscore_noise::NoiseModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_schedule_to_distribution() {
        // Mixing layer, per-variable rotations, diffusion, noise stage,
        // then a clean distribution
        let circuit = CircuitBuilder::new(3)
            .h_layer()
            .cphase(0, 1, 0.4)
            .cphase(1, 2, 0.8)
            .build();

        let mut state = StateVector::new(3).unwrap();
        state.apply_circuit(&circuit).unwrap();
        state.diffuse();

        let mut rng = StdRng::seed_from_u64(5);
        state.apply_noise(&NoiseModel::ideal(), &mut rng).unwrap();

        let probs = measure::distribution(&state).unwrap();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fourier_distribution_is_uniform() {
        let circuit = CircuitBuilder::new(3).fourier().build();
        let mut state = StateVector::new(3).unwrap();
        state.apply_circuit(&circuit).unwrap();

        let probs = measure::distribution(&state).unwrap();
        for p in &probs {
            assert!((p - 0.125).abs() < 1e-9);
        }
        assert!((measure::purity(&probs) - 0.125).abs() < 1e-9);
        assert!((measure::normalized_entropy(&probs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_single_qubit_register() {
        let mut state = StateVector::new(1).unwrap();
        state.apply_mixing(0).unwrap();
        let probs = measure::distribution(&state).unwrap();
        assert!((probs[0] - 0.5).abs() < 1e-9);
        assert!((probs[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_register_rejected_without_allocating() {
        let err = StateVector::new(register::MAX_QUBITS + 8).unwrap_err();
        assert_eq!(
            err,
            QscoreError::InvalidQubitCount {
                qubits: register::MAX_QUBITS + 8,
                max: register::MAX_QUBITS
            }
        );
    }
}
