//! # QSCORE Core
//!
//! Foundation types, gates, and circuits for the QSCORE quantum-circuit
//! scoring engine.
//!
//! ## Quick Start
//!
//! ```rust
//! use qscore_core::prelude::*;
//!
//! // Build a mixing layer followed by a controlled rotation
//! let circuit = CircuitBuilder::new(3)
//!     .h_layer()
//!     .cphase(0, 1, std::f64::consts::FRAC_PI_2)
//!     .build();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.count_unitary(), 3);
//! ```
//!
//! ## Fourier Schedule
//!
//! ```rust
//! use qscore_core::prelude::*;
//!
//! // Standard discrete-Fourier gate schedule over 4 qubits
//! let circuit = CircuitBuilder::new(4).fourier().build();
//! assert_eq!(circuit.count_unitary(), 4);
//! assert_eq!(circuit.count_controlled(), 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core type aliases and validated wrappers
pub mod types;

/// Register bounds and numeric tolerances
pub mod constants;

/// Error taxonomy
pub mod error;

/// Gate definitions
pub mod gate;

/// Circuit structure
pub mod circuit;

/// Circuit builder
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use constants::{noise, numeric, register, scoring};
pub use error::{QscoreError, QscoreResult};
pub use gate::{Gate, GateMatrix, MIXING_MATRIX};
pub use types::{Angle, BasisIndex, Probability, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qscore_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{noise, numeric, register, scoring};
    pub use crate::error::{QscoreError, QscoreResult};
    pub use crate::gate::{Gate, GateMatrix, MIXING_MATRIX};
    pub use crate::types::{Angle, BasisIndex, Probability, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
