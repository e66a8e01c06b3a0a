//! # QSCORE Engine
//!
//! Orchestration, domain encoding, and score blending for the QSCORE
//! quantum-circuit scoring engine.
//!
//! The engine consolidates what used to be five near-identical
//! per-domain implementations: one parametrized pipeline plus small
//! domain-to-angle encoding tables and named blend functions.
//!
//! ## Quick Start
//!
//! ```rust
//! use qscore_engine::prelude::*;
//!
//! let orchestrator = Orchestrator::new(
//!     EngineConfig::amplify(6, 2).with_seed(42),
//! ).unwrap();
//!
//! let score = orchestrator.score_domain(
//!     Domain::Business,
//!     &[
//!         ("revenue_potential", 0.5),
//!         ("automation_level", 0.94),
//!         ("risk_resilience", 0.75),
//!     ],
//!     0.85,
//! ).unwrap();
//!
//! assert!(score.blended >= 0.85);
//! assert!(score.blended <= 0.999);
//! ```
//!
//! ## Raw Reports
//!
//! ```rust
//! use qscore_engine::prelude::*;
//!
//! let orchestrator = Orchestrator::new(
//!     EngineConfig::fourier(4)
//!         .with_metric(AdvantageMetric::Entropy)
//!         .with_seed(7)
//!         .with_distribution(true),
//! ).unwrap();
//!
//! let encoding = ProblemEncoding::new("evidence_quality", 0.9, 0.35).unwrap();
//! let report = orchestrator.run(&[encoding]).unwrap();
//!
//! assert_eq!(report.distribution.unwrap().len(), 16);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Engine configuration and operator sequences
pub mod config;

/// Problem encodings and domain tables
pub mod encoding;

/// Named blend functions
pub mod blend;

/// Orchestration pipeline
pub mod pipeline;

/// Result types
pub mod result;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{AdvantageMetric, EngineConfig, OperatorSequence};
pub use encoding::{Domain, DomainProfile, ProblemEncoding, VariableSpec};
pub use pipeline::Orchestrator;
pub use result::{DomainScore, ScoreReport};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qscore_engine::prelude::*;
    //! ```

    pub use crate::blend;
    pub use crate::config::{AdvantageMetric, EngineConfig, OperatorSequence};
    pub use crate::encoding::{Domain, DomainProfile, ProblemEncoding, VariableSpec};
    pub use crate::pipeline::Orchestrator;
    pub use crate::result::{DomainScore, ScoreReport};
    pub use qscore_noise::NoiseModel;
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
