//! # QSCORE Noise
//!
//! Decoherence model for the QSCORE scoring engine.
//!
//! The model carries the parameters of the noise/renormalization stage:
//! whether a bounded stochastic perturbation is applied, and its
//! magnitude. Application to a state vector lives in `qscore_sim`.
//!
//! ## Quick Start
//!
//! ```rust
//! use qscore_noise::prelude::*;
//!
//! // Renormalization only
//! let ideal = NoiseModel::ideal();
//! assert!(ideal.is_ideal());
//!
//! // Bounded perturbation at one-tenth of unit scale
//! let noisy = NoiseModel::decoherent();
//! assert_eq!(noisy.perturbation_scale(), 0.1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Decoherence stage parameters
pub mod noise_model;

pub use noise_model::NoiseModel;

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::noise_model::NoiseModel;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
