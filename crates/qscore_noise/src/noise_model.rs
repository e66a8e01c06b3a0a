//! Noise model for QSCORE
//!
//! Parameters for the decoherence/renormalization stage. The model is
//! data only; the simulator crate applies it to a state vector.

use qscore_core::constants::noise::{DEFAULT_PERTURBATION_SCALE, MAX_PERTURBATION_SCALE};
use qscore_core::error::{QscoreError, QscoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoherence stage parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Whether the stochastic perturbation is applied
    decoherence: bool,

    /// Perturbation magnitude: each amplitude component is shifted by a
    /// uniform draw from [-scale, +scale] before the final renormalization
    perturbation_scale: f64,
}

impl NoiseModel {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new noise model with validation
    pub fn new(decoherence: bool, perturbation_scale: f64) -> QscoreResult<Self> {
        let model = Self {
            decoherence,
            perturbation_scale,
        };
        model.validate()?;
        Ok(model)
    }

    /// Ideal model: no perturbation, the stage only renormalizes
    pub fn ideal() -> Self {
        Self {
            decoherence: false,
            perturbation_scale: 0.0,
        }
    }

    /// Decoherent model with the default perturbation scale
    pub fn decoherent() -> Self {
        Self {
            decoherence: true,
            perturbation_scale: DEFAULT_PERTURBATION_SCALE,
        }
    }

    /// Decoherent model with an explicit perturbation scale
    pub fn decoherent_with_scale(perturbation_scale: f64) -> QscoreResult<Self> {
        Self::new(true, perturbation_scale)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set the perturbation scale
    pub fn with_scale(mut self, perturbation_scale: f64) -> QscoreResult<Self> {
        self.perturbation_scale = perturbation_scale;
        self.validate()?;
        Ok(self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether the stochastic perturbation is applied
    pub fn decoherence(&self) -> bool {
        self.decoherence
    }

    /// Perturbation magnitude
    pub fn perturbation_scale(&self) -> f64 {
        self.perturbation_scale
    }

    /// Check if model performs no perturbation at all
    pub fn is_ideal(&self) -> bool {
        !self.decoherence || self.perturbation_scale == 0.0
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate the perturbation scale
    pub fn validate(&self) -> QscoreResult<()> {
        if !self.perturbation_scale.is_finite()
            || !(0.0..=MAX_PERTURBATION_SCALE).contains(&self.perturbation_scale)
        {
            return Err(QscoreError::InvalidNoiseScale(self.perturbation_scale));
        }
        Ok(())
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::ideal()
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NoiseModel(decoherence={}, scale={:.3})",
            self.decoherence, self.perturbation_scale
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_model() {
        let model = NoiseModel::ideal();
        assert!(model.is_ideal());
        assert!(!model.decoherence());
        assert_eq!(model.perturbation_scale(), 0.0);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_decoherent_default_scale() {
        let model = NoiseModel::decoherent();
        assert!(model.decoherence());
        assert_eq!(model.perturbation_scale(), DEFAULT_PERTURBATION_SCALE);
        assert!(!model.is_ideal());
    }

    #[test]
    fn test_scale_out_of_range() {
        assert!(NoiseModel::decoherent_with_scale(0.6).is_err());
        assert!(NoiseModel::decoherent_with_scale(-0.1).is_err());
        assert!(NoiseModel::decoherent_with_scale(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_scale_decoherent_is_ideal() {
        // Decoherence with zero scale degenerates to pure renormalization
        let model = NoiseModel::decoherent_with_scale(0.0).unwrap();
        assert!(model.is_ideal());
    }

    #[test]
    fn test_with_scale() {
        let model = NoiseModel::decoherent().with_scale(0.05).unwrap();
        assert_eq!(model.perturbation_scale(), 0.05);
        assert!(NoiseModel::decoherent().with_scale(1.0).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let model = NoiseModel::decoherent_with_scale(0.2).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: NoiseModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
