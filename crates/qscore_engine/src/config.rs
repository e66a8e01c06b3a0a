//! Engine configuration for QSCORE
//!
//! Selects the operator sequence, advantage metric, noise model, and
//! random seed for one orchestrator invocation. Validation is fail-fast
//! and happens before any state allocation.

use qscore_core::constants::register::MAX_QUBITS;
use qscore_core::constants::scoring::MAX_DIFFUSION_ROUNDS;
use qscore_core::error::{QscoreError, QscoreResult};
use qscore_noise::NoiseModel;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Operator Sequence
// ============================================================================

/// Which operator schedule the orchestrator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorSequence {
    /// Mixing layer, per-variable phase rotations, then K diffusion rounds
    Amplify {
        /// Number of diffusion rounds after the rotations
        rounds: usize,
    },

    /// Fourier transform schedule, then per-variable phase rotations
    Fourier,
}

impl OperatorSequence {
    /// Get sequence name
    pub fn name(&self) -> &'static str {
        match self {
            OperatorSequence::Amplify { .. } => "amplify",
            OperatorSequence::Fourier => "fourier",
        }
    }

    /// Diffusion rounds this sequence performs
    pub fn diffusion_rounds(&self) -> usize {
        match self {
            OperatorSequence::Amplify { rounds } => *rounds,
            OperatorSequence::Fourier => 0,
        }
    }
}

impl Default for OperatorSequence {
    fn default() -> Self {
        OperatorSequence::Amplify { rounds: 1 }
    }
}

impl fmt::Display for OperatorSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorSequence::Amplify { rounds } => write!(f, "amplify({})", rounds),
            OperatorSequence::Fourier => write!(f, "fourier"),
        }
    }
}

// ============================================================================
// Advantage Metric
// ============================================================================

/// Scalar reduction applied to the final distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdvantageMetric {
    /// Sum of squared probabilities (coherence)
    #[default]
    Purity,
    /// Shannon entropy normalized by qubit count
    Entropy,
}

impl AdvantageMetric {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "purity" | "coherence" => Some(AdvantageMetric::Purity),
            "entropy" => Some(AdvantageMetric::Entropy),
            _ => None,
        }
    }
}

impl fmt::Display for AdvantageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvantageMetric::Purity => write!(f, "purity"),
            AdvantageMetric::Entropy => write!(f, "entropy"),
        }
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Configuration for one orchestrator invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Register width in qubits
    pub qubits: usize,

    /// Operator schedule to run
    pub sequence: OperatorSequence,

    /// Scalar reduction for the advantage score
    pub metric: AdvantageMetric,

    /// Noise/renormalization stage parameters
    pub noise: NoiseModel,

    /// Random seed for reproducible runs
    pub seed: Option<u64>,

    /// Retain the full probability distribution in the report
    pub return_distribution: bool,

    /// Draw one sampled basis index into the report
    pub sample_outcome: bool,
}

impl EngineConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Amplification schedule with the given diffusion rounds
    pub fn amplify(qubits: usize, rounds: usize) -> Self {
        Self {
            qubits,
            sequence: OperatorSequence::Amplify { rounds },
            metric: AdvantageMetric::default(),
            noise: NoiseModel::ideal(),
            seed: None,
            return_distribution: false,
            sample_outcome: false,
        }
    }

    /// Fourier schedule
    pub fn fourier(qubits: usize) -> Self {
        Self {
            sequence: OperatorSequence::Fourier,
            ..Self::amplify(qubits, 0)
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set the advantage metric
    pub fn with_metric(mut self, metric: AdvantageMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the noise model
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = noise;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Retain the full distribution in the report
    pub fn with_distribution(mut self, enabled: bool) -> Self {
        self.return_distribution = enabled;
        self
    }

    /// Draw one sampled outcome into the report
    pub fn with_sample(mut self, enabled: bool) -> Self {
        self.sample_outcome = enabled;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration; no memory is allocated on failure
    pub fn validate(&self) -> QscoreResult<()> {
        if self.qubits == 0 || self.qubits > MAX_QUBITS {
            return Err(QscoreError::InvalidQubitCount {
                qubits: self.qubits,
                max: MAX_QUBITS,
            });
        }

        if let OperatorSequence::Amplify { rounds } = self.sequence {
            if rounds > MAX_DIFFUSION_ROUNDS {
                return Err(QscoreError::UnsupportedSequence(format!(
                    "{} diffusion rounds exceed maximum {}",
                    rounds, MAX_DIFFUSION_ROUNDS
                )));
            }
        }

        self.noise.validate()?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::amplify(8, 1)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EngineConfig({}Q, {}, metric={}, {})",
            self.qubits, self.sequence, self.metric, self.noise
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
    fn test_amplify_preset() {
        let config = EngineConfig::amplify(8, 3);
        assert_eq!(config.qubits, 8);
        assert_eq!(config.sequence.diffusion_rounds(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fourier_preset() {
        let config = EngineConfig::fourier(5);
        assert_eq!(config.sequence, OperatorSequence::Fourier);
        assert_eq!(config.sequence.diffusion_rounds(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_qubit_bounds() {
        assert!(matches!(
            EngineConfig::amplify(0, 1).validate(),
            Err(QscoreError::InvalidQubitCount { .. })
        ));
        assert!(matches!(
            EngineConfig::amplify(MAX_QUBITS + 1, 1).validate(),
            Err(QscoreError::InvalidQubitCount { .. })
        ));
        assert!(EngineConfig::amplify(1, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_diffusion_rounds() {
        let config = EngineConfig::amplify(4, MAX_DIFFUSION_ROUNDS + 1);
        assert!(matches!(
            config.validate(),
            Err(QscoreError::UnsupportedSequence(_))
        ));
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::fourier(6)
            .with_metric(AdvantageMetric::Entropy)
            .with_noise(NoiseModel::decoherent())
            .with_seed(42)
            .with_distribution(true)
            .with_sample(true);

        assert_eq!(config.metric, AdvantageMetric::Entropy);
        assert_eq!(config.seed, Some(42));
        assert!(config.return_distribution);
        assert!(config.sample_outcome);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!(AdvantageMetric::parse("purity"), Some(AdvantageMetric::Purity));
        assert_eq!(
            AdvantageMetric::parse("Entropy"),
            Some(AdvantageMetric::Entropy)
        );
        assert_eq!(AdvantageMetric::parse("bogus"), None);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = EngineConfig::amplify(8, 2).with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
