//! Circuit orchestrator for QSCORE
//!
//! Owns one invocation end to end: allocates the register, turns
//! encodings into rotation angles, sequences the operators, runs the
//! noise stage, and reduces the final distribution to scores.

use crate::config::{AdvantageMetric, EngineConfig, OperatorSequence};
use crate::encoding::{Domain, DomainProfile, ProblemEncoding};
use crate::result::{DomainScore, ScoreReport};
use qscore_core::error::QscoreResult;
use qscore_core::types::Probability;
use qscore_core::{Circuit, CircuitBuilder};
use qscore_sim::{measure, StateVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One-invocation scoring pipeline
#[derive(Debug, Clone)]
pub struct Orchestrator {
    /// Validated configuration
    config: EngineConfig,
}

impl Orchestrator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an orchestrator, validating the configuration up front.
    ///
    /// Fails fast: nothing is allocated when the configuration is bad.
    pub fn new(config: EngineConfig) -> QscoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Orchestrator preset for a domain: its historical operator
    /// sequence on an 8-qubit register
    pub fn for_domain(domain: Domain) -> QscoreResult<Self> {
        let config = EngineConfig {
            sequence: domain.default_sequence(),
            ..EngineConfig::amplify(8, 0)
        };
        Self::new(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Circuit Construction
    // ========================================================================

    /// Build the gate schedule for the configured sequence.
    ///
    /// Encoding entry k rotates with control `k mod n` and target
    /// `(k+1) mod n`; on a single-qubit register the rotation is
    /// uncontrolled because no distinct control exists.
    fn build_circuit(&self, encodings: &[ProblemEncoding]) -> Circuit {
        let n = self.config.qubits;
        let mut builder = match self.config.sequence {
            OperatorSequence::Amplify { .. } => CircuitBuilder::new(n).h_layer(),
            OperatorSequence::Fourier => CircuitBuilder::new(n).fourier(),
        };

        for (k, encoding) in encodings.iter().enumerate() {
            let angle = encoding.angle();
            builder = if n == 1 {
                builder.phase(0, angle)
            } else {
                builder.cphase(k % n, (k + 1) % n, angle)
            };
        }

        builder.build()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run the pipeline and reduce to a report
    pub fn run(&self, encodings: &[ProblemEncoding]) -> QscoreResult<ScoreReport> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.run_with_rng(encodings, &mut rng)
    }

    /// Run the pipeline against a caller-owned random source
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        encodings: &[ProblemEncoding],
        rng: &mut R,
    ) -> QscoreResult<ScoreReport> {
        let circuit = self.build_circuit(encodings);

        let mut state = StateVector::new(self.config.qubits)?;
        state.apply_circuit(&circuit)?;

        for _ in 0..self.config.sequence.diffusion_rounds() {
            state.diffuse();
        }

        state.apply_noise(&self.config.noise, rng)?;

        let probs = measure::distribution(&state)?;
        let raw = match self.config.metric {
            AdvantageMetric::Purity => measure::purity(&probs),
            AdvantageMetric::Entropy => measure::normalized_entropy(&probs),
        };
        let advantage = crate::blend::clamp_unit(raw);

        let (lower_mass, upper_mass) = measure::partition_masses(&probs);

        let outcome = if self.config.sample_outcome {
            Some(measure::sample(&state, rng)?)
        } else {
            None
        };

        Ok(ScoreReport {
            advantage,
            metric: self.config.metric,
            lower_mass,
            upper_mass,
            distribution: self.config.return_distribution.then_some(probs),
            outcome,
            seed: self.config.seed,
        })
    }

    // ========================================================================
    // Domain Scoring
    // ========================================================================

    /// Run and blend against a caller-supplied classical baseline
    pub fn score(
        &self,
        encodings: &[ProblemEncoding],
        profile: &DomainProfile,
        classical_baseline: f64,
    ) -> QscoreResult<DomainScore> {
        let baseline = Probability::new(classical_baseline)?.value();
        let report = self.run(encodings)?;
        let blended = profile.blend_with_baseline(baseline, report.advantage);

        Ok(DomainScore {
            domain: profile.name.to_string(),
            classical_baseline: baseline,
            advantage: report.advantage,
            blended,
            report,
        })
    }

    /// Encode named values through a domain table, then score them
    pub fn score_domain(
        &self,
        domain: Domain,
        values: &[(&str, f64)],
        classical_baseline: f64,
    ) -> QscoreResult<DomainScore> {
        let encodings = domain.encode(values)?;
        self.score(&encodings, &domain.profile(), classical_baseline)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qscore_core::QscoreError;
    use qscore_noise::NoiseModel;

    fn encodings() -> Vec<ProblemEncoding> {
        vec![
            ProblemEncoding::new("automation_level", 0.94, 0.25).unwrap(),
            ProblemEncoding::new("revenue_potential", 0.5, 0.30).unwrap(),
            ProblemEncoding::new("risk_resilience", 0.75, 0.20).unwrap(),
        ]
    }

    #[test]
    fn test_rejects_bad_config_before_allocation() {
        let err = Orchestrator::new(EngineConfig::amplify(0, 1)).unwrap_err();
        assert!(err.is_configuration());

        let err = Orchestrator::new(EngineConfig::amplify(40, 1)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_single_qubit_register_runs() {
        let orchestrator = Orchestrator::new(EngineConfig::amplify(1, 0).with_seed(1)).unwrap();
        let report = orchestrator.run(&encodings()).unwrap();
        assert!(report.advantage >= 0.0 && report.advantage <= 1.0);
    }

    #[test]
    fn test_identical_seeds_are_bit_identical_without_noise() {
        let config = EngineConfig::amplify(6, 2).with_seed(42).with_distribution(true);
        let a = Orchestrator::new(config.clone()).unwrap().run(&encodings()).unwrap();
        let b = Orchestrator::new(config).unwrap().run(&encodings()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identical_seeds_are_bit_identical_with_noise() {
        let config = EngineConfig::amplify(6, 1)
            .with_noise(NoiseModel::decoherent())
            .with_seed(99)
            .with_distribution(true)
            .with_sample(true);
        let a = Orchestrator::new(config.clone()).unwrap().run(&encodings()).unwrap();
        let b = Orchestrator::new(config).unwrap().run(&encodings()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_seed_spread_is_bounded() {
        // Different seeds move the score only within a neighborhood set
        // by the perturbation scale
        let ideal = Orchestrator::new(EngineConfig::amplify(5, 0).with_seed(0))
            .unwrap()
            .run(&encodings())
            .unwrap();

        let model = NoiseModel::decoherent_with_scale(0.02).unwrap();
        for seed in 0..10 {
            let noisy = Orchestrator::new(
                EngineConfig::amplify(5, 0).with_noise(model).with_seed(seed),
            )
            .unwrap()
            .run(&encodings())
            .unwrap();
            assert!(
                (noisy.advantage - ideal.advantage).abs() < 0.2,
                "seed {}: {} vs {}",
                seed,
                noisy.advantage,
                ideal.advantage
            );
        }
    }

    #[test]
    fn test_fourier_sequence_with_entropy_metric() {
        let config = EngineConfig::fourier(4)
            .with_metric(AdvantageMetric::Entropy)
            .with_seed(3);
        let report = Orchestrator::new(config).unwrap().run(&encodings()).unwrap();

        // Fourier on |0..0> plus phase-only rotations keeps the
        // distribution uniform: entropy stays at its maximum
        assert_relative_eq!(report.advantage, 1.0, max_relative = 1e-9);
        assert_relative_eq!(report.lower_mass, 0.5, max_relative = 1e-9);
    }

    #[test]
    fn test_report_carries_requested_extras() {
        let config = EngineConfig::amplify(3, 1)
            .with_seed(7)
            .with_distribution(true)
            .with_sample(true);
        let report = Orchestrator::new(config).unwrap().run(&encodings()).unwrap();

        let distribution = report.distribution.as_ref().unwrap();
        assert_eq!(distribution.len(), 8);
        assert!(report.outcome.unwrap() < 8);
        assert_eq!(report.seed, Some(7));
    }

    #[test]
    fn test_score_validates_baseline() {
        let orchestrator = Orchestrator::new(EngineConfig::amplify(4, 1).with_seed(1)).unwrap();
        let profile = Domain::Business.profile();
        let err = orchestrator.score(&encodings(), &profile, 1.3).unwrap_err();
        assert_eq!(err, QscoreError::InvalidProbability(1.3));
    }

    #[test]
    fn test_score_is_capped_and_above_baseline() {
        let orchestrator = Orchestrator::new(EngineConfig::amplify(4, 1).with_seed(5)).unwrap();
        let profile = Domain::Content.profile();
        let score = orchestrator.score(&encodings(), &profile, 0.78).unwrap();

        assert!(score.blended >= score.classical_baseline);
        assert!(score.blended <= profile.cap);
        assert_relative_eq!(
            score.blended,
            profile.blend_with_baseline(0.78, score.advantage),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_score_domain_end_to_end() {
        let orchestrator = Orchestrator::for_domain(Domain::Legal).unwrap();
        let score = orchestrator
            .score_domain(
                Domain::Legal,
                &[
                    ("evidence_quality", 0.95),
                    ("precedent_similarity", 0.85),
                    ("judge_bias", 0.55),
                ],
                0.88,
            )
            .unwrap();

        assert_eq!(score.domain, "legal");
        assert!(score.blended >= 0.88);
        assert!(score.blended <= Domain::Legal.profile().cap);
    }

    #[test]
    fn test_score_domain_rejects_unknown_variable() {
        let orchestrator = Orchestrator::for_domain(Domain::Marketing).unwrap();
        let err = orchestrator
            .score_domain(Domain::Marketing, &[("spin_rate", 0.5)], 0.82)
            .unwrap_err();
        assert!(matches!(err, QscoreError::UnknownVariable { .. }));
    }
}
