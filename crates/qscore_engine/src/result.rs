//! Result types for QSCORE
//!
//! What one orchestrator invocation hands back to the surrounding
//! application: the advantage score with its supporting statistics, and
//! (for domain scoring) the blended accuracy.

use crate::config::AdvantageMetric;
use qscore_core::types::BasisIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Score Report
// ============================================================================

/// Raw output of one circuit evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Advantage score in [0, 1]
    pub advantage: f64,

    /// Metric the advantage was reduced with
    pub metric: AdvantageMetric,

    /// Probability mass in the lower half of the index range
    pub lower_mass: f64,

    /// Probability mass in the upper half of the index range
    pub upper_mass: f64,

    /// Full distribution, when requested
    pub distribution: Option<Vec<f64>>,

    /// One sampled basis index, when requested
    pub outcome: Option<BasisIndex>,

    /// Seed the run was driven by, if any
    pub seed: Option<u64>,
}

impl ScoreReport {
    /// Whether more probability mass sits in the upper half
    pub fn leans_upper(&self) -> bool {
        self.upper_mass > self.lower_mass
    }

    /// Margin between the two halves, in [0, 1]
    pub fn partition_margin(&self) -> f64 {
        (self.upper_mass - self.lower_mass).abs()
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScoreReport(advantage={:.4}, metric={}, halves={:.3}/{:.3})",
            self.advantage, self.metric, self.lower_mass, self.upper_mass
        )
    }
}

// ============================================================================
// Domain Score
// ============================================================================

/// A blended score for one business domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    /// Domain name
    pub domain: String,

    /// Classical baseline the caller supplied
    pub classical_baseline: f64,

    /// Advantage score from the engine
    pub advantage: f64,

    /// Blended, capped accuracy
    pub blended: f64,

    /// The underlying report
    pub report: ScoreReport,
}

impl DomainScore {
    /// Improvement of the blended score over the baseline, as a factor
    pub fn improvement_factor(&self) -> f64 {
        if self.classical_baseline > 0.0 {
            self.blended / self.classical_baseline
        } else {
            1.0
        }
    }

    /// Improvement in percent
    pub fn improvement_percent(&self) -> f64 {
        (self.improvement_factor() - 1.0) * 100.0
    }

    /// Whether the blend moved the score above the baseline
    pub fn improved(&self) -> bool {
        self.blended > self.classical_baseline
    }

    /// Relative advantage of the blended score over the baseline
    pub fn relative_advantage(&self) -> f64 {
        crate::blend::relative_advantage(self.classical_baseline, self.blended)
    }
}

impl fmt::Display for DomainScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DomainScore({}: {:.3} -> {:.3}, advantage={:.3})",
            self.domain, self.classical_baseline, self.blended, self.advantage
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report() -> ScoreReport {
        ScoreReport {
            advantage: 0.4,
            metric: AdvantageMetric::Purity,
            lower_mass: 0.3,
            upper_mass: 0.7,
            distribution: None,
            outcome: None,
            seed: Some(42),
        }
    }

    #[test]
    fn test_report_partition_helpers() {
        let r = report();
        assert!(r.leans_upper());
        assert_relative_eq!(r.partition_margin(), 0.4, max_relative = 1e-12);
    }

    #[test]
    fn test_domain_score_improvement() {
        let score = DomainScore {
            domain: "business".to_string(),
            classical_baseline: 0.85,
            advantage: 0.4,
            blended: 0.95,
            report: report(),
        };

        assert!(score.improved());
        assert_relative_eq!(score.improvement_factor(), 0.95 / 0.85, max_relative = 1e-12);
        assert!(score.improvement_percent() > 11.0);
        assert_relative_eq!(
            score.relative_advantage(),
            (0.95 - 0.85) / 0.85,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_domain_score_zero_baseline() {
        let score = DomainScore {
            domain: "legal".to_string(),
            classical_baseline: 0.0,
            advantage: 0.4,
            blended: 0.12,
            report: report(),
        };
        assert_eq!(score.improvement_factor(), 1.0);
    }

    #[test]
    fn test_report_serde_roundtrip() {
        let r = report();
        let json = serde_json::to_string(&r).unwrap();
        let back: ScoreReport = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
