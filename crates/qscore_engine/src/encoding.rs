//! Problem encoding for QSCORE
//!
//! External domain variables arrive as named, normalized values; the
//! engine turns each into a rotation angle. The per-domain variable
//! tables and blend parameters live here, so five formerly separate
//! engine variants share one parametrized pipeline.

use crate::config::OperatorSequence;
use qscore_core::error::{QscoreError, QscoreResult};
use qscore_core::types::Angle;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

// ============================================================================
// Problem Encoding
// ============================================================================

/// One named domain variable, normalized to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemEncoding {
    /// Variable name (e.g. "automation_level")
    name: String,

    /// Normalized value in [0, 1]
    value: f64,

    /// Relative importance weight
    weight: f64,

    /// Unit scale: multiplies the rotation angle (default 1.0)
    scale: f64,
}

impl ProblemEncoding {
    /// Create a new encoding with validation
    pub fn new(name: impl Into<String>, value: f64, weight: f64) -> QscoreResult<Self> {
        let name = name.into();
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(QscoreError::InvalidEncoding { name, value });
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(QscoreError::InvalidWeight { name, weight });
        }
        Ok(Self {
            name,
            value,
            weight,
            scale: 1.0,
        })
    }

    /// Override the unit scale
    pub fn with_scale(mut self, scale: f64) -> QscoreResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(QscoreError::InvalidScale {
                name: self.name,
                scale,
            });
        }
        self.scale = scale;
        Ok(self)
    }

    /// Get variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get normalized value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get importance weight
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Get unit scale
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation angle: value * pi * scale
    pub fn angle(&self) -> Angle {
        self.value * PI * self.scale
    }
}

impl fmt::Display for ProblemEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={:.3} (w={:.2}, scale={:.1})",
            self.name, self.value, self.weight, self.scale
        )
    }
}

// ============================================================================
// Domain Profiles
// ============================================================================

/// Blend parameters for one business domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainProfile {
    /// Domain name
    pub name: &'static str,

    /// Default classical accuracy baseline
    pub baseline: f64,

    /// Quantum boost factor applied to the advantage score
    pub boost: f64,

    /// Hard cap on the blended score
    pub cap: f64,
}

/// One variable slot in a domain's encoding table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSpec {
    /// Variable name
    pub name: &'static str,

    /// Importance weight
    pub weight: f64,

    /// Unit scale for the rotation angle
    pub scale: f64,
}

// ============================================================================
// Domains
// ============================================================================

/// The business domains the engine scores for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Business model optimization
    Business,
    /// Legal outcome prediction
    Legal,
    /// Marketing campaign optimization
    Marketing,
    /// Content generation quality
    Content,
    /// Compliance and security analysis
    Compliance,
}

const BUSINESS_VARS: &[VariableSpec] = &[
    VariableSpec { name: "revenue_potential", weight: 0.30, scale: 1.0 },
    VariableSpec { name: "automation_level", weight: 0.25, scale: 1.0 },
    VariableSpec { name: "risk_resilience", weight: 0.20, scale: 1.0 },
    VariableSpec { name: "success_rate", weight: 0.25, scale: 1.0 },
];

const LEGAL_VARS: &[VariableSpec] = &[
    VariableSpec { name: "evidence_quality", weight: 0.35, scale: 1.0 },
    VariableSpec { name: "precedent_similarity", weight: 0.25, scale: 1.0 },
    VariableSpec { name: "judge_bias", weight: 0.15, scale: 2.0 },
    VariableSpec { name: "public_opinion", weight: 0.10, scale: 2.0 },
    VariableSpec { name: "case_simplicity", weight: 0.15, scale: 1.0 },
];

const MARKETING_VARS: &[VariableSpec] = &[
    VariableSpec { name: "conversion_rate", weight: 0.40, scale: 10.0 },
    VariableSpec { name: "targeting_accuracy", weight: 0.30, scale: 1.0 },
    VariableSpec { name: "budget_efficiency", weight: 0.30, scale: 1.0 },
];

const CONTENT_VARS: &[VariableSpec] = &[
    VariableSpec { name: "quality_score", weight: 0.40, scale: 1.0 },
    VariableSpec { name: "engagement_rate", weight: 0.30, scale: 5.0 },
    VariableSpec { name: "seo_score", weight: 0.30, scale: 1.0 },
];

const COMPLIANCE_VARS: &[VariableSpec] = &[
    VariableSpec { name: "risk_exposure", weight: 0.30, scale: 2.0 },
    VariableSpec { name: "regulation_compliance", weight: 0.40, scale: 1.0 },
    VariableSpec { name: "security_score", weight: 0.30, scale: 1.0 },
];

impl Domain {
    /// All domains
    pub const ALL: [Domain; 5] = [
        Domain::Business,
        Domain::Legal,
        Domain::Marketing,
        Domain::Content,
        Domain::Compliance,
    ];

    /// Blend parameters for this domain
    pub fn profile(&self) -> DomainProfile {
        match self {
            Domain::Business => DomainProfile {
                name: "business",
                baseline: 0.85,
                boost: 0.25,
                cap: 0.999,
            },
            Domain::Legal => DomainProfile {
                name: "legal",
                baseline: 0.88,
                boost: 0.30,
                cap: 0.999,
            },
            Domain::Marketing => DomainProfile {
                name: "marketing",
                baseline: 0.82,
                boost: 0.35,
                cap: 0.995,
            },
            Domain::Content => DomainProfile {
                name: "content",
                baseline: 0.78,
                boost: 0.40,
                cap: 0.99,
            },
            Domain::Compliance => DomainProfile {
                name: "compliance",
                baseline: 0.91,
                boost: 0.20,
                cap: 0.998,
            },
        }
    }

    /// Encoding table for this domain
    pub fn variable_specs(&self) -> &'static [VariableSpec] {
        match self {
            Domain::Business => BUSINESS_VARS,
            Domain::Legal => LEGAL_VARS,
            Domain::Marketing => MARKETING_VARS,
            Domain::Content => CONTENT_VARS,
            Domain::Compliance => COMPLIANCE_VARS,
        }
    }

    /// Operator schedule this domain historically runs
    pub fn default_sequence(&self) -> OperatorSequence {
        match self {
            Domain::Business | Domain::Marketing | Domain::Content => {
                OperatorSequence::Amplify { rounds: 2 }
            }
            Domain::Legal | Domain::Compliance => OperatorSequence::Fourier,
        }
    }

    /// Encode named values through this domain's table.
    ///
    /// Unknown variable names are rejected; order follows the input.
    pub fn encode(&self, values: &[(&str, f64)]) -> QscoreResult<Vec<ProblemEncoding>> {
        let specs = self.variable_specs();
        values
            .iter()
            .map(|&(name, value)| {
                let spec = specs
                    .iter()
                    .find(|s| s.name == name)
                    .ok_or_else(|| QscoreError::UnknownVariable {
                        domain: self.to_string(),
                        name: name.to_string(),
                    })?;
                ProblemEncoding::new(spec.name, value, spec.weight)?.with_scale(spec.scale)
            })
            .collect()
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "business" => Some(Domain::Business),
            "legal" => Some(Domain::Legal),
            "marketing" => Some(Domain::Marketing),
            "content" => Some(Domain::Content),
            "compliance" => Some(Domain::Compliance),
            _ => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().name)
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
    fn test_encoding_validation() {
        assert!(ProblemEncoding::new("x", 0.5, 1.0).is_ok());
        assert!(matches!(
            ProblemEncoding::new("x", 1.5, 1.0),
            Err(QscoreError::InvalidEncoding { .. })
        ));
        assert!(matches!(
            ProblemEncoding::new("x", 0.5, 0.0),
            Err(QscoreError::InvalidWeight { .. })
        ));
        assert!(matches!(
            ProblemEncoding::new("x", 0.5, 1.0).unwrap().with_scale(-1.0),
            Err(QscoreError::InvalidScale { .. })
        ));
    }

    #[test]
    fn test_angle_scaling() {
        let enc = ProblemEncoding::new("conversion_rate", 0.08, 0.4)
            .unwrap()
            .with_scale(10.0)
            .unwrap();
        assert_relative_eq!(enc.angle(), 0.08 * PI * 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_every_domain_has_weighted_table() {
        for domain in Domain::ALL {
            let specs = domain.variable_specs();
            assert!(!specs.is_empty());

            let total: f64 = specs.iter().map(|s| s.weight).sum();
            assert_relative_eq!(total, 1.0, max_relative = 1e-9, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_encode_known_variables() {
        let encodings = Domain::Legal
            .encode(&[("evidence_quality", 0.95), ("judge_bias", 0.55)])
            .unwrap();

        assert_eq!(encodings.len(), 2);
        assert_eq!(encodings[0].name(), "evidence_quality");
        assert_relative_eq!(encodings[1].scale(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_encode_rejects_unknown_variable() {
        let result = Domain::Business.encode(&[("spin_rate", 0.5)]);
        assert!(matches!(
            result,
            Err(QscoreError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_out_of_range_value() {
        let result = Domain::Business.encode(&[("automation_level", 1.4)]);
        assert!(matches!(result, Err(QscoreError::InvalidEncoding { .. })));
    }

    #[test]
    fn test_profiles_are_capped_above_baseline() {
        for domain in Domain::ALL {
            let profile = domain.profile();
            assert!(profile.cap > profile.baseline);
            assert!(profile.cap <= 1.0);
            assert!(profile.boost > 0.0);
        }
    }

    #[test]
    fn test_default_sequences() {
        assert!(matches!(
            Domain::Business.default_sequence(),
            OperatorSequence::Amplify { .. }
        ));
        assert_eq!(Domain::Legal.default_sequence(), OperatorSequence::Fourier);
    }

    #[test]
    fn test_domain_parse_roundtrip() {
        for domain in Domain::ALL {
            assert_eq!(Domain::parse(&domain.to_string()), Some(domain));
        }
        assert_eq!(Domain::parse("telephony"), None);
    }
}
