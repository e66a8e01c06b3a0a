//! Measurement and sampling for QSCORE
//!
//! Converts amplitudes to probabilities, draws sampled outcomes from an
//! injectable random source, and reduces distributions to the derived
//! statistics the orchestrator scores with.

use crate::state::StateVector;
use qscore_core::constants::numeric::PROB_SUM_TOLERANCE;
use qscore_core::error::{QscoreError, QscoreResult};
use qscore_core::types::BasisIndex;
use rand::Rng;

// ============================================================================
// Distribution
// ============================================================================

/// Full probability distribution |a_i|^2 over basis states.
///
/// Floating-point drift after many operators is repaired by a single
/// renormalization pass; drift that survives it is reported as
/// numerical instability, a zero-mass vector as a degenerate state.
pub fn distribution(state: &StateVector) -> QscoreResult<Vec<f64>> {
    let mut probs = state.probabilities();
    if probs.iter().any(|p| !p.is_finite()) {
        return Err(QscoreError::NumericalInstability(
            "non-finite probability".to_string(),
        ));
    }

    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        if sum <= 0.0 {
            return Err(QscoreError::DegenerateState);
        }
        for p in &mut probs {
            *p /= sum;
        }
        let retry: f64 = probs.iter().sum();
        if !retry.is_finite() || (retry - 1.0).abs() > PROB_SUM_TOLERANCE {
            return Err(QscoreError::NumericalInstability(format!(
                "probability sum {} after renormalization",
                retry
            )));
        }
    }

    Ok(probs)
}

// ============================================================================
// Sampling
// ============================================================================

/// Draw one basis index according to the state's distribution.
///
/// Walks the cumulative distribution with a uniform draw in [0, 1);
/// the last index absorbs any residual floating-point mass.
pub fn sample<R: Rng + ?Sized>(state: &StateVector, rng: &mut R) -> QscoreResult<BasisIndex> {
    let probs = distribution(state)?;
    let draw: f64 = rng.gen();

    let mut cumulative = 0.0;
    for (index, &p) in probs.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return Ok(index);
        }
    }
    Ok(probs.len() - 1)
}

// ============================================================================
// Derived Statistics
// ============================================================================

/// Probability mass in the lower and upper halves of the index range
pub fn partition_masses(probs: &[f64]) -> (f64, f64) {
    let split = probs.len() / 2;
    let lower: f64 = probs[..split].iter().sum();
    let upper: f64 = probs[split..].iter().sum();
    (lower, upper)
}

/// Coherence as sum of squared probabilities.
///
/// 1.0 for a pure basis state, 1/2^n for the uniform distribution.
pub fn purity(probs: &[f64]) -> f64 {
    probs.iter().map(|p| p * p).sum()
}

/// Shannon entropy of the distribution divided by the qubit count, with
/// the 0*log2(0) = 0 convention. 0.0 for a basis state, 1.0 for the
/// uniform distribution.
pub fn normalized_entropy(probs: &[f64]) -> f64 {
    let num_qubits = probs.len().trailing_zeros() as f64;
    if num_qubits == 0.0 {
        return 0.0;
    }
    let entropy: f64 = probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum();
    entropy / num_qubits
}

// ============================================================================
// Tests
// ============================================================================
