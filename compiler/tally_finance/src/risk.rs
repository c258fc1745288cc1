//! Value at risk.
//!
//! The z-score comes from a two-entry table rather than an inverse normal
//! CDF: 95% and 99% map to their usual one-tailed values and anything else
//! falls back to one standard deviation.

use crate::FinanceError;

const CONFIDENCE_TOLERANCE: f64 = 1e-9;

pub fn z_score(confidence: f64) -> f64 {
    if (confidence - 0.95).abs() < CONFIDENCE_TOLERANCE {
        1.65
    } else if (confidence - 0.99).abs() < CONFIDENCE_TOLERANCE {
        2.33
    } else {
        1.0
    }
}

/// `z·σ − μ` over a return series, with population standard deviation.
pub fn value_at_risk(series: &[f64], confidence: f64) -> Result<f64, FinanceError> {
    if series.is_empty() {
        return Err(FinanceError::EmptySeries { what: "VAR" });
    }
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Ok(z_score(confidence) * variance.sqrt() - mean)
}

/// Value at risk of a portfolio whose `returns[i]` is held at `weights[i]`.
///
/// Mean and variance are weight-averaged; weights are expected to sum to 1.
pub fn weighted_value_at_risk(
    returns: &[f64],
    weights: &[f64],
    confidence: f64,
) -> Result<f64, FinanceError> {
    if returns.len() != weights.len() {
        return Err(FinanceError::LengthMismatch {
            values: returns.len(),
            weights: weights.len(),
        });
    }
    if returns.is_empty() {
        return Err(FinanceError::EmptySeries { what: "VAR" });
    }
    let mean: f64 = returns.iter().zip(weights).map(|(r, w)| r * w).sum();
    let variance: f64 = returns
        .iter()
        .zip(weights)
        .map(|(r, w)| w * (r - mean).powi(2))
        .sum();
    Ok(z_score(confidence) * variance.sqrt() - mean)
}
