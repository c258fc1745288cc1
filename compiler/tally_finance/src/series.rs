//! Moving averages and element-wise series arithmetic.

use crate::FinanceError;

fn check_period(period: usize) -> Result<(), FinanceError> {
    if period == 0 {
        Err(FinanceError::InvalidPeriod { period })
    } else {
        Ok(())
    }
}

/// Simple moving average. One output per full window, so the result has
/// `len - period + 1` entries and is empty when `period > len`.
pub fn sma(values: &[f64], period: usize) -> Result<Vec<f64>, FinanceError> {
    check_period(period)?;
    Ok(values
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period as f64)
        .collect())
}

/// Exponential moving average with `α = 2 / (period + 1)`, seeded with the
/// first value. Output length equals input length.
pub fn ema(values: &[f64], period: usize) -> Result<Vec<f64>, FinanceError> {
    check_period(period)?;
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = None;
    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => alpha * value + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    Ok(out)
}

/// Trailing mean over at most `window` values ending at each index. Early
/// entries average whatever history exists.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<f64>, FinanceError> {
    check_period(window)?;
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }
    Ok(out)
}

/// Combine two series pairwise, truncating to the shorter one.
pub fn zip_with(left: &[f64], right: &[f64], op: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    left.iter().zip(right).map(|(&a, &b)| op(a, b)).collect()
}
