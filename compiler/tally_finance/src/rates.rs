//! Cost of capital.

/// Weighted average cost of capital.
///
/// `ew`/`dw` are the equity and debt weights, `ce`/`cd` their costs, and
/// `tax` the rate applied to the debt tax shield.
pub fn wacc(ew: f64, dw: f64, ce: f64, cd: f64, tax: f64) -> f64 {
    ew * ce + dw * cd * (1.0 - tax)
}

/// Expected return from the capital asset pricing model.
pub fn capm(risk_free: f64, beta: f64, market_return: f64) -> f64 {
    risk_free + beta * (market_return - risk_free)
}
