//! Financial formulas over plain `f64` data.
//!
//! Nothing here knows about interpreter values; the evaluator converts its
//! lists, cashflows and portfolios to slices before calling in, and turns a
//! [`FinanceError`] into a runtime error.
//!
//! - [`tvm`]: time value of money (NPV, IRR, PV, FV)
//! - [`rates`]: WACC and CAPM
//! - [`risk`]: value at risk, plain and weighted
//! - [`series`]: moving averages and element-wise combination
//! - [`amortization`]: level-payment loan schedules

pub mod amortization;
mod error;
pub mod rates;
pub mod risk;
pub mod series;
pub mod tvm;

pub use amortization::{amortize, AmortizationRow};
pub use error::FinanceError;
pub use rates::{capm, wacc};
pub use risk::{value_at_risk, weighted_value_at_risk, z_score};
pub use series::{ema, rolling_mean, sma, zip_with};
pub use tvm::{fv, irr, npv, pv};

#[cfg(test)]
mod tests;
