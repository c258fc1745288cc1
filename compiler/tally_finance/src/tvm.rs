//! Time value of money.

use crate::FinanceError;

/// Starting guess for [`irr`].
const IRR_GUESS: f64 = 0.10;

/// Newton-Raphson steps taken by [`irr`].
const IRR_ITERATIONS: usize = 100;

fn check_rate(rate: f64) -> Result<(), FinanceError> {
    if rate <= -1.0 {
        return Err(FinanceError::InvalidRate { rate });
    }
    Ok(())
}

/// Net present value, with `flows[i]` discounted by `(1 + rate)^(i + 1)`.
///
/// The first flow is therefore treated as arriving one period from now.
pub fn npv(rate: f64, flows: &[f64]) -> Result<f64, FinanceError> {
    check_rate(rate)?;
    let mut factor = 1.0;
    let mut total = 0.0;
    for flow in flows {
        factor *= 1.0 + rate;
        total += flow / factor;
    }
    Ok(total)
}

/// Internal rate of return by Newton-Raphson on the [`npv`] curve.
///
/// Runs a fixed number of steps from 10%. If the derivative vanishes the
/// current estimate is returned as is.
pub fn irr(flows: &[f64]) -> Result<f64, FinanceError> {
    if flows.is_empty() {
        return Err(FinanceError::EmptySeries { what: "IRR" });
    }
    let mut rate = IRR_GUESS;
    for _ in 0..IRR_ITERATIONS {
        let mut value = 0.0;
        let mut slope = 0.0;
        for (i, flow) in flows.iter().enumerate() {
            let t = (i + 1) as f64;
            let base = 1.0 + rate;
            value += flow / base.powf(t);
            slope -= t * flow / base.powf(t + 1.0);
        }
        if slope == 0.0 || !slope.is_finite() {
            break;
        }
        let next = rate - value / slope;
        if !next.is_finite() {
            break;
        }
        rate = next;
    }
    Ok(rate)
}

/// Present value of `nper` payments of `pmt` plus a final amount `fv`.
pub fn pv(rate: f64, nper: f64, pmt: f64, fv: f64) -> Result<f64, FinanceError> {
    check_rate(rate)?;
    if rate == 0.0 {
        return Ok(pmt * nper + fv);
    }
    let growth = (1.0 + rate).powf(nper);
    Ok(pmt * (1.0 - 1.0 / growth) / rate + fv / growth)
}

/// Future value of `pv` today plus `nper` payments of `pmt`.
pub fn fv(rate: f64, nper: f64, pmt: f64, pv: f64) -> Result<f64, FinanceError> {
    check_rate(rate)?;
    if rate == 0.0 {
        return Ok(pv + pmt * nper);
    }
    let growth = (1.0 + rate).powf(nper);
    Ok(pv * growth + pmt * (growth - 1.0) / rate)
}
