//! Level-payment amortization schedules.

use crate::FinanceError;

/// One period of an amortization schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmortizationRow {
    /// 1-based period number.
    pub period: usize,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance remaining after this payment.
    pub balance: f64,
}

impl AmortizationRow {
    /// Column names in display order, matching the field order above.
    pub const COLUMNS: [&'static str; 5] = ["period", "payment", "interest", "principal", "balance"];

    pub fn values(&self) -> [f64; 5] {
        [
            self.period as f64,
            self.payment,
            self.interest,
            self.principal,
            self.balance,
        ]
    }
}

/// Level payment for `principal` at `rate` per period over `periods`.
pub fn payment(principal: f64, rate: f64, periods: usize) -> f64 {
    let n = periods as f64;
    if rate == 0.0 {
        principal / n
    } else {
        principal * rate / (1.0 - (1.0 + rate).powf(-n))
    }
}

/// Full schedule, one row per period.
pub fn amortize(
    principal: f64,
    rate: f64,
    periods: usize,
) -> Result<Vec<AmortizationRow>, FinanceError> {
    if periods == 0 {
        return Err(FinanceError::InvalidPeriod { period: periods });
    }
    if rate <= -1.0 {
        return Err(FinanceError::InvalidRate { rate });
    }
    let payment = payment(principal, rate, periods);
    let mut balance = principal;
    let rows = (1..=periods)
        .map(|period| {
            let interest = balance * rate;
            let principal_paid = payment - interest;
            balance -= principal_paid;
            AmortizationRow {
                period,
                payment,
                interest,
                principal: principal_paid,
                balance,
            }
        })
        .collect();
    Ok(rows)
}
