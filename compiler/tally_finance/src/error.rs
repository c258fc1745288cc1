use thiserror::Error;

/// Invalid input to a finance formula.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FinanceError {
    #[error("{what} needs at least one value")]
    EmptySeries { what: &'static str },

    #[error("period must be at least 1, got {period}")]
    InvalidPeriod { period: usize },

    #[error("rate {rate} must be greater than -1")]
    InvalidRate { rate: f64 },

    #[error("{values} values but {weights} weights")]
    LengthMismatch { values: usize, weights: usize },
}
