//! Grammar productions, split by construct family.
//!
//! - `stmt.rs`: statement dispatch, control flow, functions
//! - `finance.rs`: CASHFLOW/PORTFOLIO/SCENARIO/RUN/SIMULATE/ledger statements
//!   and the finance literal expressions
//! - `expr.rs`: assignment and the binary precedence chain
//! - `postfix.rs`: calls, subscripts, slices, field access
//! - `primary.rs`: literals, names, lambdas, groups

mod expr;
mod finance;
mod postfix;
mod primary;
mod stmt;
