//! Compound runtime values: finance domain types, objects and callables.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use tally_ir::{ExprId, Name, SharedArena, StmtRange};

use super::Value;
use crate::environment::{LocalScope, Scope};
use crate::errors::{domain_invariant, EvalError, EvalResult};
use crate::interpreter::CallContext;

/// Portfolio weights must sum to one within this tolerance.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Ordered named columns of numbers, all the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct TableValue {
    columns: Vec<(String, Vec<f64>)>,
}

impl TableValue {
    /// Build a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Result<Self, EvalError> {
        if let Some((first_name, first)) = columns.first() {
            for (name, column) in &columns[1..] {
                if column.len() != first.len() {
                    return Err(domain_invariant(format!(
                        "table column '{name}' has {} rows but '{first_name}' has {}",
                        column.len(),
                        first.len()
                    )));
                }
            }
        }
        Ok(TableValue { columns })
    }

    pub fn columns(&self) -> &[(String, Vec<f64>)] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    /// Row `index` as an object keyed by column name.
    pub fn row(&self, index: usize) -> Option<ObjectValue> {
        if index >= self.row_count() {
            return None;
        }
        let fields = self
            .columns
            .iter()
            .map(|(name, values)| (name.clone(), Value::Number(values[index])))
            .collect();
        Some(ObjectValue::new(fields))
    }
}

/// Assets held at non-negative weights summing to one.
#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioValue {
    assets: Vec<f64>,
    weights: Vec<f64>,
}

impl PortfolioValue {
    /// Build a portfolio from weights that already satisfy the invariant.
    pub fn new(assets: Vec<f64>, weights: Vec<f64>) -> Result<Self, EvalError> {
        if assets.len() != weights.len() {
            return Err(domain_invariant(format!(
                "portfolio has {} assets but {} weights",
                assets.len(),
                weights.len()
            )));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(domain_invariant(format!(
                "portfolio weight {w} is negative"
            )));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(domain_invariant(format!(
                "portfolio weights sum to {total}, expected 1"
            )));
        }
        Ok(PortfolioValue { assets, weights })
    }

    /// Build a portfolio from declared amounts, scaling them to weights.
    pub fn from_amounts(assets: Vec<f64>, amounts: &[f64]) -> Result<Self, EvalError> {
        if let Some(a) = amounts.iter().find(|a| !a.is_finite() || **a < 0.0) {
            return Err(domain_invariant(format!(
                "portfolio amount {a} is negative"
            )));
        }
        let total: f64 = amounts.iter().sum();
        if total == 0.0 {
            return Err(domain_invariant("portfolio amounts sum to zero"));
        }
        let weights = amounts.iter().map(|a| a / total).collect();
        PortfolioValue::new(assets, weights)
    }

    pub fn assets(&self) -> &[f64] {
        &self.assets
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `Σ asset·weight`. Also serves as the portfolio beta for CAPM.
    pub fn expected_return(&self) -> f64 {
        self.assets
            .iter()
            .zip(&self.weights)
            .map(|(a, w)| a * w)
            .sum()
    }
}

/// One line of a ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    pub date: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub description: String,
}

/// Append-only list of entries, shared by every value that names it.
#[derive(Clone, Default)]
pub struct LedgerValue(Rc<RefCell<Vec<LedgerEntry>>>);

impl LedgerValue {
    pub fn new() -> Self {
        LedgerValue::default()
    }

    pub fn append(&self, entry: LedgerEntry) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Ref<'_, Vec<LedgerEntry>> {
        self.0.borrow()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn debits(&self) -> f64 {
        self.0.borrow().iter().filter_map(|e| e.debit).sum()
    }

    pub fn credits(&self) -> f64 {
        self.0.borrow().iter().filter_map(|e| e.credit).sum()
    }

    /// Debits minus credits.
    pub fn balance(&self) -> f64 {
        self.debits() - self.credits()
    }

    pub fn ptr_eq(&self, other: &LedgerValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for LedgerValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for LedgerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ledger").field(&*self.0.borrow()).finish()
    }
}

/// Ordered field map. Later inserts of an existing key replace in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectValue {
    fields: Vec<(String, Value)>,
}

impl ObjectValue {
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        let mut object = ObjectValue::default();
        for (key, value) in fields {
            object.insert(key, value);
        }
        object
    }

    pub fn insert(&mut self, key: String, value: Value) {
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Declared argument count of a callable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// Signature of a native builtin.
pub type NativeFn = fn(&mut CallContext<'_, '_>, &[Value]) -> EvalResult;

/// Builtin implemented in Rust.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// `FUNCTION name(params) ... END`, closed over its defining scope.
pub struct UserFunction {
    pub name: String,
    pub params: Vec<Name>,
    pub body: StmtRange,
    pub arena: SharedArena,
    pub closure: LocalScope<Scope>,
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// `x -> expr`, with the environment it was created in.
pub struct LambdaValue {
    pub params: Vec<Name>,
    pub body: ExprId,
    pub arena: SharedArena,
    pub captured: LocalScope<Scope>,
}

impl fmt::Debug for LambdaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaValue")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Deferred body of a `SCENARIO`, run later by `RUN` or `SIMULATE`.
#[derive(Debug)]
pub struct ScenarioBlock {
    pub name: String,
    pub body: StmtRange,
    pub arena: SharedArena,
}
