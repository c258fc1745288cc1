//! Runtime values.
//!
//! `Value` is a closed enum. Heap payloads sit behind [`Heap`], whose
//! constructor is private to this module, so every table, portfolio, list
//! or string is built through a factory method here:
//!
//! ```text
//! let list = Value::list(vec![Value::Number(1.0)]);
//! let table = Value::table(columns)?;      // checks column lengths
//! let portfolio = Value::portfolio(a, w)?; // checks the weight invariant
//! ```
//!
//! Values are immutable once built. The one exception is a ledger, which is
//! append-only and shared by every binding that refers to it.

mod composite;
mod display;
mod heap;

pub use composite::{
    Arity, LambdaValue, LedgerEntry, LedgerValue, NativeFn, NativeFunction, ObjectValue,
    PortfolioValue, ScenarioBlock, TableValue, UserFunction, WEIGHT_TOLERANCE,
};
pub use display::format_number;
pub use heap::Heap;

use crate::errors::EvalError;

/// Anything that can be called.
#[derive(Clone, Debug)]
pub enum FunctionValue {
    Native(NativeFunction),
    User(Heap<UserFunction>),
}

impl FunctionValue {
    pub fn arity(&self) -> Arity {
        match self {
            FunctionValue::Native(native) => native.arity,
            FunctionValue::User(user) => Arity::Fixed(user.params.len()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionValue::Native(native) => native.name,
            FunctionValue::User(user) => &user.name,
        }
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionValue::Native(a), FunctionValue::Native(b)) => a.name == b.name,
            (FunctionValue::User(a), FunctionValue::User(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// No value: an unset result, a missing list element, `NULL`.
    Nothing,
    Number(f64),
    Bool(bool),
    Str(Heap<str>),
    List(Heap<Vec<Value>>),
    Table(Heap<TableValue>),
    Portfolio(Heap<PortfolioValue>),
    /// One signed amount per period.
    Cashflow(Heap<Vec<f64>>),
    Ledger(LedgerValue),
    LedgerEntry(Heap<LedgerEntry>),
    Function(FunctionValue),
    Block(Heap<ScenarioBlock>),
    Lambda(Heap<LambdaValue>),
    Object(Heap<ObjectValue>),
}

// Factory methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::from_string(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// List of plain numbers.
    pub fn number_list(items: impl IntoIterator<Item = f64>) -> Self {
        Value::list(items.into_iter().map(Value::Number).collect())
    }

    #[inline]
    pub fn cashflow(amounts: Vec<f64>) -> Self {
        Value::Cashflow(Heap::new(amounts))
    }

    /// Table from ordered columns. Fails if lengths differ.
    pub fn table(columns: Vec<(String, Vec<f64>)>) -> Result<Self, EvalError> {
        TableValue::new(columns).map(|t| Value::Table(Heap::new(t)))
    }

    /// Portfolio from explicit weights. Fails unless they sum to one.
    pub fn portfolio(assets: Vec<f64>, weights: Vec<f64>) -> Result<Self, EvalError> {
        PortfolioValue::new(assets, weights).map(|p| Value::Portfolio(Heap::new(p)))
    }

    /// Portfolio from declared amounts, normalized to weights.
    pub fn portfolio_from_amounts(assets: Vec<f64>, amounts: &[f64]) -> Result<Self, EvalError> {
        PortfolioValue::from_amounts(assets, amounts).map(|p| Value::Portfolio(Heap::new(p)))
    }

    pub fn ledger_entry(entry: LedgerEntry) -> Self {
        Value::LedgerEntry(Heap::new(entry))
    }

    pub fn object(object: ObjectValue) -> Self {
        Value::Object(Heap::new(object))
    }

    pub fn native(name: &'static str, arity: Arity, func: NativeFn) -> Self {
        Value::Function(FunctionValue::Native(NativeFunction { name, arity, func }))
    }

    pub fn user_function(function: UserFunction) -> Self {
        Value::Function(FunctionValue::User(Heap::new(function)))
    }

    pub fn lambda(lambda: LambdaValue) -> Self {
        Value::Lambda(Heap::new(lambda))
    }

    pub fn block(block: ScenarioBlock) -> Self {
        Value::Block(Heap::new(block))
    }
}

// Queries

impl Value {
    /// Name used in type errors and by the `type` builtin.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Table(_) => "table",
            Value::Portfolio(_) => "portfolio",
            Value::Cashflow(_) => "cashflow",
            Value::Ledger(_) => "ledger",
            Value::LedgerEntry(_) => "ledger entry",
            Value::Function(_) => "function",
            Value::Block(_) => "scenario",
            Value::Lambda(_) => "lambda",
            Value::Object(_) => "object",
        }
    }

    /// Condition value of `IF`, `WHILE`, `and`, `or` and `not`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nothing => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Lambda(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Structural equality. Never fails and never coerces between kinds.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            (Value::Portfolio(a), Value::Portfolio(b)) => a == b,
            (Value::Cashflow(a), Value::Cashflow(b)) => a == b,
            (Value::Ledger(a), Value::Ledger(b)) => a == b,
            (Value::LedgerEntry(a), Value::LedgerEntry(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a.ptr_eq(b),
            (Value::Lambda(a), Value::Lambda(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
