//! Expression evaluation.

use smallvec::SmallVec;
use tally_ir::{BinaryOp, ExprId, ExprKind, ExprRange, FieldInit, FieldRange, ScopeQualifier};
use tally_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{undefined_variable, EvalError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::{LambdaValue, ObjectValue};
use crate::Value;

impl Interpreter<'_> {
    /// Evaluate one expression. Errors without a span get the innermost
    /// expression's span.
    pub fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.get_expr(id);
            self.eval_expr_kind(expr.kind, expr.span)
                .map_err(|e| e.or_span(expr.span))
        })
    }

    fn eval_expr_kind(&mut self, kind: ExprKind, span: tally_ir::Span) -> EvalResult {
        match kind {
            ExprKind::Number(n) => Ok(Value::Number(n)),
            ExprKind::Str(text) | ExprKind::Date(text) => Ok(Value::string(self.name_text(text))),
            ExprKind::Money { amount, .. } => Ok(Value::Number(amount)),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Null => Ok(Value::Nothing),
            ExprKind::Ident(name) => self.lookup(name),
            ExprKind::Qualified { scope, name } => {
                let found = match scope {
                    ScopeQualifier::Global => self.env.get_global(name),
                    ScopeQualifier::Parent => self.env.get_parent(name),
                };
                found.ok_or_else(|| {
                    undefined_variable(&format!("{}::{}", scope.as_str(), self.name_text(name)))
                })
            }
            ExprKind::List(range) => Ok(Value::list(self.eval_expr_list(range)?)),
            ExprKind::Object(fields) => self.eval_object(fields),
            ExprKind::Assign { target, value } => {
                let value = self.eval_expr(value)?;
                self.assign(target, value.clone())?;
                Ok(value)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(op, &operand)
            }
            ExprKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                if !self.eval_expr(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_expr(right)?.is_truthy()))
            }
            ExprKind::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                if self.eval_expr(left)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_expr(right)?.is_truthy()))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(&left, &right, op)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee)?;
                let args = self.eval_expr_list(args)?;
                self.call_value(&callee, &args, span)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval_expr(receiver)?;
                let index = self.eval_expr(index)?;
                super::access::index(&receiver, &index)
            }
            ExprKind::Slice {
                receiver,
                start,
                end,
            } => {
                let receiver = self.eval_expr(receiver)?;
                let start = self.eval_bound(start)?;
                let end = self.eval_bound(end)?;
                super::access::slice(&receiver, start, end)
            }
            ExprKind::Field { receiver, field } => {
                let receiver = self.eval_expr(receiver)?;
                super::access::field(&receiver, self.name_text(field))
            }
            ExprKind::Lambda { params, body } => Ok(Value::lambda(LambdaValue {
                params: self.arena.get_params(params).to_vec(),
                body,
                arena: self.arena.clone(),
                captured: self.env.current_scope(),
            })),
            ExprKind::Table(fields) => self.eval_table_literal(fields),
            ExprKind::Cashflow(amounts) => self.eval_cashflow_literal(amounts),
            ExprKind::CashflowFrom(source) => {
                let source = self.eval_expr(source)?;
                Ok(Value::cashflow(super::coerce::series(&source, "CASHFLOW")?))
            }
            ExprKind::Portfolio { assets, weights } => {
                let assets = self.eval_expr(assets)?;
                let weights = self.eval_expr(weights)?;
                Value::portfolio(
                    super::coerce::series(&assets, "portfolio assets")?,
                    super::coerce::series(&weights, "portfolio weights")?,
                )
            }
            ExprKind::Finance { func, args } => self.eval_finance(func, args),
            ExprKind::Error => Err(EvalError::new(
                "cannot evaluate an expression that failed to parse",
            )),
        }
    }

    /// Evaluate a list of expressions left to right.
    pub(crate) fn eval_expr_list(&mut self, range: ExprRange) -> Result<Vec<Value>, EvalError> {
        let ids: SmallVec<[ExprId; 8]> = SmallVec::from_slice(self.arena.get_expr_list(range));
        ids.into_iter().map(|id| self.eval_expr(id)).collect()
    }

    fn eval_object(&mut self, fields: FieldRange) -> EvalResult {
        let fields: SmallVec<[FieldInit; 8]> = SmallVec::from_slice(self.arena.get_fields(fields));
        let mut object = ObjectValue::default();
        for field in fields {
            let value = self.eval_expr(field.value)?;
            object.insert(self.name_text(field.name).to_string(), value);
        }
        Ok(Value::object(object))
    }

    /// Slice bound; absent bounds are `None`.
    fn eval_bound(&mut self, id: ExprId) -> Result<Option<f64>, EvalError> {
        if id.is_valid() {
            self.eval_number(id, "slice bound").map(Some)
        } else {
            Ok(None)
        }
    }
}
