//! Statement execution.

use smallvec::SmallVec;
use tally_ir::{BranchRange, ExprId, IfBranch, Name, ParamRange, StmtId, StmtKind, StmtRange};
use tally_stack::ensure_sufficient_stack;
use tracing::{info, warn};

use super::{ExecOutcome, ExecResult, Interpreter};
use crate::errors::{invalid_range, type_mismatch, EvalError};
use crate::value::{ScenarioBlock, UserFunction};
use crate::Value;

impl Interpreter<'_> {
    /// Execute one statement. Errors without a span get the statement's.
    pub fn exec_stmt(&mut self, id: StmtId) -> ExecResult {
        ensure_sufficient_stack(|| {
            let stmt = *self.arena.get_stmt(id);
            self.exec_stmt_kind(stmt.kind)
                .map_err(|e| e.or_span(stmt.span))
        })
    }

    fn exec_stmt_kind(&mut self, kind: StmtKind) -> ExecResult {
        let value = match kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.define(name, value);
                Value::Nothing
            }
            StmtKind::Set { name, value } => {
                let value = self.eval_expr(value)?;
                self.assign(name, value)?;
                Value::Nothing
            }
            StmtKind::Print(expr) => {
                let value = self.eval_expr(expr)?;
                self.print_handler.println(&value.to_string());
                Value::Nothing
            }
            StmtKind::Log(expr) => {
                let value = self.eval_expr(expr)?;
                info!(target: "tally::log", "{value}");
                self.print_handler.println(&format!("[log] {value}"));
                Value::Nothing
            }
            StmtKind::Expr(expr) => self.eval_expr(expr)?,
            StmtKind::Block(body) => return self.exec_block(body),
            StmtKind::If {
                branches,
                else_body,
            } => return self.exec_if(branches, else_body),
            StmtKind::While { cond, body } => return self.exec_while(cond, body),
            StmtKind::For {
                var,
                start,
                end,
                step,
                body,
            } => return self.exec_for(var, start, end, step, body),
            StmtKind::ForEach { var, source, body } => {
                return self.exec_for_each(var, source, body)
            }
            StmtKind::Function { name, params, body } => {
                self.define_function(name, params, body);
                Value::Nothing
            }
            StmtKind::Return(expr) => {
                let value = if expr.is_valid() {
                    self.eval_expr(expr)?
                } else {
                    Value::Nothing
                };
                return Ok(ExecOutcome::Return(value));
            }
            StmtKind::Import(expr) => {
                let path = self.eval_expr(expr)?;
                warn!(path = %path, "IMPORT is not supported; statement ignored");
                Value::Nothing
            }
            StmtKind::Cashflow { name, amounts } => {
                self.exec_cashflow_decl(name, amounts)?;
                Value::Nothing
            }
            StmtKind::Portfolio { name, holdings } => {
                self.exec_portfolio_decl(name, holdings)?;
                Value::Nothing
            }
            StmtKind::Scenario { name, body } => {
                let block = ScenarioBlock {
                    name: self.name_text(name).to_string(),
                    body,
                    arena: self.arena.clone(),
                };
                self.env.define(name, Value::block(block));
                Value::Nothing
            }
            StmtKind::Run { scenario, model } => self.exec_run(scenario, model)?,
            StmtKind::Simulate { scenario, times } => self.exec_simulate(scenario, times)?,
            StmtKind::Ledger {
                side,
                ledger,
                amount,
                description,
                date,
            } => {
                self.exec_ledger_entry(side, ledger, amount, description, date)?;
                Value::Nothing
            }
            StmtKind::Error => Value::Nothing,
        };
        Ok(ExecOutcome::Normal(value))
    }

    fn exec_if(&mut self, branches: BranchRange, else_body: Option<StmtRange>) -> ExecResult {
        let arms: SmallVec<[IfBranch; 4]> =
            SmallVec::from_slice(self.arena.get_branches(branches));
        for arm in arms {
            if self.eval_expr(arm.cond)?.is_truthy() {
                return self.exec_block(arm.body);
            }
        }
        match else_body {
            Some(body) => self.exec_block(body),
            None => Ok(ExecOutcome::Normal(Value::Nothing)),
        }
    }

    fn exec_while(&mut self, cond: ExprId, body: StmtRange) -> ExecResult {
        self.with_env_scope(|scoped| {
            while scoped.eval_expr(cond)?.is_truthy() {
                if let ExecOutcome::Return(value) = scoped.exec_statements(body)? {
                    return Ok(ExecOutcome::Return(value));
                }
            }
            Ok(ExecOutcome::Normal(Value::Nothing))
        })
    }

    /// `FOR i = start TO end [STEP s]`: both bounds inclusive, counting in
    /// the direction of the step.
    fn exec_for(
        &mut self,
        var: Name,
        start: ExprId,
        end: ExprId,
        step: ExprId,
        body: StmtRange,
    ) -> ExecResult {
        let start = self.eval_number(start, "FOR start")?;
        let end = self.eval_number(end, "FOR end")?;
        let step = if step.is_valid() {
            self.eval_number(step, "FOR step")?
        } else {
            1.0
        };
        if step == 0.0 {
            return Err(invalid_range("FOR step must not be zero"));
        }

        self.with_env_scope(|scoped| {
            let mut i = start;
            while (step > 0.0 && i <= end) || (step < 0.0 && i >= end) {
                scoped.env.define(var, Value::Number(i));
                if let ExecOutcome::Return(value) = scoped.exec_statements(body)? {
                    return Ok(ExecOutcome::Return(value));
                }
                i += step;
            }
            Ok(ExecOutcome::Normal(Value::Nothing))
        })
    }

    fn exec_for_each(&mut self, var: Name, source: ExprId, body: StmtRange) -> ExecResult {
        let source = self.eval_expr(source)?;
        let items: Vec<Value> = match &source {
            Value::List(items) => items.to_vec(),
            Value::Str(s) => s.chars().map(Value::string).collect(),
            Value::Cashflow(amounts) => amounts.iter().copied().map(Value::Number).collect(),
            Value::Table(table) => (0..table.row_count())
                .filter_map(|i| table.row(i))
                .map(Value::object)
                .collect(),
            Value::Ledger(ledger) => ledger
                .entries()
                .iter()
                .cloned()
                .map(Value::ledger_entry)
                .collect(),
            other => {
                return Err(type_mismatch(
                    "list, string, cashflow, table or ledger to iterate",
                    other,
                ))
            }
        };

        self.with_env_scope(|scoped| {
            for item in items {
                scoped.env.define(var, item);
                if let ExecOutcome::Return(value) = scoped.exec_statements(body)? {
                    return Ok(ExecOutcome::Return(value));
                }
            }
            Ok(ExecOutcome::Normal(Value::Nothing))
        })
    }

    fn define_function(&mut self, name: Name, params: ParamRange, body: StmtRange) {
        let function = UserFunction {
            name: self.name_text(name).to_string(),
            params: self.arena.get_params(params).to_vec(),
            body,
            arena: self.arena.clone(),
            closure: self.env.current_scope(),
        };
        self.env.define(name, Value::user_function(function));
    }

    pub(crate) fn eval_number(&mut self, id: ExprId, what: &str) -> Result<f64, EvalError> {
        let value = self.eval_expr(id)?;
        super::coerce::number(&value, what)
    }
}
