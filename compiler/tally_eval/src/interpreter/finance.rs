//! Finance expressions and statements: literals, formula dispatch,
//! ledgers and scenario runs.

use smallvec::SmallVec;
use tally_finance::{
    amortize, capm, ema, fv, irr, npv, pv, sma, value_at_risk, wacc, weighted_value_at_risk,
    zip_with, AmortizationRow,
};
use tally_ir::{
    BinaryOp, ExprId, ExprKind, ExprRange, FieldInit, FieldRange, FinanceFn, Holding,
    HoldingRange, LedgerSide, Name,
};
use tracing::debug;

use super::coerce::{count, series};
use super::{ExecOutcome, Interpreter};
use crate::errors::{
    arity_mismatch, invalid_argument, type_mismatch, unknown_model, unknown_scenario, EvalError,
    EvalResult,
};
use crate::value::{Arity, Heap, LedgerEntry, LedgerValue, ObjectValue, ScenarioBlock};
use crate::Value;

/// Argument of NPV/IRR: a single number or a cash flow series.
enum Operand {
    Scalar(f64),
    Series(Vec<f64>),
}

impl Interpreter<'_> {
    // Literals

    pub(crate) fn eval_table_literal(&mut self, fields: FieldRange) -> EvalResult {
        let fields: SmallVec<[FieldInit; 8]> = SmallVec::from_slice(self.arena.get_fields(fields));
        let mut columns = Vec::with_capacity(fields.len());
        for field in fields {
            let name = self.name_text(field.name);
            let value = self.eval_expr(field.value)?;
            let values = match &value {
                Value::Cashflow(amounts) => amounts.to_vec(),
                Value::List(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        item.as_number().ok_or_else(|| {
                            invalid_argument(format!(
                                "column '{name}' index {i} is not a number"
                            ))
                            .with_span(field.span)
                        })
                    })
                    .collect::<Result<Vec<f64>, EvalError>>()?,
                other => {
                    return Err(type_mismatch(format!("list for column '{name}'"), other)
                        .with_span(field.span))
                }
            };
            columns.push((name.to_string(), values));
        }
        Value::table(columns)
    }

    pub(crate) fn eval_cashflow_literal(&mut self, amounts: ExprRange) -> EvalResult {
        Ok(Value::cashflow(self.eval_amounts(amounts, "cashflow")?))
    }

    /// Evaluate each expression to a number, naming the offending index.
    fn eval_amounts(&mut self, amounts: ExprRange, what: &str) -> Result<Vec<f64>, EvalError> {
        let ids: SmallVec<[ExprId; 8]> = SmallVec::from_slice(self.arena.get_expr_list(amounts));
        ids.into_iter()
            .enumerate()
            .map(|(i, id)| match self.eval_expr(id)? {
                Value::Number(n) => Ok(n),
                other => Err(invalid_argument(format!(
                    "{what} index {i} is not a number (found {})",
                    other.type_name()
                ))
                .with_span(self.arena.get_expr(id).span)),
            })
            .collect()
    }

    // Formula dispatch

    pub(crate) fn eval_finance(&mut self, func: FinanceFn, args: ExprRange) -> EvalResult {
        let ids: SmallVec<[ExprId; 5]> = SmallVec::from_slice(self.arena.get_expr_list(args));
        if !func.accepts(ids.len()) {
            return Err(arity_mismatch(func.name(), func.arity().0, ids.len()));
        }

        match func {
            FinanceFn::Npv => {
                let first = self.finance_operand(ids[0])?;
                let second = self.finance_operand(ids[1])?;
                let (flows, rate) = match (first, second) {
                    (Operand::Series(flows), Operand::Scalar(rate))
                    | (Operand::Scalar(rate), Operand::Series(flows)) => (flows, rate),
                    _ => {
                        return Err(invalid_argument(
                            "NPV expects a cash flow series and a rate",
                        ))
                    }
                };
                Ok(Value::Number(npv(rate, &flows)?))
            }
            FinanceFn::Irr => match self.finance_operand(ids[0])? {
                Operand::Series(flows) => Ok(Value::Number(irr(&flows)?)),
                Operand::Scalar(_) => Err(invalid_argument("IRR expects a cash flow series")),
            },
            FinanceFn::Pv | FinanceFn::Fv => {
                let mut nums = [0.0; 4];
                for (slot, id) in nums.iter_mut().zip(&ids) {
                    *slot = self.eval_number(*id, func.name())?;
                }
                let [rate, nper, pmt, other] = nums;
                let result = if func == FinanceFn::Pv {
                    pv(rate, nper, pmt, other)?
                } else {
                    fv(rate, nper, pmt, other)?
                };
                Ok(Value::Number(result))
            }
            FinanceFn::Wacc => {
                let mut nums = [0.0; 5];
                for (slot, id) in nums.iter_mut().zip(&ids) {
                    *slot = self.eval_number(*id, "WACC")?;
                }
                let [ew, dw, ce, cd, tax] = nums;
                Ok(Value::Number(wacc(ew, dw, ce, cd, tax)))
            }
            FinanceFn::Capm => {
                let risk_free = self.eval_number(ids[0], "CAPM risk-free rate")?;
                let beta = self.eval_expr(ids[1])?;
                let market = self.eval_number(ids[2], "CAPM market return")?;
                match &beta {
                    Value::Number(b) => Ok(Value::Number(capm(risk_free, *b, market))),
                    Value::Portfolio(p) => {
                        Ok(Value::Number(capm(risk_free, p.expected_return(), market)))
                    }
                    Value::List(_) | Value::Cashflow(_) => {
                        let betas = series(&beta, "CAPM betas")?;
                        Ok(Value::number_list(
                            betas.into_iter().map(|b| capm(risk_free, b, market)),
                        ))
                    }
                    other => Err(type_mismatch("number, list or portfolio for CAPM beta", other)),
                }
            }
            FinanceFn::Var => {
                let source = self.eval_expr(ids[0])?;
                let confidence = self.eval_number(ids[1], "VAR confidence")?;
                let var = match &source {
                    Value::Portfolio(p) => {
                        weighted_value_at_risk(p.assets(), p.weights(), confidence)?
                    }
                    other => value_at_risk(&series(other, "VAR")?, confidence)?,
                };
                Ok(Value::Number(var))
            }
            FinanceFn::Sma | FinanceFn::Ema => {
                let source = self.eval_expr(ids[0])?;
                let values = series(&source, func.name())?;
                let period = count(self.eval_number(ids[1], "period")?, "period")?;
                let averaged = if func == FinanceFn::Sma {
                    sma(&values, period)?
                } else {
                    ema(&values, period)?
                };
                Ok(Value::number_list(averaged))
            }
            FinanceFn::Amortize => {
                let principal = self.eval_number(ids[0], "AMORTIZE principal")?;
                let rate = self.eval_number(ids[1], "AMORTIZE rate")?;
                let periods = count(self.eval_number(ids[2], "periods")?, "periods")?;
                let rows = amortize(principal, rate, periods)?;
                let columns = AmortizationRow::COLUMNS
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        (
                            (*name).to_string(),
                            rows.iter().map(|row| row.values()[i]).collect(),
                        )
                    })
                    .collect();
                Value::table(columns)
            }
        }
    }

    /// Resolve an NPV/IRR argument. `a + b` and `a - b` of two series
    /// combine element-wise, truncated to the shorter one.
    fn finance_operand(&mut self, id: ExprId) -> Result<Operand, EvalError> {
        let expr = *self.arena.get_expr(id);
        if let ExprKind::Binary {
            op: op @ (BinaryOp::Add | BinaryOp::Sub),
            left,
            right,
        } = expr.kind
        {
            let left = self.finance_operand(left)?;
            let right = self.finance_operand(right)?;
            let apply = |a: f64, b: f64| if op == BinaryOp::Add { a + b } else { a - b };
            return match (left, right) {
                (Operand::Series(a), Operand::Series(b)) => {
                    Ok(Operand::Series(zip_with(&a, &b, apply)))
                }
                (Operand::Scalar(a), Operand::Scalar(b)) => Ok(Operand::Scalar(apply(a, b))),
                _ => Err(invalid_argument(format!(
                    "cannot apply `{}` to a number and a cash flow series",
                    op.as_symbol()
                ))
                .with_span(expr.span)),
            };
        }
        match self.eval_expr(id)? {
            Value::Number(n) => Ok(Operand::Scalar(n)),
            value @ (Value::List(_) | Value::Cashflow(_)) => {
                Ok(Operand::Series(series(&value, "cash flow")?))
            }
            other => Err(type_mismatch("number, list or cashflow", &other).with_span(expr.span)),
        }
    }

    // Declarations

    pub(crate) fn exec_cashflow_decl(
        &mut self,
        name: Name,
        amounts: ExprRange,
    ) -> Result<(), EvalError> {
        let amounts = self.eval_amounts(amounts, "cashflow")?;
        self.env.define(name, Value::cashflow(amounts));
        Ok(())
    }

    pub(crate) fn exec_portfolio_decl(
        &mut self,
        name: Name,
        holdings: HoldingRange,
    ) -> Result<(), EvalError> {
        let holdings: SmallVec<[Holding; 8]> =
            SmallVec::from_slice(self.arena.get_holdings(holdings));
        let mut assets = Vec::with_capacity(holdings.len());
        let mut amounts = Vec::with_capacity(holdings.len());
        for holding in holdings {
            assets.push(self.eval_number(holding.asset, "portfolio asset")?);
            amounts.push(self.eval_number(holding.weight, "portfolio weight")?);
        }
        let portfolio = Value::portfolio_from_amounts(assets, &amounts)?;
        self.env.define(name, portfolio);
        Ok(())
    }

    /// `DEBIT ledger amount ["description"] [date]`. The ledger is created
    /// in the global scope on first use. A negative amount is recorded on
    /// the opposite side.
    pub(crate) fn exec_ledger_entry(
        &mut self,
        side: LedgerSide,
        ledger: Name,
        amount: ExprId,
        description: ExprId,
        date: ExprId,
    ) -> Result<(), EvalError> {
        let amount = self.eval_number(amount, "ledger amount")?;
        let description = self.eval_optional_text(description, "ledger description")?;
        let date = self.eval_optional_text(date, "ledger date")?;

        let target = match self.env.get(ledger) {
            Some(Value::Ledger(existing)) => existing,
            Some(other) => return Err(type_mismatch("ledger", &other)),
            None => {
                let created = LedgerValue::new();
                self.env.define_global(ledger, Value::Ledger(created.clone()));
                created
            }
        };

        let (side, amount) = match (side, amount < 0.0) {
            (LedgerSide::Debit, true) => (LedgerSide::Credit, -amount),
            (LedgerSide::Credit, true) => (LedgerSide::Debit, -amount),
            (side, false) => (side, amount),
        };
        target.append(LedgerEntry {
            date,
            debit: (side == LedgerSide::Debit).then_some(amount),
            credit: (side == LedgerSide::Credit).then_some(amount),
            description,
        });
        Ok(())
    }

    fn eval_optional_text(&mut self, id: ExprId, what: &str) -> Result<String, EvalError> {
        if !id.is_valid() {
            return Ok(String::new());
        }
        match self.eval_expr(id)? {
            Value::Str(s) => Ok(s.to_string()),
            Value::Nothing => Ok(String::new()),
            other => Err(type_mismatch(format!("string for {what}"), &other)),
        }
    }

    // Scenarios

    fn scenario(&self, name: Name) -> Result<Heap<ScenarioBlock>, EvalError> {
        match self.env.get(name) {
            Some(Value::Block(block)) => Ok(block),
            _ => Err(unknown_scenario(self.name_text(name))),
        }
    }

    /// Execute a scenario body in the current environment.
    ///
    /// `RETURN` ends the body early. A returned value becomes the scenario's
    /// `result`; a bare `RETURN` leaves `result` as the body left it.
    fn exec_scenario_body(&mut self, block: &ScenarioBlock) -> Result<(), EvalError> {
        let outcome = self.with_arena(&block.arena, |this| this.exec_statements(block.body))?;
        if let ExecOutcome::Return(value) = outcome {
            debug!(scenario = %block.name, "RETURN ends the scenario");
            if !matches!(value, Value::Nothing) {
                self.env.define(self.names.result, value);
            }
        }
        Ok(())
    }

    /// `RUN scenario [WITH model]`.
    ///
    /// The body runs in a child environment. Without a model the value is
    /// whatever the body bound to `result`; with one, the model's return
    /// value. Either way it is also bound to `last_run`.
    pub(crate) fn exec_run(&mut self, scenario: Name, model: Option<Name>) -> EvalResult {
        let block = self.scenario(scenario)?;
        let model = match model {
            Some(name) => match self.env.get(name) {
                Some(value) if value.is_callable() => Some(value),
                _ => return Err(unknown_model(self.name_text(name))),
            },
            None => None,
        };

        debug!(scenario = %block.name, "running scenario");
        let value = self.with_child_env(|this| {
            this.exec_scenario_body(&block)?;
            let result = this.env.get_local(this.names.result);
            match &model {
                Some(model) => this.invoke_model(model, result),
                None => Ok(result.unwrap_or(Value::Nothing)),
            }
        })?;
        debug!(scenario = %block.name, "scenario finished");

        self.env.define(self.names.last_run, value.clone());
        Ok(value)
    }

    /// Call a model with the scenario's outcome. A one-parameter model gets
    /// `result` if the scenario bound it, otherwise an object of every
    /// binding the scenario made.
    fn invoke_model(&mut self, model: &Value, result: Option<Value>) -> EvalResult {
        let span = tally_ir::Span::DUMMY;
        let arity = match model {
            Value::Function(function) => function.arity(),
            Value::Lambda(lambda) => Arity::Fixed(lambda.params.len()),
            other => return Err(type_mismatch("callable model", other)),
        };
        match arity {
            Arity::Fixed(0) => self.call_value(model, &[], span),
            Arity::Fixed(1) => {
                let arg = match result {
                    Some(value) => value,
                    None => self.scope_snapshot(),
                };
                self.call_value(model, &[arg], span)
            }
            Arity::Variadic => self.call_value(model, &[result.unwrap_or(Value::Nothing)], span),
            Arity::Fixed(n) => Err(invalid_argument(format!(
                "a model takes at most one parameter, this one takes {n}"
            ))),
        }
    }

    /// Bindings of the current scope as an object, sorted by name.
    fn scope_snapshot(&self) -> Value {
        let scope = self.env.current_scope();
        let mut fields: Vec<(String, Value)> = scope
            .borrow()
            .bindings()
            .map(|(name, value)| (self.name_text(name).to_string(), value.clone()))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        Value::object(ObjectValue::new(fields))
    }

    /// `SIMULATE scenario n`: run the scenario `n` times, collecting each
    /// run's `result` into `simulation_results`.
    pub(crate) fn exec_simulate(&mut self, scenario: Name, times: ExprId) -> EvalResult {
        let block = self.scenario(scenario)?;
        let runs = count(self.eval_number(times, "SIMULATE count")?, "SIMULATE count")?;

        debug!(scenario = %block.name, runs, "simulating scenario");
        let mut results = Vec::with_capacity(runs);
        for _ in 0..runs {
            let result = self.with_child_env(|this| {
                this.exec_scenario_body(&block)?;
                Ok::<_, EvalError>(
                    this.env
                        .get_local(this.names.result)
                        .unwrap_or(Value::Nothing),
                )
            })?;
            results.push(result);
        }

        let results = Value::list(results);
        self.env
            .define(self.names.simulation_results, results.clone());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::super::coerce::number;
    use super::*;

    #[test]
    fn count_rejects_fractions_and_negatives() {
        assert_eq!(count(3.0, "n"), Ok(3));
        assert!(count(2.5, "n").is_err());
        assert!(count(-1.0, "n").is_err());
        assert!(count(f64::INFINITY, "n").is_err());
    }

    #[test]
    fn number_names_the_argument() {
        let err = number(&Value::string("x"), "rate").unwrap_err();
        assert_eq!(err.message, "type mismatch: expected number for rate, got string");
    }
}
