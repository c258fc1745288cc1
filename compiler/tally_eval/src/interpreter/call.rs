//! Calling functions, lambdas and native builtins.

use std::rc::Rc;

use rand::rngs::StdRng;
use tally_ir::{Span, StringInterner};

use super::Interpreter;
use crate::errors::{arity_mismatch, not_callable, recursion_limit, EvalResult};
use crate::value::{Arity, FunctionValue, LambdaValue, NativeFunction, UserFunction};
use crate::Value;

/// What a native builtin sees of the interpreter: enough to call back into
/// user code, read bindings and draw random numbers.
pub struct CallContext<'c, 'a> {
    interpreter: &'c mut Interpreter<'a>,
    span: Span,
}

impl<'a> CallContext<'_, 'a> {
    /// Call `callee` the same way a call expression would.
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        self.interpreter.call_value(callee, args, self.span)
    }

    /// Look a binding up by its text.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.interpreter.get(name)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.interpreter.rng
    }

    /// Span of the call expression.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interpreter.interner
    }
}

impl Interpreter<'_> {
    /// Call any callable value with already-evaluated arguments.
    pub fn call_value(&mut self, callee: &Value, args: &[Value], span: Span) -> EvalResult {
        match callee {
            Value::Function(FunctionValue::Native(native)) => self.call_native(*native, args, span),
            Value::Function(FunctionValue::User(function)) => {
                self.call_user_function(function, args, span)
            }
            Value::Lambda(lambda) => self.call_lambda(lambda, args, span),
            other => Err(not_callable(other).with_span(span)),
        }
    }

    fn call_native(&mut self, native: NativeFunction, args: &[Value], span: Span) -> EvalResult {
        if let Arity::Fixed(expected) = native.arity {
            if expected != args.len() {
                return Err(arity_mismatch(native.name, expected, args.len()).with_span(span));
            }
        }
        let mut ctx = CallContext {
            interpreter: self,
            span,
        };
        (native.func)(&mut ctx, args).map_err(|e| e.or_span(span))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name))]
    fn call_user_function(
        &mut self,
        function: &UserFunction,
        args: &[Value],
        span: Span,
    ) -> EvalResult {
        if function.params.len() != args.len() {
            return Err(
                arity_mismatch(&function.name, function.params.len(), args.len()).with_span(span),
            );
        }
        let depth = Rc::clone(&self.depth);
        let Some(_guard) = depth.enter() else {
            return Err(recursion_limit(depth.limit()).with_span(span));
        };

        let bindings = function.params.iter().copied().zip(args.iter().cloned());
        let outcome = self.with_arena(&function.arena, |this| {
            this.with_call_scope(function.closure.clone(), bindings, |scoped| {
                scoped.exec_statements(function.body)
            })
        })?;
        Ok(outcome.into_value())
    }

    fn call_lambda(&mut self, lambda: &LambdaValue, args: &[Value], span: Span) -> EvalResult {
        if lambda.params.len() != args.len() {
            return Err(arity_mismatch("lambda", lambda.params.len(), args.len()).with_span(span));
        }
        let depth = Rc::clone(&self.depth);
        let Some(_guard) = depth.enter() else {
            return Err(recursion_limit(depth.limit()).with_span(span));
        };

        let bindings = lambda.params.iter().copied().zip(args.iter().cloned());
        self.with_arena(&lambda.arena, |this| {
            this.with_call_scope(lambda.captured.clone(), bindings, |scoped| {
                scoped.eval_expr(lambda.body)
            })
        })
    }
}
