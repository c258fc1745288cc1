//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write as _;

use tally_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use tally_diagnostic::Diagnostic;
use tally_ir::{StmtKind, StringInterner, Token, TokenKind};
use tally_lexer::LexOutput;
use tally_parse::ParseOutput;

use super::{read_file, stderr_is_tty};
use crate::CliOptions;

/// Lex a file and print the token stream.
pub fn lex_file(path: &str, options: &CliOptions) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let lexed = tally_lexer::lex(&source, &interner);

    print!("{}", lex_listing(path, &lexed, &interner));
    report(path, &source, options, &lexed.diagnostics());
}

/// Parse a file and print a summary of its top-level statements.
pub fn parse_file(path: &str, options: &CliOptions) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let lexed = tally_lexer::lex(&source, &interner);
    let parsed = tally_parse::parse(&lexed, &interner);

    print!("{}", parse_listing(path, &parsed, &interner));
    let mut diagnostics = lexed.diagnostics();
    diagnostics.extend(parsed.diagnostics());
    report(path, &source, options, &diagnostics);
}

fn report(path: &str, source: &str, options: &CliOptions, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let mut emitter =
        TerminalEmitter::stderr(options.color, stderr_is_tty()).with_source(path, source);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(diagnostics.len(), 0);
    emitter.flush();
    std::process::exit(1);
}

/// One line per token: kind (with decoded payload) and byte span.
pub fn lex_listing(path: &str, lexed: &LexOutput, interner: &StringInterner) -> String {
    let mut out = format!("Tokens for '{path}' ({} tokens):\n", lexed.tokens.len());
    for token in &lexed.tokens {
        let _ = writeln!(out, "  {} @ {:?}", describe_token(token, interner), token.span);
    }
    out
}

fn describe_token(token: &Token, interner: &StringInterner) -> String {
    match token.kind {
        TokenKind::Number(n) => format!("Number({n})"),
        TokenKind::Str(text) => format!("Str({:?})", interner.lookup(text)),
        TokenKind::Date(text) => format!("Date({})", interner.lookup(text)),
        TokenKind::Money { amount, currency } => {
            format!("Money({amount} {})", interner.lookup(currency))
        }
        TokenKind::Ident(name) => format!("Ident({})", interner.lookup(name)),
        other => format!("{other:?}"),
    }
}

/// Statement and expression counts, then one line per top-level statement.
pub fn parse_listing(path: &str, parsed: &ParseOutput, interner: &StringInterner) -> String {
    let program = &parsed.program;
    let statements = program.statements();

    let mut out = format!("Parse result for '{path}':\n");
    let _ = writeln!(out, "  Statements: {}", statements.len());
    let _ = writeln!(out, "  Expressions: {}", program.arena.expr_count());
    let _ = writeln!(out, "  Errors: {}", parsed.errors.len());

    if !statements.is_empty() {
        out.push_str("\nStatements:\n");
        for &id in statements {
            let stmt = program.arena.get_stmt(id);
            let _ = writeln!(out, "  {} @ {:?}", describe_stmt(&stmt.kind, interner), stmt.span);
        }
    }
    out
}

fn describe_stmt(kind: &StmtKind, interner: &StringInterner) -> String {
    let named = |label: &str, name| format!("{label} {}", interner.lookup(name));
    match *kind {
        StmtKind::Let { name, .. } => named("LET", name),
        StmtKind::Set { name, .. } => named("SET", name),
        StmtKind::Print(_) => "PRINT".to_string(),
        StmtKind::Log(_) => "LOG".to_string(),
        StmtKind::Expr(_) => "expression".to_string(),
        StmtKind::Block(_) => "DO block".to_string(),
        StmtKind::If { branches, else_body } => {
            let arms = branches.len() + usize::from(else_body.is_some());
            format!("IF ({arms} arms)")
        }
        StmtKind::While { .. } => "WHILE".to_string(),
        StmtKind::For { var, .. } => named("FOR", var),
        StmtKind::ForEach { var, .. } => named("FOR EACH", var),
        StmtKind::Function { name, params, .. } => {
            format!("FUNCTION {}/{}", interner.lookup(name), params.len())
        }
        StmtKind::Return(_) => "RETURN".to_string(),
        StmtKind::Import(_) => "IMPORT".to_string(),
        StmtKind::Cashflow { name, .. } => named("CASHFLOW", name),
        StmtKind::Portfolio { name, .. } => named("PORTFOLIO", name),
        StmtKind::Scenario { name, .. } => named("SCENARIO", name),
        StmtKind::Run { scenario, model } => match model {
            Some(model) => format!(
                "RUN {} ON {}",
                interner.lookup(scenario),
                interner.lookup(model)
            ),
            None => named("RUN", scenario),
        },
        StmtKind::Simulate { scenario, .. } => named("SIMULATE", scenario),
        StmtKind::Ledger { side, ledger, .. } => {
            let label = match side {
                tally_ir::LedgerSide::Debit => "DEBIT",
                tally_ir::LedgerSide::Credit => "CREDIT",
            };
            named(label, ledger)
        }
        StmtKind::Error => "<error>".to_string(),
    }
}

#[cfg(test)]
mod tests;
