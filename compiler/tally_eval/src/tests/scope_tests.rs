//! Scope rules, and scope restoration when a block fails part way.

use super::{error_kind, output, run};
use crate::EvalErrorKind;
use pretty_assertions::assert_eq;

fn undefined(name: &str) -> EvalErrorKind {
    EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    }
}

#[test]
fn block_bindings_do_not_leak() {
    assert_eq!(
        error_kind("DO\n    LET inner = 1\nEND\nPRINT inner"),
        undefined("inner")
    );
}

#[test]
fn set_updates_the_owning_scope() {
    let source = "\
LET total = 0
DO
    SET total = total + 5
END
PRINT total
";
    assert_eq!(output(source), vec!["5"]);
}

#[test]
fn set_of_unknown_name_fails() {
    assert_eq!(error_kind("SET ghost = 1"), undefined("ghost"));
}

#[test]
fn let_shadows_inside_a_block() {
    let source = "\
LET x = 1
DO
    LET x = 2
    PRINT x
END
PRINT x
";
    assert_eq!(output(source), vec!["2", "1"]);
}

#[test]
fn loop_variable_is_scoped_to_the_loop() {
    assert_eq!(
        error_kind("FOR i IN 1 TO 2\n    LET seen = i\nEND\nPRINT i"),
        undefined("i")
    );
}

#[test]
fn qualified_lookups() {
    let source = "\
LET rate = 1
FUNCTION f()
    LET rate = 2
    RETURN global::rate
END
PRINT f()
DO
    LET rate = 3
    PRINT parent::rate
END
";
    assert_eq!(output(source), vec!["1", "1"]);
}

#[test]
fn unknown_qualified_name() {
    assert_eq!(error_kind("PRINT global::nope"), undefined("global::nope"));
}

#[test]
fn function_body_cannot_see_caller_locals() {
    let source = "\
FUNCTION peek()
    RETURN secret
END
DO
    LET secret = 1
    PRINT peek()
END
";
    assert_eq!(error_kind(source), undefined("secret"));
}

/// Every block form must leave exactly the global scope behind when its
/// body fails.
#[test]
fn scopes_restored_after_errors() {
    let failing_bodies = [
        "DO\n    LET y = 1\n    PRINT missing\nEND",
        "IF true\n    LET y = 1\n    PRINT missing\nEND",
        "IF false\n    PRINT 0\nELSE\n    PRINT missing\nEND",
        "WHILE true DO\n    PRINT missing\nEND",
        "FOR i IN 1 TO 2\n    PRINT missing\nEND",
        "FOR EACH x IN [1]\n    PRINT missing\nEND",
        "FUNCTION f()\n    DO\n        PRINT missing\n    END\nEND\nf()",
        "LET g = x -> x + missing\ng(1)",
    ];
    for source in failing_bodies {
        let outcome = run(source);
        let err = outcome.values.unwrap_err();
        assert_eq!(err.kind, undefined("missing"), "{source}");
        assert_eq!(outcome.depth, 1, "{source}");
    }
}
