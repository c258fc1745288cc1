use super::*;
use tally_ir::SharedInterner;

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn scope_define_get() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let mut scope = Scope::new();
    scope.define(x, num(42.0));
    assert_eq!(scope.get(x), Some(num(42.0)));
    assert_eq!(scope.get(interner.intern("y")), None);
}

#[test]
fn child_scope_shadows_parent() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().define(x, num(1.0));

    let mut child = Scope::with_parent(parent.clone());
    assert_eq!(child.get(x), Some(num(1.0)));
    child.define(x, num(2.0));

    assert_eq!(child.get(x), Some(num(2.0)));
    assert_eq!(parent.borrow().get(x), Some(num(1.0)));
}

#[test]
fn push_pop_restores_bindings() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, num(1.0));

    env.push_scope();
    env.define(x, num(2.0));
    assert_eq!(env.get(x), Some(num(2.0)));
    assert_eq!(env.depth(), 2);

    env.pop_scope();
    assert_eq!(env.get(x), Some(num(1.0)));
    assert_eq!(env.depth(), 1);
}

#[test]
fn global_scope_is_never_popped() {
    let mut env = Environment::new();
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
}

#[test]
fn assign_updates_owning_scope() {
    let interner = SharedInterner::default();
    let total = interner.intern("total");

    let mut env = Environment::new();
    env.define(total, num(0.0));
    env.push_scope();
    env.push_scope();
    assert!(env.assign(total, num(5.0)).is_ok());
    env.pop_scope();
    env.pop_scope();

    assert_eq!(env.get(total), Some(num(5.0)));
}

#[test]
fn assign_unbound_fails() {
    let interner = SharedInterner::default();
    let mut env = Environment::new();
    assert_eq!(env.assign(interner.intern("nope"), num(1.0)), Err(Unbound));
}

#[test]
fn get_local_ignores_outer_scopes() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, num(1.0));
    env.push_scope();
    assert_eq!(env.get_local(x), None);
    assert_eq!(env.get(x), Some(num(1.0)));
}

#[test]
fn qualified_lookups() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, num(1.0));
    env.push_scope();
    env.define(x, num(2.0));
    env.push_scope();
    env.define(x, num(3.0));

    assert_eq!(env.get(x), Some(num(3.0)));
    assert_eq!(env.get_parent(x), Some(num(2.0)));
    assert_eq!(env.get_global(x), Some(num(1.0)));
}

#[test]
fn parent_lookup_at_top_level_reads_global() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, num(7.0));
    assert_eq!(env.get_parent(x), Some(num(7.0)));
}

#[test]
fn call_scope_uses_captured_parent() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.push_scope();
    env.define(x, num(10.0));
    let captured = env.current_scope();
    env.pop_scope();
    assert_eq!(env.get(x), None);

    env.push_scope_in(captured);
    assert_eq!(env.get(x), Some(num(10.0)));
    env.pop_scope();
}

#[test]
fn child_environment_sees_outer_bindings_but_not_the_reverse() {
    let interner = SharedInterner::default();
    let rate = interner.intern("rate");
    let result = interner.intern("result");

    let mut env = Environment::new();
    env.define(rate, num(0.05));

    let mut child = env.child();
    assert_eq!(child.get(rate), Some(num(0.05)));
    child.define(result, num(1.0));

    assert_eq!(env.get(result), None);
    assert!(child.global_scope().ptr_eq(&env.global_scope()));
}
