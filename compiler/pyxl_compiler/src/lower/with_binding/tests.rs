use super::*;
use crate::context::CompileOptions;
use pretty_assertions::assert_eq;

fn lower(test: &str) -> (Lowered, CompileContext) {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let lowered = lower_with(test, &mut ctx).unwrap();
    (lowered, ctx)
}

#[test]
fn single_binding_template() {
    let (lowered, ctx) = lower("x ∊ player");
    assert_eq!(
        ctx.restore(&lowered.prologue),
        "{ let $_obj1$_ = (player), x = $_obj1$_.x, \
         $_xDescriptor3$_ = $Object.getOwnPropertyDescriptor($_obj1$_, \"x\"); \
         if (! $_xDescriptor3$_) { $error(\"No 'x' property on object in this with statement\")};\
         $Object.defineProperties($_obj1$_, {x: {configurable: true, get() { return x; }, \
         set($_v2$_) { x = $_v2$_; }}, }); try {"
    );
    assert_eq!(
        ctx.restore(&lowered.epilogue),
        "} finally { if ($_xDescriptor3$_.get) { $Object.defineProperty($_obj1$_, \"x\", $_xDescriptor3$_); } \
         else { delete $_obj1$_.x; } $_obj1$_.x = x; }}"
    );
}

#[test]
fn every_name_restored() {
    let (lowered, _) = lower(" a ,b, c∊ f(1, 2)");
    assert!(lowered.prologue.starts_with("{ let $_obj1$_ = (f(1, 2)), a = $_obj1$_.a, b = $_obj1$_.b, c = $_obj1$_.c"));
    for name in ["a", "b", "c"] {
        assert!(lowered.epilogue.contains(&format!("delete $_obj1$_.{name};")));
        assert!(lowered.epilogue.contains(&format!("$_obj1$_.{name} = {name};")));
    }
    assert!(lowered.epilogue.ends_with("}}"));
}

#[test]
fn restore_runs_in_finally() {
    let (lowered, _) = lower("x ∊ o");
    assert!(lowered.prologue.ends_with("try {"));
    assert!(lowered.epilogue.starts_with("} finally {"));
}

#[test]
fn missing_element_of_rejected() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let err = lower_with("x = player", &mut ctx).unwrap_err();
    assert_eq!(err.code, ErrorCode::E2003);
    assert_eq!(err.message, "Incorrect WITH statement syntax");
}

#[test]
fn non_identifier_rejected() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    assert!(lower_with("a.b ∊ o", &mut ctx).is_err());
    assert!(lower_with(", ∊ o", &mut ctx).is_err());
}
