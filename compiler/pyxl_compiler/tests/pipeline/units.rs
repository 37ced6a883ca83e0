use pretty_assertions::assert_eq;

use crate::common::{compile_ok, output_line};

// === Range loops ===

#[test]
fn upper_bound_loop() {
    let js = compile_ok("for i < 5:\n    f(i)");
    let header = output_line(&js, 0);
    assert!(header.starts_with("for (let $_i"));
    assert!(header.contains(" = 0, $_end"));
    assert!(header.contains("= 5;"));
    assert!(header.ends_with("let i = $_i1$_;"));
    assert_eq!(output_line(&js, 1), "    f(i); }");
}

#[test]
fn strict_lower_bound_loop() {
    let js = compile_ok("for 2 < i < 5:\n    total += i");
    let header = output_line(&js, 0);
    assert!(header.contains("$Math.floor(2) + 1"));
    assert!(header.contains("< $_end2$_"));
    assert!(output_line(&js, 1).ends_with('}'));
}

#[test]
fn inline_loop_stays_on_one_line() {
    let js = compile_ok("for i ≤ 3: f(i)\ng()");
    assert_eq!(js.split('\n').count(), 2);
    assert!(output_line(&js, 0).contains("<= $_end2$_"));
    assert_eq!(output_line(&js, 1), "g();");
}

// === Container loops ===

#[test]
fn container_loop_counts_iterators() {
    let js = compile_ok("for v ∊ [10, 20]:\n    total += v");
    let header = output_line(&js, 0);
    assert!(header.contains("$iteratorCount.set("));
    assert!(header.contains("let v = $_container2$_[$_key1$_];"));
    assert!(output_line(&js, 1).contains("$iteratorCount.get("));
}

#[test]
fn in_keyword_means_element_of() {
    let a = compile_ok("for v in list:\n    f(v)");
    let b = compile_ok("for v ∊ list:\n    f(v)");
    assert_eq!(a, b);
}

// === With ===

#[test]
fn with_binds_and_restores_properties() {
    let js = compile_ok("with x, y ∊ player:\n    x += 1\nz = 0");
    let header = output_line(&js, 0);
    assert!(header.starts_with("{ let $_obj1$_ = (player), x = $_obj1$_.x, y = $_obj1$_.y"));
    assert!(header.ends_with("try {"));
    let body = output_line(&js, 1);
    assert!(body.starts_with("    x += 1;"));
    assert!(body.contains("} finally {"));
    assert!(body.contains("$_obj1$_.y = y;"));
    assert_eq!(output_line(&js, 2), "z = 0;");
}

// === Operators ===

#[test]
fn less_equal_is_idempotent() {
    let ascii = compile_ok("if a <= b: f()");
    let glyph = compile_ok("if a ≤ b: f()");
    assert_eq!(ascii, glyph);
    assert!(glyph.contains("a <= b"));
}

#[test]
fn math_notation() {
    assert_eq!(compile_ok("y = 2πr"), "y = 2 * ($Math.PI) * r;");
    assert_eq!(compile_ok("a = x²"), "a = (x * x);");
}

#[test]
fn block_structure_keeps_line_count() {
    let source = "def f(a, b default 2):\n    if a > b:\n        return a\n    else:\n        return b\nf(1)";
    let js = compile_ok(source);
    assert_eq!(js.split('\n').count(), source.split('\n').count());
    assert!(output_line(&js, 0).starts_with("const f = (function(a, b = 2) {"));
    assert!(output_line(&js, 4).ends_with("});"));
    assert_eq!(output_line(&js, 5), "f(1);");
}
