use super::*;
use pretty_assertions::assert_eq;

#[test]
fn assignment_conditional() {
    assert_eq!(
        desugar_conditionals("x = if a then 1 else 2"),
        "x = ( a ) ? ( 1 ) : 2"
    );
}

#[test]
fn statement_if_untouched() {
    assert_eq!(desugar_conditionals("if a:"), "if a:");
    assert_eq!(desugar_conditionals("    if a: f()"), "    if a: f()");
    assert_eq!(desugar_conditionals("else if b:"), "else if b:");
    assert_eq!(desugar_conditionals("else:"), "else:");
}

#[test]
fn conditional_as_argument() {
    assert_eq!(
        desugar_conditionals("f(if a then b else c)"),
        "f(( a ) ? ( b ) : c)"
    );
}

#[test]
fn stacked_statement_if_kept() {
    assert_eq!(
        desugar_conditionals("def f(x): if x: g()"),
        "def f(x): if x: g()"
    );
}

#[test]
fn conditional_inside_object_literal() {
    assert_eq!(
        desugar_conditionals("x = {a: if b then 3 else 2}"),
        "x = {a: ( b ) ? ( 3 ) : 2}"
    );
}

#[test]
fn two_conditionals_on_one_line() {
    assert_eq!(
        desugar_conditionals("f(if a then 1 else 2, if b then 3 else 4)"),
        "f(( a ) ? ( 1 ) : 2, ( b ) ? ( 3 ) : 4)"
    );
}

#[test]
fn conditional_after_stacked_if() {
    assert_eq!(
        desugar_conditionals("def f(x): if x: y = if x then 1 else 2"),
        "def f(x): if x: y = ( x ) ? ( 1 ) : 2"
    );
}

#[test]
fn conditional_after_else_if() {
    assert_eq!(
        desugar_conditionals("else if b: x = if c then 1 else 2"),
        "else if b: x = ( c ) ? ( 1 ) : 2"
    );
}

#[test]
fn words_containing_keywords_untouched() {
    assert_eq!(desugar_conditionals("x = iffy + thence + elsewhere"), "x = iffy + thence + elsewhere");
}
