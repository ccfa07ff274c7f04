use super::*;
use rbtc_common::KernelOptions;
use rbtc_symbols::GlobalStateBuilder;

#[test]
fn levenshtein_distance_of_identical_strings_is_zero() {
    assert_eq!(levenshtein("foo", "foo"), 0);
}

#[test]
fn levenshtein_distance_counts_a_single_substitution() {
    assert_eq!(levenshtein("plus", "pluz"), 1);
}

#[test]
fn levenshtein_distance_counts_insertions_and_deletions() {
    assert_eq!(levenshtein("fetch", "ftch"), 1);
    assert_eq!(levenshtein("", "abc"), 3);
}

#[test]
fn suggest_method_finds_the_closest_declared_member_within_range() {
    let mut b = GlobalStateBuilder::new(KernelOptions::default());
    let builtins = b.builtins();
    let pluz = b.names_mut().enter_name_utf8("pluz").unwrap();
    let target = b.names_mut().enter_name_utf8("plus").unwrap();
    b.enter_method(builtins.integer, pluz, 0, vec![], rbtc_common::TypeId::UNTYPED);
    let gs = b.freeze();

    let suggestion = suggest_method(&gs, builtins.integer, target, 2);
    assert_eq!(suggestion.as_deref(), Some("pluz"));
}

#[test]
fn suggest_method_respects_the_max_distance_threshold() {
    let mut b = GlobalStateBuilder::new(KernelOptions::default());
    let builtins = b.builtins();
    let totally_different = b.names_mut().enter_name_utf8("zzzzzzzzzz").unwrap();
    let target = b.names_mut().enter_name_utf8("plus").unwrap();
    b.enter_method(builtins.integer, totally_different, 0, vec![], rbtc_common::TypeId::UNTYPED);
    let gs = b.freeze();
    assert_eq!(suggest_method(&gs, builtins.integer, target, 2), None);
}

#[test]
fn suggest_method_never_suggests_the_exact_name_itself() {
    let mut b = GlobalStateBuilder::new(KernelOptions::default());
    let builtins = b.builtins();
    let plus = b.names_mut().enter_name_utf8("plus").unwrap();
    b.enter_method(builtins.integer, plus, 0, vec![], rbtc_common::TypeId::UNTYPED);
    let gs = b.freeze();
    assert_eq!(suggest_method(&gs, builtins.integer, plus, 2), None);
}

#[test]
fn suggest_method_walks_up_the_superclass_chain() {
    let mut b = GlobalStateBuilder::new(KernelOptions::default());
    let builtins = b.builtins();
    let pluz = b.names_mut().enter_name_utf8("pluz").unwrap();
    let target = b.names_mut().enter_name_utf8("plus").unwrap();
    // Declared on `Object`, Integer's ancestor, not on `Integer` itself.
    b.enter_method(builtins.object, pluz, 0, vec![], rbtc_common::TypeId::UNTYPED);
    let gs = b.freeze();
    let suggestion = suggest_method(&gs, builtins.integer, target, 2);
    assert_eq!(suggestion.as_deref(), Some("pluz"));
}
