//! Concept (macro) resolution tests: positional rebinding, shared bodies,
//! arity checking.

mod common;

use std::sync::Arc;

use common::*;
use specparse::{create_specification, ErrorKind, StepArg};

#[test]
fn invocation_rebinds_formals_to_actuals_positionally() {
    let dictionary = dictionary_with(vec![concept(
        "transfer <amount> from <account>",
        &["Open the account page", "Submit the transfer form"],
    )]);
    let tokens = vec![
        spec_heading("Spec", 1),
        scenario_heading("S", 2),
        step(r#"transfer "100" from "savings""#, 3),
    ];
    let (spec, warnings) = create_specification(&tokens, &dictionary, "a.spec").unwrap();

    assert!(warnings.is_empty());
    let step = &spec.scenarios[0].steps[0];
    assert!(step.is_concept);
    assert_eq!(step.value, "transfer {} from {}");
    assert_eq!(
        step.lookup.get("amount"),
        Some(&StepArg::Static("100".into()))
    );
    assert_eq!(
        step.lookup.get("account"),
        Some(&StepArg::Static("savings".into()))
    );
}

#[test]
fn two_invocations_share_one_body() {
    let dictionary = dictionary_with(vec![concept(
        "log in as <user>",
        &["Open the login page", "Submit credentials"],
    )]);
    let tokens = vec![
        spec_heading("Spec", 1),
        scenario_heading("S", 2),
        step(r#"log in as "admin""#, 3),
        step(r#"log in as "guest""#, 4),
    ];
    let (spec, _) = create_specification(&tokens, &dictionary, "a.spec").unwrap();

    let first = spec.scenarios[0].steps[0].concept_steps.as_ref().unwrap();
    let second = spec.scenarios[0].steps[1].concept_steps.as_ref().unwrap();
    // Reference-identical, not a copy.
    assert!(Arc::ptr_eq(first, second));
    assert_eq!(first.len(), 2);

    // Each invocation still carries its own binding table.
    assert_eq!(
        spec.scenarios[0].steps[0].lookup.get("user"),
        Some(&StepArg::Static("admin".into()))
    );
    assert_eq!(
        spec.scenarios[0].steps[1].lookup.get("user"),
        Some(&StepArg::Static("guest".into()))
    );
}

#[test]
fn invocation_body_is_shared_with_the_dictionary() {
    let dictionary = dictionary_with(vec![concept("log in", &["Open the login page"])]);
    let tokens = vec![
        spec_heading("Spec", 1),
        scenario_heading("S", 2),
        step("log in", 3),
    ];
    let (spec, _) = create_specification(&tokens, &dictionary, "a.spec").unwrap();

    let invocation = spec.scenarios[0].steps[0].concept_steps.as_ref().unwrap();
    let owned = &dictionary.lookup("log in").unwrap().steps;
    assert!(Arc::ptr_eq(invocation, owned));
}

#[test]
fn arity_mismatch_is_fatal() {
    // "check <a> and <b>" invoked with three arguments still normalizes to a
    // different key, so force the mismatch through a same-key call with a
    // definition whose formals disagree: two formals, one actual.
    let dictionary = dictionary_with(vec![concept("check <a> against <b>", &["noop"])]);
    let mut definition_mismatch = dictionary_with(vec![]);
    let mut short = concept("check <a> against <b>", &["noop"]);
    short.definition.args.truncate(1);
    definition_mismatch.insert(short);

    let tokens = vec![
        spec_heading("Spec", 1),
        scenario_heading("S", 2),
        step(r#"check "1" against "2""#, 3),
    ];
    let err = create_specification(&tokens, &definition_mismatch, "a.spec").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::ConceptArityMismatch {
            expected: 1,
            actual: 2
        }
    );

    // The well-formed dictionary accepts the same invocation.
    assert!(create_specification(&tokens, &dictionary, "a.spec").is_ok());
}

#[test]
fn invocation_arguments_bypass_data_table_resolution() {
    // <user> is not a data-table column; as a concept actual it is rebound
    // positionally rather than resolved, so this parses.
    let dictionary = dictionary_with(vec![concept("log in as <name>", &["noop"])]);
    let tokens = vec![
        spec_heading("Spec", 1),
        scenario_heading("S", 2),
        step("log in as <user>", 3),
    ];
    let (spec, _) = create_specification(&tokens, &dictionary, "a.spec").unwrap();

    let step = &spec.scenarios[0].steps[0];
    assert!(step.is_concept);
    assert_eq!(
        step.lookup.get("name"),
        Some(&StepArg::Dynamic("user".into()))
    );
}

#[test]
fn same_step_text_without_a_matching_concept_is_a_literal_step() {
    let tokens = vec![
        spec_heading("Spec", 1),
        scenario_heading("S", 2),
        step(r#"log in as "admin""#, 3),
    ];
    let (spec, _) =
        create_specification(&tokens, &specparse::ConceptDictionary::new(), "a.spec").unwrap();
    let step = &spec.scenarios[0].steps[0];
    assert!(!step.is_concept);
    assert!(step.concept_steps.is_none());
    assert!(step.lookup.is_empty());
}

#[test]
fn concept_steps_in_contexts_resolve_too() {
    let dictionary = dictionary_with(vec![concept("prepare the database", &["noop"])]);
    let tokens = vec![
        spec_heading("Spec", 1),
        step("prepare the database", 2),
        scenario_heading("S", 3),
    ];
    let (spec, _) = create_specification(&tokens, &dictionary, "a.spec").unwrap();
    assert!(spec.contexts[0].is_concept);
}
