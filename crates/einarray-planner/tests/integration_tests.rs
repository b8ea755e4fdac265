//! Integration tests for einarray-planner

use einarray_planner::{labels, Label, ReductionPlan, SubscriptError, SubscriptSpec, Subscripts};

#[test]
fn test_text_and_structured_forms_agree() {
    let text = SubscriptSpec::from("ij,jk->ik").resolve().unwrap();
    let structured =
        SubscriptSpec::from(Subscripts::new(vec![labels("ij"), labels("jk")], labels("ik")).unwrap())
            .resolve()
            .unwrap();
    assert_eq!(text, structured);

    let a = ReductionPlan::new(&text, &[&[2, 3], &[3, 4]]).unwrap();
    let b = ReductionPlan::new(&structured, &[&[2, 3], &[3, 4]]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_error_kinds_stay_distinct() {
    let malformed = SubscriptSpec::from("ij->i->j").resolve().unwrap_err();
    let unbound = SubscriptSpec::from("ij->q").resolve().unwrap_err();
    let subs = Subscripts::parse("ij,jk->ik").unwrap();
    let inconsistent = ReductionPlan::new(&subs, &[&[2, 3], &[2, 3]]).unwrap_err();

    assert!(matches!(malformed, SubscriptError::MalformedSubscript { .. }));
    assert!(matches!(unbound, SubscriptError::UnboundOutputLabel { .. }));
    assert!(matches!(inconsistent, SubscriptError::InconsistentDimension { .. }));
}

#[test]
fn test_reduce_axes_plan() {
    // sum over axis 1 of a [2, 3, 4] operand
    let all: Vec<Label> = (0..3).map(Label::Axis).collect();
    let subs = Subscripts::new(vec![all], vec![Label::Axis(0), Label::Axis(2)]).unwrap();
    let plan = ReductionPlan::new(&subs, &[&[2, 3, 4]]).unwrap();
    assert_eq!(plan.output_shape(), &[2, 4]);
    assert_eq!(plan.marginal_shape(), &[3]);
}

#[test]
fn test_full_reduction_is_scalar() {
    let subs = Subscripts::parse("ij->").unwrap();
    let plan = ReductionPlan::new(&subs, &[&[3, 5]]).unwrap();
    assert!(plan.is_scalar_output());
    assert_eq!(plan.terms_per_output(), 15);
}

#[test]
fn test_error_messages() {
    let err = Subscripts::parse("i$->i").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed subscripts: invalid character '$' in operand 0 (only ASCII letters allowed)"
    );
    let err = SubscriptError::InconsistentDimension {
        label: Label::Char('j'),
        first: 3,
        second: 4,
    };
    assert_eq!(err.to_string(), "label 'j' is bound to size 3 and to size 4");
}

#[cfg(feature = "serde")]
#[test]
fn test_subscripts_json_goes_through_validation() {
    let subs = Subscripts::parse("ij,jk->ik").unwrap();
    let json = serde_json::to_string(&subs).unwrap();
    let back: Subscripts = serde_json::from_str(&json).unwrap();
    assert_eq!(back, subs);

    // output label k is never bound by an operand
    let unbound = r#"{"operands":[[{"Char":"i"}]],"output":[{"Char":"k"}]}"#;
    let err = serde_json::from_str::<Subscripts>(unbound).unwrap_err();
    assert!(err.to_string().contains("'k'"), "{err}");

    let repeated = r#"{"operands":[[{"Char":"i"}]],"output":[{"Char":"i"},{"Char":"i"}]}"#;
    assert!(serde_json::from_str::<Subscripts>(repeated).is_err());
}
