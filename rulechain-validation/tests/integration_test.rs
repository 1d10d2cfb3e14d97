//! Integration tests for rulechain-validation

use pretty_assertions::assert_eq;
use rulechain_macro::Record;
use rulechain_validation::*;
use std::collections::HashMap;

#[derive(Record)]
struct NoRules {
    name: String,
    age: i32,
}

#[derive(Record)]
struct Registration {
    #[validate("required")]
    name: String,

    #[validate(rules = "required|string|min:8|same:password_confirmation", rename = "pass")]
    password: String,

    password_confirmation: String,

    #[validate("nullable|numeric|min:10")]
    score: String,

    #[validate(rules = "required_if:type,admin", rename = "adminCode")]
    admin_code: String,

    r#type: String,

    #[validate("string|between:3,5")]
    nickname: Option<String>,

    #[validate(skip)]
    #[allow(dead_code)]
    internal: Vec<u8>,
}

fn registration() -> Registration {
    Registration {
        name: "Ada".to_string(),
        password: "correcthorse".to_string(),
        password_confirmation: "correcthorse".to_string(),
        score: "15".to_string(),
        admin_code: String::new(),
        r#type: "user".to_string(),
        nickname: Some("ada".to_string()),
        internal: Vec::new(),
    }
}

#[test]
fn test_all_empty_chains_are_valid() {
    let record = NoRules {
        name: String::new(),
        age: 0,
    };
    assert_eq!(validate(&record), ValidationResult::Valid);
    assert_eq!(record.field_specs().len(), 2);
    assert_eq!(record.field("age"), Some(FieldValue::Int(0)));
}

#[test]
fn test_valid_registration() {
    assert_eq!(registration().validate(), ValidationResult::Valid);
}

#[test]
fn test_required_message_and_fail_fast() {
    let mut record = registration();
    record.name = String::new();

    let result = record.validate_with_mode(ErrorMode::FailFast);
    assert_eq!(
        result.errors().unwrap().get("name"),
        Some(&FieldErrors::Single("The name field is required.".to_string()))
    );
}

#[test]
fn test_fail_fast_skips_rest_of_chain() {
    let mut record = registration();
    record.password = String::new();

    let fail_fast = record.validate_with_mode(ErrorMode::FailFast);
    assert_eq!(
        fail_fast.errors().unwrap().messages("pass"),
        vec!["The pass field is required."]
    );

    let accumulate = record.validate_with_mode(ErrorMode::Accumulate);
    assert_eq!(
        accumulate.errors().unwrap().messages("pass"),
        vec![
            "The pass field is required.",
            "The pass must only contain letters.",
            "The pass must be at least 8 characters.",
            "The pass and password confirmation must match.",
        ]
    );
}

#[test]
fn test_numeric_min() {
    let mut record = registration();
    record.score = "5".to_string();
    assert_eq!(
        record.validate().errors().unwrap().messages("score"),
        vec!["The score must be at least 10."]
    );

    record.score = "15".to_string();
    assert!(record.validate().is_valid());

    record.score = String::new();
    assert!(record.validate().is_valid());
}

#[test]
fn test_string_between() {
    let mut record = registration();
    record.nickname = Some("ab".to_string());
    assert_eq!(
        record.validate().errors().unwrap().messages("nickname"),
        vec!["The nickname must be between 3 and 5 characters."]
    );

    record.nickname = Some("abcd".to_string());
    assert!(record.validate().is_valid());
}

#[test]
fn test_same_names_both_fields() {
    let mut record = registration();
    record.password_confirmation = "otherhorse".to_string();

    assert_eq!(
        record.validate().errors().unwrap().messages("pass"),
        vec!["The pass and password confirmation must match."]
    );
}

#[test]
fn test_required_if_uses_raw_identifier_field() {
    let mut record = registration();
    record.r#type = "admin".to_string();

    assert_eq!(
        record.validate().errors().unwrap().messages("adminCode"),
        vec!["The admin code field is required when type is admin."]
    );

    record.admin_code = "X1".to_string();
    assert!(record.validate().is_valid());
}

#[test]
fn test_skipped_field_is_hidden() {
    let record = registration();
    assert_eq!(record.field("internal"), None);
    assert!(record.field_specs().iter().all(|spec| spec.name != "internal"));
}

#[test]
fn test_only_failing_fields_reported() {
    let mut record = registration();
    record.name = String::new();
    record.score = "abc".to_string();

    let errors = record.validate().into_result().unwrap_err();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["name", "score"]);
}

#[test]
fn test_idempotent() {
    let mut record = registration();
    record.name = String::new();
    record.nickname = None;

    let validator = Validator::new();
    let first = validator.validate(&record);
    let second = validator.validate(&record);
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_encodings() {
    for encoding in [
        "",
        "required",
        "required|string|min:8|same:password_confirmation",
        "nullable|numeric|between:1,100",
        "required_if:type,admin",
    ] {
        assert_eq!(RuleChain::parse(encoding).to_string(), encoding);
    }
}

#[test]
fn test_stub_record_for_evaluator() {
    let mut stub = HashMap::new();
    stub.insert("password_confirmation".to_string(), FieldValue::from("secret"));

    let registry = RuleRegistry::builtin();
    let evaluator = FieldEvaluator::new(&registry, ErrorMode::Accumulate);
    let chain = RuleChain::parse("same:password_confirmation");

    assert_eq!(evaluator.evaluate("password", &"secret".into(), &chain, &stub), None);
    assert_eq!(
        evaluator.evaluate("password", &"other".into(), &chain, &stub),
        Some(FieldErrors::Many(vec![
            "The password and password confirmation must match.".to_string()
        ]))
    );
}

#[test]
fn test_errors_serialize_by_mode() {
    let mut record = registration();
    record.name = String::new();

    let fail_fast = record.validate_with_mode(ErrorMode::FailFast);
    assert_eq!(
        fail_fast.to_json(),
        serde_json::json!({"valid": false, "errors": {"name": "The name field is required."}})
    );

    let accumulate = record.validate_with_mode(ErrorMode::Accumulate);
    assert_eq!(
        accumulate.to_json(),
        serde_json::json!({"valid": false, "errors": {"name": ["The name field is required."]}})
    );
}
