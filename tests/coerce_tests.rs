use remora::coerce::{ParamType, stringify, validate};
use serde_json::{Value, json};

#[test]
fn test_int_matches_and_casts() {
    let value = validate(Some("123"), ParamType::Int, &json!(1));
    assert_eq!(value, json!(123));
    assert!(value.is_i64());
}

#[test]
fn test_int_rejects_leading_zero() {
    assert_eq!(validate(Some("0123"), ParamType::Int, &json!(1)), json!(1));
    assert_eq!(validate(Some("0"), ParamType::Int, &json!(1)), json!(1));
}

#[test]
fn test_int_absent_returns_default() {
    assert_eq!(validate(None, ParamType::Int, &json!(1)), json!(1));
}

#[test]
fn test_int_mismatch_returns_default() {
    assert_eq!(validate(Some("test"), ParamType::Int, &json!(1)), json!(1));
}

#[test]
fn test_default_is_never_cast() {
    // A non-numeric default passes through untouched when the value fails.
    assert_eq!(
        validate(Some("abc"), ParamType::Int, &json!("fallback")),
        json!("fallback")
    );
    assert_eq!(validate(None, ParamType::Uuid, &Value::Null), Value::Null);
}

#[test]
fn test_int_overflow_falls_back() {
    assert_eq!(
        validate(Some("99999999999999999999"), ParamType::Int, &json!(0)),
        json!(0)
    );
}

#[test]
fn test_signed_accepts_negative() {
    assert_eq!(validate(Some("-5"), ParamType::Signed, &Value::Null), json!(-5));
    assert_eq!(validate(Some("5"), ParamType::Signed, &Value::Null), json!(5));
    assert_eq!(
        validate(Some("5.5"), ParamType::Signed, &Value::Null),
        Value::Null
    );
}

#[test]
fn test_unsigned_allows_leading_zero_but_not_sign() {
    assert_eq!(validate(Some("007"), ParamType::Unsigned, &Value::Null), json!(7));
    assert_eq!(
        validate(Some("-1"), ParamType::Unsigned, &Value::Null),
        Value::Null
    );
}

#[test]
fn test_float_allows_one_decimal_point() {
    assert_eq!(validate(Some("1.5"), ParamType::Float, &Value::Null), json!(1.5));
    assert_eq!(
        validate(Some("-2.25"), ParamType::Float, &Value::Null),
        json!(-2.25)
    );
    assert_eq!(validate(Some("10"), ParamType::Float, &Value::Null), json!(10.0));
    assert_eq!(
        validate(Some("1.2.3"), ParamType::Float, &Value::Null),
        Value::Null
    );
}

#[test]
fn test_bool_true_only_for_one_and_true() {
    assert_eq!(validate(Some("1"), ParamType::Bool, &Value::Null), json!(true));
    assert_eq!(validate(Some("true"), ParamType::Bool, &Value::Null), json!(true));
    assert_eq!(validate(Some("0"), ParamType::Bool, &Value::Null), json!(false));
    assert_eq!(
        validate(Some("false"), ParamType::Bool, &Value::Null),
        json!(false)
    );
    // Matches the pattern case-insensitively, but only the exact lowercase
    // texts count as true.
    assert_eq!(validate(Some("TRUE"), ParamType::Bool, &Value::Null), json!(false));
    assert_eq!(validate(Some("yes"), ParamType::Bool, &Value::Null), Value::Null);
}

#[test]
fn test_alpha_and_alphanum() {
    assert_eq!(
        validate(Some("Abc"), ParamType::Alpha, &Value::Null),
        json!("Abc")
    );
    assert_eq!(validate(Some("ab1"), ParamType::Alpha, &Value::Null), Value::Null);
    assert_eq!(
        validate(Some("ab1"), ParamType::Alphanum, &Value::Null),
        json!("ab1")
    );
    assert_eq!(
        validate(Some("ab-1"), ParamType::Alphanum, &Value::Null),
        Value::Null
    );
}

#[test]
fn test_path_and_string_are_unrestricted() {
    assert_eq!(
        validate(Some("a/b/c"), ParamType::Path, &Value::Null),
        json!("a/b/c")
    );
    assert_eq!(
        validate(Some("has spaces & symbols"), ParamType::Str, &Value::Null),
        json!("has spaces & symbols")
    );
    assert_eq!(validate(Some(""), ParamType::Path, &Value::Null), json!(""));
}

#[test]
fn test_uuid_is_lowercased() {
    let value = validate(
        Some("550E8400-E29B-41D4-A716-446655440000"),
        ParamType::Uuid,
        &Value::Null,
    );
    assert_eq!(value, json!("550e8400-e29b-41d4-a716-446655440000"));
}

#[test]
fn test_uuid_casing_is_idempotent() {
    let upper = "550E8400-E29B-41D4-A716-446655440000";
    let lower = upper.to_lowercase();
    assert_eq!(
        validate(Some(upper), ParamType::Uuid, &Value::Null),
        validate(Some(&lower), ParamType::Uuid, &Value::Null)
    );
}

#[test]
fn test_uuid_rejects_malformed() {
    assert_eq!(
        validate(Some("not-a-uuid"), ParamType::Uuid, &json!("d")),
        json!("d")
    );
    assert_eq!(
        validate(Some("550e8400e29b41d4a716446655440000"), ParamType::Uuid, &json!("d")),
        json!("d")
    );
}

#[test]
fn test_param_type_parse_is_case_insensitive() {
    assert_eq!(ParamType::parse("INT"), Some(ParamType::Int));
    assert_eq!(ParamType::parse("Uuid"), Some(ParamType::Uuid));
    assert_eq!(ParamType::parse("string"), Some(ParamType::Str));
    assert_eq!(ParamType::parse("nope"), None);
}

#[test]
fn test_stringify_body_values() {
    assert_eq!(stringify(&Value::Null), None);
    assert_eq!(stringify(&json!("abc")), Some("abc".to_owned()));
    assert_eq!(stringify(&json!(42)), Some("42".to_owned()));
    assert_eq!(stringify(&json!(true)), Some("true".to_owned()));
}
