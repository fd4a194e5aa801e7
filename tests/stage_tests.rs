use remora::stage::Stage;

#[test]
fn test_stage_order_is_the_invocation_contract() {
    let names: Vec<&str> = Stage::ALL.iter().map(Stage::as_str).collect();
    assert_eq!(
        names,
        vec![
            "initialize",
            "authentication",
            "authorisation",
            "prevalidation",
            "preprocess",
            "postvalidation",
            "process",
            "postprocess",
            "after",
            "error",
            "aftererror",
        ]
    );
}

#[test]
fn test_stage_roundtrips_through_wire_name() {
    for stage in Stage::ALL {
        assert_eq!(Stage::from_name(stage.as_str()), Some(stage));
    }
}

#[test]
fn test_unrecognized_names_are_not_stages() {
    assert_eq!(Stage::from_name("render"), None);
    assert_eq!(Stage::from_name("Initialize"), None);
}

#[test]
fn test_error_stages() {
    assert!(Stage::Error.is_error_stage());
    assert!(Stage::AfterError.is_error_stage());
    assert!(!Stage::Process.is_error_stage());
    assert!(!Stage::Initialize.is_error_stage());
}
