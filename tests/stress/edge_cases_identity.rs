//! Edge case tests: seeds, record shapes, legacy keys, metadata limits.

use agentic_crew::security::MAX_METADATA_BYTES;
use agentic_crew::{CrewError, Fingerprint, IdentityConfig, IdentityInput, Metadata};
use serde_json::{json, Value};

// === Seeds ===

#[test]
fn edge_blank_seeds_rejected() {
    for seed in ["", " ", "\t\n"] {
        assert!(matches!(Fingerprint::from_seed(seed), Err(CrewError::InvalidSeed)));
        assert!(matches!(IdentityConfig::construct(seed), Err(CrewError::InvalidSeed)));
    }
}

#[test]
fn edge_unicode_and_long_seeds() {
    let a = Fingerprint::from_seed("агент-🤖").unwrap();
    let b = Fingerprint::from_seed("агент-🤖").unwrap();
    assert_eq!(a, b);

    let long = "x".repeat(100_000);
    assert!(Fingerprint::from_seed(&long).unwrap().value().starts_with("afp_"));
}

#[test]
fn edge_seed_whitespace_is_significant() {
    let plain = Fingerprint::from_seed("seed").unwrap();
    let padded = Fingerprint::from_seed(" seed").unwrap();
    assert_ne!(plain, padded);
}

// === Record shapes ===

#[test]
fn edge_absent_inputs_generate() {
    let none: Option<&str> = None;
    assert!(IdentityConfig::construct(none).is_ok());
    assert!(IdentityConfig::construct(IdentityInput::Absent).is_ok());
    assert!(IdentityConfig::construct(json!({})).is_ok());
    assert!(IdentityConfig::construct(json!({"fingerprint": null})).is_ok());
    assert!(IdentityConfig::from_record(&json!({"fingerprint": {}})).is_ok());
}

#[test]
fn edge_non_object_records_malformed() {
    for record in [json!([]), json!("text"), json!(7), json!(true)] {
        let err = IdentityConfig::from_record(&record).unwrap_err();
        assert!(matches!(err, CrewError::MalformedRecord(_)), "{record}");
    }
    for fingerprint in [json!(1), json!([1, 2]), json!(false)] {
        let err = IdentityConfig::from_record(&json!({ "fingerprint": fingerprint })).unwrap_err();
        assert!(matches!(err, CrewError::MalformedRecord(_)));
    }
}

#[test]
fn edge_fingerprint_record_missing_value() {
    let err = IdentityConfig::from_record(&json!({"fingerprint": {"metadata": {}}})).unwrap_err();
    assert!(matches!(err, CrewError::MalformedRecord(_)));

    let err = Fingerprint::from_record(&json!({"value": ""})).unwrap_err();
    assert!(matches!(err, CrewError::MalformedRecord(_)));
}

#[test]
fn edge_legacy_keys_and_naive_timestamps() {
    let fp = Fingerprint::from_record(&json!({
        "uuid_str": "legacy-value",
        "created_at": "2024-01-02T03:04:05.123456"
    }))
    .unwrap();
    assert_eq!(fp.value(), "legacy-value");
    assert_eq!(fp.created_at().to_rfc3339(), "2024-01-02T03:04:05.123456+00:00");
}

#[test]
fn edge_bad_timestamp_malformed() {
    let err = Fingerprint::from_record(&json!({"value": "v", "createdAt": "yesterday"})).unwrap_err();
    assert!(matches!(err, CrewError::MalformedRecord(_)));
}

// === Metadata ===

#[test]
fn edge_metadata_one_level_nesting_allowed() {
    let mut metadata = Metadata::new();
    metadata.insert("team".into(), json!({"name": "blue", "size": 3}));
    assert!(Fingerprint::new().with_metadata(metadata).is_ok());
}

#[test]
fn edge_metadata_two_levels_rejected() {
    let mut metadata = Metadata::new();
    metadata.insert("team".into(), json!({"lead": {"name": "ada"}}));
    let err = Fingerprint::new().with_metadata(metadata).unwrap_err();
    assert!(matches!(err, CrewError::InvalidMetadata(_)));
}

#[test]
fn edge_metadata_size_limit() {
    let mut metadata = Metadata::new();
    metadata.insert("blob".into(), Value::String("a".repeat(MAX_METADATA_BYTES)));
    let err = Fingerprint::new().with_metadata(metadata).unwrap_err();
    assert!(matches!(err, CrewError::InvalidMetadata(_)));
}

#[test]
fn edge_add_metadata_is_non_destructive() {
    let mut fp = Fingerprint::new();
    fp.add_metadata("owner", json!("ops")).unwrap();
    let err = fp.add_metadata("owner", json!("dev")).unwrap_err();
    assert!(matches!(err, CrewError::InvalidMetadata(_)));
    assert_eq!(fp.metadata()["owner"], "ops");
}

#[test]
fn edge_metadata_does_not_affect_equality() {
    let mut a = Fingerprint::from_seed("same").unwrap();
    let b = Fingerprint::from_seed("same").unwrap();
    a.add_metadata("extra", json!(1)).unwrap();
    assert_eq!(a, b);
}
