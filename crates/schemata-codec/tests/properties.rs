//! Behavioral checks of the codec contract through the public API.

use schemata_codec::{decode, deserialize, encode, serialize, Codec, CodecConfig};
use schemata_core::{CodecError, ErrorKind, NativeValue, OpaqueKind, Schema, SchemataError};
use serde_json::json;

fn schema(text: &str) -> Schema {
    text.parse().expect("schema should parse")
}

// ---------------------------------------------------------------------------
// Shape is governed by the schema, not by vector length
// ---------------------------------------------------------------------------

#[test]
fn test_length_one_vector_under_list_is_array() {
    let value = NativeValue::numeric(1.0);
    let doc = encode(&value, &schema(r#"{"list":["numeric"]}"#)).unwrap();
    assert_eq!(doc, json!([1.0]));
}

#[test]
fn test_length_one_vector_under_atom_is_scalar() {
    let value = NativeValue::numeric(1.0);
    let doc = encode(&value, &schema(r#""numeric""#)).unwrap();
    assert_eq!(doc, json!(1.0));
}

#[test]
fn test_length_one_array_decodes_same_as_scalar_under_list() {
    let from_array = decode(&json!([7]), &schema(r#"{"list":["integer"]}"#)).unwrap();
    let from_scalar = decode(&json!(7), &schema(r#""integer""#)).unwrap();
    // Both are a length-1 integer vector on the native side.
    assert_eq!(from_array, from_scalar);
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn test_two_integer_tuple() {
    let tuple = r#"{"tuple":["integer","integer"]}"#;
    let value = NativeValue::list([NativeValue::integer(1), NativeValue::integer(2)]);
    assert_eq!(serialize(&value, tuple).unwrap(), "[1,2]");

    let back = deserialize("[1, 2]", tuple).unwrap();
    assert_eq!(
        back,
        NativeValue::List(vec![NativeValue::Integer(vec![1]), NativeValue::Integer(vec![2])])
    );
}

#[test]
fn test_numeric_pair_written_as_doubles_become_integers() {
    // Host runtimes commonly hold whole numbers as doubles.
    let tuple = r#"{"tuple":["integer","integer"]}"#;
    let value = NativeValue::list([NativeValue::numeric(1.0), NativeValue::numeric(2.0)]);
    assert_eq!(serialize(&value, tuple).unwrap(), "[1,2]");
}

#[test]
fn test_integer_and_character_list_tuple() {
    let s = schema(r#"{"tuple":["integer",{"list":["character"]}]}"#);
    let value = decode(&json!([1, ["a", "b"]]), &s).unwrap();
    let NativeValue::List(items) = &value else {
        panic!("Expected a native list, got: {value}");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], NativeValue::Integer(vec![1]));
    assert_eq!(items[1], NativeValue::Character(vec!["a".into(), "b".into()]));
}

#[test]
fn test_mixed_nested_document() {
    let s = schema(
        r#"{"list":[{"tuple":["character",{"list":["numeric"]},"logical",null]}]}"#,
    );
    let doc = json!([
        ["x", [1.5, 2.5], true, null],
        ["y", [], false, null]
    ]);
    let value = decode(&doc, &s).unwrap();
    assert_eq!(
        value.to_string(),
        r#"list(list(chr["x"], num[1.5, 2.5], lgl[true], NULL), list(chr["y"], num[], lgl[false], NULL))"#
    );
    assert_eq!(encode(&value, &s).unwrap(), doc);
}

// ---------------------------------------------------------------------------
// Non-canonical inputs come back in canonical shape
// ---------------------------------------------------------------------------

#[test]
fn test_integer_under_numeric_decodes_as_numeric() {
    let s = schema(r#""numeric""#);
    let doc = encode(&NativeValue::integer(3), &s).unwrap();
    assert_eq!(doc, json!(3));
    let back = decode(&doc, &s).unwrap();
    assert_eq!(back, NativeValue::numeric(3.0));
    assert_eq!(encode(&back, &s).unwrap(), json!(3.0));
}

#[test]
fn test_generic_list_under_atomic_list_decodes_as_vector() {
    let s = schema(r#"{"list":["integer"]}"#);
    let value = NativeValue::list([NativeValue::integer(1), NativeValue::integer(2)]);
    let doc = encode(&value, &s).unwrap();
    assert_eq!(doc, json!([1, 2]));
    let back = decode(&doc, &s).unwrap();
    assert_eq!(back, NativeValue::from(vec![1, 2]));
    assert_eq!(encode(&back, &s).unwrap(), doc);
}

// ---------------------------------------------------------------------------
// Null handling
// ---------------------------------------------------------------------------

#[test]
fn test_null_schema_decodes_anything_to_absent() {
    for doc in ["null", "0", "\"text\"", "[[1], {}]", "{\"k\": true}"] {
        assert_eq!(deserialize(doc, "null").unwrap(), NativeValue::Absent, "{doc}");
    }
}

#[test]
fn test_absent_encodes_to_null_everywhere() {
    for text in [
        r#""integer""#,
        r#"{"list":["logical"]}"#,
        r#"{"tuple":["numeric","character"]}"#,
        "null",
    ] {
        assert_eq!(serialize(&NativeValue::Absent, text).unwrap(), "null", "{text}");
    }
}

#[test]
fn test_absent_inside_tuple() {
    let s = schema(r#"{"tuple":[null,"integer"]}"#);
    let value = NativeValue::list([NativeValue::Absent, NativeValue::integer(3)]);
    assert_eq!(encode(&value, &s).unwrap(), json!([null, 3]));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_unsupported_native_type_never_yields_null() {
    for kind in [
        OpaqueKind::Closure,
        OpaqueKind::Environment,
        OpaqueKind::Symbol,
        OpaqueKind::Complex,
    ] {
        let err = encode(&NativeValue::Unsupported(kind), &schema(r#""integer""#)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedNativeType);
        assert!(err.to_string().contains(kind.as_str()));
    }
}

#[test]
fn test_record_rejected_in_both_directions() {
    let record = schema(r#"{"record":{"x":"numeric"}}"#);
    let encode_err = encode(&NativeValue::list([NativeValue::numeric(1.0)]), &record).unwrap_err();
    let decode_err = decode(&json!({"x": 1.0}), &record).unwrap_err();
    for err in [encode_err, decode_err] {
        assert_eq!(err.kind(), ErrorKind::UnrecognizedSchema);
        assert!(err.to_string().contains(r#"{"record":{"x":"numeric"}}"#));
    }
}

#[test]
fn test_record_not_treated_as_tuple_or_list() {
    let record = schema(r#"{"record":{"a":"integer","b":"integer"}}"#);
    assert!(decode(&json!([1, 2]), &record).is_err());
    assert!(encode(
        &NativeValue::list([NativeValue::integer(1), NativeValue::integer(2)]),
        &record
    )
    .is_err());
}

#[test]
fn test_unknown_atom_fails_before_conversion() {
    // Both directions reject the same schema text the same way.
    let encode_err = serialize(&NativeValue::integer(1), r#""complex""#).unwrap_err();
    let decode_err = deserialize("1", r#""complex""#).unwrap_err();
    assert!(matches!(encode_err, SchemataError::Schema(_)));
    assert!(matches!(decode_err, SchemataError::Schema(_)));
}

#[test]
fn test_decode_arity_mismatch_does_not_truncate() {
    let err = deserialize("[1, 2, 3]", r#"{"tuple":["integer","integer"]}"#).unwrap_err();
    match err {
        SchemataError::Codec(CodecError::ArityMismatch { expected, found, .. }) => {
            assert_eq!((expected, found), (2, 3));
        }
        other => panic!("Expected ArityMismatch, got: {other}"),
    }
}

#[test]
fn test_error_path_in_message() {
    let err = deserialize(
        r#"[1, ["a", 2]]"#,
        r#"{"tuple":["integer",{"list":["character"]}]}"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "codec error: type mismatch at $.tuple[1].list[1]: expected character, found number"
    );
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_depth_limit_from_yaml() {
    let config = CodecConfig::from_yaml_str("max_depth: 1\n").unwrap();
    let codec = Codec::new(config);
    let nested = r#"{"list":[{"list":["integer"]}]}"#;
    let err = codec.deserialize("[[1]]", nested).unwrap_err();
    match err {
        SchemataError::Codec(e) => assert_eq!(e.kind(), ErrorKind::DepthExceeded),
        other => panic!("Expected DepthExceeded, got: {other}"),
    }
    assert!(deserialize("[[1]]", nested).is_ok());
}

#[test]
fn test_shared_schema_across_threads() {
    let s = std::sync::Arc::new(schema(r#"{"list":["integer"]}"#));
    let handles: Vec<_> = (0..4i32)
        .map(|i| {
            let s = std::sync::Arc::clone(&s);
            std::thread::spawn(move || {
                let value = NativeValue::from(vec![i, i + 1]);
                let doc = encode(&value, &s).unwrap();
                decode(&doc, &s).unwrap() == value
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
