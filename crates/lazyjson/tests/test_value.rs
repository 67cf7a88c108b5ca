//! Behavioural tests for lazy resolution, setters and bottom-up resync.

use lazyjson::{Error, Kind, Object, Value, parse, parse_str};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_parse_and_parse_str_wrap_bytes_verbatim() {
    init_logging();
    assert_eq!(parse(b"test".to_vec()).raw(), b"test");
    assert_eq!(parse_str("test").raw(), b"test");
    assert_eq!(parse(Vec::new()).kind(), Kind::Unresolved);
}

#[test]
fn test_malformed_input_never_resolves() {
    init_logging();
    let mut v = parse_str("\"abc");
    for _ in 0..3 {
        assert!(!v.is_null());
        assert!(!v.is_object());
        assert!(!v.is_array());
        assert!(!v.is_string());
        assert!(!v.is_number());
        assert!(!v.is_boolean());
    }
    assert_eq!(v.kind(), Kind::Unresolved);
    assert_eq!(v.raw(), b"\"abc");
}

#[test]
fn test_object_encode_round_trip() {
    init_logging();
    let mut members = Object::new();
    members.insert("k".to_string(), parse_str("true"));

    let mut v = Value::default();
    v.set_object(members);

    assert_eq!(v.raw(), br#"{"k":true}"#);
    assert!(v.is_object());
    assert!(v.get_mut("k").unwrap().boolean());
}

#[test]
fn test_array_encode_round_trip() {
    init_logging();
    let mut v = Value::default();
    v.set_array(vec![parse_str("\"a\""), parse_str("true")]);

    assert_eq!(v.raw(), br#"["a",true]"#);
    assert!(v.element_mut(1).unwrap().boolean());
    assert_eq!(v.element_mut(0).unwrap().string(), "a");
}

#[test]
#[allow(clippy::float_cmp)] // exact round-trip is the property under test
fn test_number_formatting() {
    init_logging();
    let mut v = Value::default();
    v.set_number(1.0);
    assert_eq!(v.raw(), b"1");

    v.set_number(0.1);
    assert_eq!(v.number(), 0.1);

    // A fresh parse of the encoded text reads back the same value.
    let mut reparsed = parse(v.raw().to_vec());
    assert_eq!(reparsed.number(), 0.1);

    v.set_number(123_456_789_012_345_680_000.0);
    assert!(!v.raw().contains(&b'e'));
}

#[test]
fn test_null_and_boolean_literals() {
    init_logging();
    let mut v = Value::default();
    v.set_null();
    assert_eq!(v.raw(), b"null");
    assert!(v.is_null());

    v.set_boolean(false);
    assert_eq!(v.raw(), b"false");
    assert!(!v.is_null());
    assert!(v.is_boolean());
}

#[test]
fn test_mismatched_object_access_is_empty() {
    init_logging();
    let mut v = parse_str("123");
    assert!(v.object().is_empty());
    assert!(v.object_mut().is_none());
    assert!(matches!(
        v.try_object(),
        Err(Error::UnexpectedType {
            expected: "object",
            found: "number"
        })
    ));
}

#[test]
fn test_nested_children_stay_lazy() {
    init_logging();
    let mut root = parse_str(r#"{"a":{"b":{"c":1}}}"#);
    assert!(root.is_object());

    let a = root.get_mut("a").unwrap();
    assert_eq!(a.kind(), Kind::Unresolved);
    assert!(a.is_object());
    assert_eq!(a.object()["b"].kind(), Kind::Unresolved);
}

#[test]
fn test_leaf_mutation_needs_bottom_up_resync() {
    init_logging();
    let mut root = parse_str(r#"{"users":[{"name":"Amy"},{"name":"Bob"}]}"#);

    root.get_mut("users")
        .unwrap()
        .element_mut(1)
        .unwrap()
        .get_mut("name")
        .unwrap()
        .set_string("Cat");

    // Ancestors keep their old bytes until resynced.
    assert_eq!(root.raw(), br#"{"users":[{"name":"Amy"},{"name":"Bob"}]}"#);

    // Resyncing only the root re-embeds the stale child bytes.
    root.set();
    assert_eq!(root.raw(), br#"{"users":[{"name":"Amy"},{"name":"Bob"}]}"#);

    let users = root.get_mut("users").unwrap();
    users.element_mut(1).unwrap().set();
    users.set();
    root.set();
    assert_eq!(root.raw(), br#"{"users":[{"name":"Amy"},{"name":"Cat"}]}"#);
}

#[test]
fn test_replacing_child_node() {
    init_logging();
    let mut root = parse_str(r#"{"v":1}"#);
    root.object_mut()
        .unwrap()
        .insert("v".to_string(), Value::from(vec![Value::from(true)]));
    root.set();
    assert_eq!(root.raw(), br#"{"v":[true]}"#);
}

#[test]
fn test_array_growth_then_resync() {
    init_logging();
    let mut root = parse_str("[1]");
    root.array_mut().unwrap().push(Value::from("two"));
    root.array_mut().unwrap().push(Value::null());
    root.set();
    assert_eq!(root.raw(), br#"[1,"two",null]"#);
}

#[test]
fn test_multi_member_object_resync_is_valid_json() {
    init_logging();
    let mut root = parse_str(r#"{"a":1,"b":"x","c":[true,null]}"#);
    root.get_mut("a").unwrap().set_number(2.5);
    root.set();

    // Member order after re-encoding is unspecified.
    let reparsed: serde_json::Value = serde_json::from_slice(root.raw()).unwrap();
    assert_eq!(
        reparsed,
        serde_json::json!({"a": 2.5, "b": "x", "c": [true, null]})
    );
}

#[test]
fn test_unescaped_string_produces_invalid_json() {
    init_logging();
    let mut v = Value::default();
    v.set_string(r#"say "hi""#);
    assert_eq!(v.raw(), br#""say "hi"""#);

    // The payload is still what was set, but the bytes no longer decode.
    assert_eq!(v.string(), r#"say "hi""#);
    assert!(!parse(v.raw().to_vec()).is_string());
}

#[test]
fn test_pre_escaped_string_round_trips() {
    init_logging();
    let mut v = Value::default();
    v.set_string(r#"line\nbreak"#);
    let mut reparsed = parse(v.raw().to_vec());
    assert_eq!(reparsed.string(), "line\nbreak");
}

#[test]
fn test_kind_peek_never_resolves() {
    init_logging();
    let v = parse_str("true");
    assert_eq!(v.kind(), Kind::Unresolved);
    assert_eq!(v.kind(), Kind::Unresolved);
}

#[test]
fn test_resolved_tree_is_shareable() {
    init_logging();
    let mut v = parse_str("[1,2,3]");
    v.resolve();

    let shared = std::sync::Arc::new(std::sync::Mutex::new(v));
    let handle = {
        let shared = std::sync::Arc::clone(&shared);
        std::thread::spawn(move || shared.lock().unwrap().array().len())
    };
    assert_eq!(handle.join().unwrap(), 3);
    assert_eq!(shared.lock().unwrap().kind(), Kind::Array);
}

#[test]
fn test_lone_surrogate_member_reads_as_replacement_char() {
    init_logging();
    let mut root = parse_str(r#"{"k":"a\ud800"}"#);
    let child = root.get_mut("k").unwrap();
    assert!(child.is_string());
    assert_eq!(child.string(), "a\u{FFFD}");
}

#[test]
fn test_resync_writes_decoded_escapes_raw() {
    init_logging();
    let mut root = parse_str(r#"["a\"b"]"#);
    root.element_mut(0).unwrap().set();
    root.set();
    assert_eq!(root.raw(), br#"["a"b"]"#);
}
