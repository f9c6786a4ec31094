#![cfg(feature = "serde")]

use uri_forge::Uri;

#[test]
fn serializes_as_string() {
    let uri = Uri::parse("http://example.com/a?b#c").unwrap();
    assert_eq!(
        serde_json::to_string(&uri).unwrap(),
        "\"http://example.com/a?b#c\""
    );
}

#[test]
fn deserializes_from_string() {
    let uri: Uri = serde_json::from_str("\"http://example.com/a?b#c\"").unwrap();
    assert_eq!(uri.host(), Some("example.com"));

    assert!(serde_json::from_str::<Uri>("\"http://exa mple/\"").is_err());
}
