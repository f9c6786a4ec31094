use uri_forge::component::{Authority, HttpHost};
use uri_forge::encoding::charset::ISO_8859_1;
use uri_forge::{EncodingPolicy, Param, UriBuilder};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[test]
fn build_from_scratch() {
    let uri = UriBuilder::new()
        .set_scheme("https")
        .set_host("example.com")
        .set_path_segments(["path", "to", "thing"])
        .add_parameter("q", "hello world")
        .build()
        .unwrap();
    assert_eq!(uri, "https://example.com/path/to/thing?q=hello%20world");
}

#[test]
fn empty_builder_yields_empty_string() {
    assert_eq!(UriBuilder::new().to_string(), "");
}

#[test]
fn parsed_uri_round_trips_byte_for_byte() {
    for s in [
        "http://example.com",
        "http://user@example.com:8080/a/b?q=1#f",
        "http://example.com/a%2Fb?x=%41#f%20g",
        "http://host:8x/odd",
        "mailto:John.Doe@example.com",
        "file:///etc/hosts",
        "//relative/reference",
        "a/rootless?q",
    ] {
        assert_eq!(UriBuilder::parse(s).unwrap().to_string(), s);
    }
}

#[test]
fn digest_populates_decoded_components() {
    let b = UriBuilder::parse("http://u%20ser@Example.COM:8080/a%20b/c?x=%411&flag#fr%20ag")
        .unwrap();
    assert_eq!(b.scheme(), Some("http"));
    assert_eq!(b.userinfo(), Some("u ser"));
    assert_eq!(b.host(), Some("Example.COM"));
    assert_eq!(b.port(), 8080);
    assert_eq!(b.path_segments(), ["a b", "c"]);
    assert_eq!(b.path(), Some("/a b/c".to_owned()));
    assert_eq!(
        b.query_params(),
        [Param::new("x", "A1"), Param::without_value("flag")]
    );
    assert_eq!(b.fragment(), Some("fr ag"));
    assert!(b.is_absolute());
    assert!(!b.is_opaque());
    assert!(!b.is_path_empty());
    assert!(!b.is_query_empty());
}

#[test]
fn ipv6_host_is_stored_without_brackets() {
    let mut b = UriBuilder::parse("http://[::1]:8080/").unwrap();
    assert_eq!(b.host(), Some("::1"));
    assert_eq!(b.port(), 8080);
    assert_eq!(b.to_string(), "http://[::1]:8080/");

    // Mutating the port drops the raw authority; the host is
    // re-bracketed, not percent-encoded.
    b.set_port(9);
    assert_eq!(b.to_string(), "http://[::1]:9/");
}

#[test]
fn ipv6_host_is_bracketed_on_serialization() {
    let uri = UriBuilder::new()
        .set_host("::1")
        .set_scheme("http")
        .set_port(80)
        .build()
        .unwrap();
    assert_eq!(uri, "http://[::1]:80");
}

#[test]
fn set_host_addr_takes_textual_form() {
    let mut b = UriBuilder::new();
    b.set_scheme("http")
        .set_host_addr(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
    assert_eq!(b.to_string(), "http://192.0.2.1");

    b.set_host_addr(IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert_eq!(b.host(), Some("::1"));
    assert_eq!(b.to_string(), "http://[::1]");
}

#[test]
fn mutating_host_drops_raw_authority() {
    let mut b = UriBuilder::parse("http://user@example.com:8080/a?q=1#f").unwrap();
    b.set_host("example.org");
    assert_eq!(b.to_string(), "http://user@example.org:8080/a?q=1#f");
}

#[test]
fn mutating_userinfo_drops_raw_userinfo() {
    let mut b = UriBuilder::parse("http://u%20ser@example.com/").unwrap();
    b.set_userinfo("other user");
    assert_eq!(b.to_string(), "http://other%20user@example.com/");
}

#[test]
fn userinfo_splits_on_first_colon() {
    let mut b = UriBuilder::new();
    b.set_scheme("http")
        .set_host("h")
        .set_userinfo("user:pa ss");
    assert_eq!(b.to_string(), "http://user:pa%20ss@h");
}

#[test]
fn blank_inputs_unset_components() {
    let mut b = UriBuilder::parse("http://u@example.com/p?q=1#f").unwrap();
    b.set_userinfo(" ")
        .set_fragment("")
        .set_custom_query("");
    assert_eq!(b.userinfo(), None);
    assert_eq!(b.fragment(), None);
    assert_eq!(b.to_string(), "http://example.com/p");

    b.set_scheme("");
    assert!(!b.is_absolute());
}

#[test]
fn http_scheme_requires_host() {
    assert!(UriBuilder::new()
        .set_scheme("http")
        .set_host("")
        .build()
        .is_err());
    assert!(UriBuilder::new().set_scheme("https").build().is_err());
    assert!(UriBuilder::new().set_scheme("HTTP").build().is_err());
    // Other schemes do not need one.
    assert!(UriBuilder::new().set_scheme("file").set_path("/x").build().is_ok());
}

#[test]
fn custom_query_and_params_are_mutually_exclusive() {
    let mut b = UriBuilder::new();
    b.set_scheme("http").set_host("h");

    b.set_custom_query("raw query");
    assert!(b.query_params().is_empty());
    assert_eq!(b.to_string(), "http://h?raw%20query");

    b.set_parameter("x", "1");
    assert_eq!(b.to_string(), "http://h?x=1");

    b.set_custom_query("back=again");
    assert!(b.query_params().is_empty());
    assert_eq!(b.to_string(), "http://h?back=again");
}

#[test]
fn set_parameter_replaces_existing_entries() {
    let mut b = UriBuilder::new();
    b.add_parameter("k", "1")
        .add_parameter("a", "2")
        .add_parameter("k", "3")
        .set_parameter("k", "4");
    assert_eq!(
        b.query_params(),
        [Param::new("a", "2"), Param::new("k", "4")]
    );
}

#[test]
fn remove_parameter_and_clear() {
    let mut b = UriBuilder::new();
    b.set_host("h")
        .add_parameter("a", "1")
        .add_parameter("b", "2")
        .remove_parameter("a");
    assert_eq!(b.query_params(), [Param::new("b", "2")]);

    b.clear_parameters();
    assert!(b.query_params().is_empty());
    assert!(b.is_query_empty());
    assert_eq!(b.to_string(), "//h");
}

#[test]
fn remove_parameter_drops_cached_query() {
    let mut b = UriBuilder::parse("http://h/?a=1&b=2").unwrap();
    b.remove_parameter("a");
    assert_eq!(b.to_string(), "http://h/?b=2");
}

#[test]
fn remove_query() {
    let mut b = UriBuilder::parse("http://h/p?a=1").unwrap();
    b.remove_query();
    assert!(b.is_query_empty());
    assert_eq!(b.to_string(), "http://h/p");
}

#[test]
fn add_params_and_first_query_param() {
    let mut b = UriBuilder::new();
    b.add_params([Param::new("k", "1"), Param::new("k", "2")]);
    assert_eq!(b.first_query_param("k"), Some(&Param::new("k", "1")));
    assert_eq!(b.first_query_param("missing"), None);

    b.set_parameters([Param::without_value("only")]);
    assert_eq!(b.query_params(), [Param::without_value("only")]);
}

#[test]
fn query_param_order_survives_build_and_reparse() {
    let mut b = UriBuilder::new();
    b.set_scheme("http").set_host("h");
    for (name, value) in [("z", "26"), ("a", "1"), ("m", "13"), ("z", "0")] {
        b.add_parameter(name, value);
    }
    let uri = b.build().unwrap();
    let reparsed = UriBuilder::from_uri(&uri);
    assert_eq!(
        reparsed.query_params(),
        [
            Param::new("z", "26"),
            Param::new("a", "1"),
            Param::new("m", "13"),
            Param::new("z", "0"),
        ]
    );
}

#[test]
fn plus_as_blank_reparses_cached_query() {
    let mut b = UriBuilder::parse("http://h/?a+b=c+d").unwrap();
    assert_eq!(b.query_params(), [Param::new("a+b", "c+d")]);

    b.set_plus_as_blank(true);
    assert_eq!(b.query_params(), [Param::new("a b", "c d")]);

    b.set_plus_as_blank(false);
    assert_eq!(b.query_params(), [Param::new("a+b", "c+d")]);
}

#[test]
fn plus_as_blank_leaves_structured_params_untouched() {
    let mut b = UriBuilder::new();
    b.add_parameter("a+b", "c");
    b.set_plus_as_blank(true);
    assert_eq!(b.query_params(), [Param::new("a+b", "c")]);
}

#[test]
fn encoding_policy_delta() {
    let mut b = UriBuilder::new();
    b.set_scheme("http")
        .set_host("h")
        .add_parameter("q", "a/b:c@d?e")
        .set_fragment("x/y?z");

    // Strict keeps only unreserved characters in params.
    assert_eq!(b.to_string(), "http://h?q=a%2Fb%3Ac%40d%3Fe#x%2Fy%3Fz");

    b.set_encoding_policy(EncodingPolicy::Rfc3986);
    assert_eq!(b.to_string(), "http://h?q=a/b:c@d?e#x/y?z");
}

#[test]
fn encoding_policy_applies_to_userinfo_and_host() {
    let mut b = UriBuilder::new();
    b.set_scheme("foo")
        .set_host("a!b")
        .set_userinfo("u!v");
    assert_eq!(b.to_string(), "foo://u%21v@a%21b");

    b.set_encoding_policy(EncodingPolicy::Rfc3986);
    assert_eq!(b.to_string(), "foo://u!v@a!b");
}

#[test]
fn custom_query_uses_uric_under_strict_policy() {
    let mut b = UriBuilder::new();
    b.set_host("h").set_custom_query("a=b&c=d/e");
    // Sub-delims stay, gen-delims are encoded.
    assert_eq!(b.to_string(), "//h?a=b&c=d%2Fe");
}

#[test]
fn rootless_path_without_authority() {
    let mut b = UriBuilder::new();
    b.set_scheme("foo").set_path_segments_rootless(["a", "b"]);
    assert_eq!(b.to_string(), "foo:a/b");
}

#[test]
fn rootless_path_is_rooted_under_authority() {
    let mut b = UriBuilder::new();
    b.set_scheme("foo")
        .set_host("h")
        .set_path_segments_rootless(["a", "b"]);
    assert_eq!(b.to_string(), "foo://h/a/b");
}

#[test]
fn raw_path_gets_separator_under_authority() {
    let mut b = UriBuilder::parse("rel/path").unwrap();
    b.set_host("h");
    assert_eq!(b.to_string(), "//h/rel/path");
}

#[test]
fn set_path_resplits() {
    let mut b = UriBuilder::new();
    b.set_path("/a/b/");
    assert_eq!(b.path_segments(), ["a", "b", ""]);
    assert_eq!(b.to_string(), "/a/b/");

    b.set_path("rel");
    assert_eq!(b.to_string(), "rel");

    b.set_path("");
    assert!(b.is_path_empty());
}

#[test]
fn append_path() {
    let mut b = UriBuilder::new();
    b.set_host("h").set_path("/a/b").append_path("c/d");
    assert_eq!(b.path_segments(), ["a", "b", "c", "d"]);
    assert_eq!(b.to_string(), "//h/a/b/c/d");

    b.append_path_segments(["e f"]);
    assert_eq!(b.to_string(), "//h/a/b/c/d/e%20f");
}

#[test]
fn path_segments_encode_non_ascii() {
    let mut b = UriBuilder::new();
    b.set_scheme("https")
        .set_host("example.com")
        .set_path_segments(["göd", "näs"]);
    assert_eq!(b.to_string(), "https://example.com/g%C3%B6d/n%C3%A4s");
}

#[test]
fn charset_controls_transcoding() {
    let mut b = UriBuilder::new();
    b.set_charset(ISO_8859_1)
        .set_host("h")
        .set_path_segments(["café"]);
    assert_eq!(b.to_string(), "//h/caf%E9");
}

#[test]
fn scheme_specific_part_shortcuts_serialization() {
    let mut b = UriBuilder::new();
    b.set_scheme("mailto")
        .set_scheme_specific_part("john@example.com")
        .set_fragment("frag");
    assert!(b.is_opaque());
    assert_eq!(b.to_string(), "mailto:john@example.com#frag");
}

#[test]
fn scheme_specific_part_with_params() {
    let mut b = UriBuilder::new();
    b.set_scheme("mailto").set_scheme_specific_part_with_params(
        "john@example.com",
        &[Param::new("subject", "hi there")],
    );
    assert_eq!(b.to_string(), "mailto:john@example.com?subject=hi%20there");
}

#[test]
fn component_mutation_drops_scheme_specific_part() {
    let mut b = UriBuilder::parse("mailto:john@example.com").unwrap();
    assert_eq!(b.scheme_specific_part(), Some("john@example.com"));
    b.set_host("example.org");
    assert_eq!(b.to_string(), "mailto://example.org");
}

#[test]
fn non_server_authority_round_trips_with_unset_host() {
    let b = UriBuilder::parse("http://host:8x/odd").unwrap();
    assert_eq!(b.host(), None);
    assert_eq!(b.to_string(), "http://host:8x/odd");
}

#[test]
fn authority_accessor_synthesizes_value() {
    let b = UriBuilder::parse("http://u@h:7/").unwrap();
    assert_eq!(b.authority(), Authority::new(Some("u".to_owned()), "h", 7));
}

#[test]
fn set_authority_and_http_host() {
    let mut b = UriBuilder::new();
    b.set_scheme("http")
        .set_authority(&Authority::parse("u@example.com:81").unwrap());
    assert_eq!(b.to_string(), "http://u@example.com:81");

    // Switching the endpoint leaves the userinfo in place.
    b.set_http_host(&HttpHost::new("https", "example.org", 8443));
    assert_eq!(b.userinfo(), Some("u"));
    assert_eq!(b.to_string(), "https://u@example.org:8443");
}

#[test]
fn negative_port_normalizes_to_unset() {
    let mut b = UriBuilder::new();
    b.set_host("h").set_port(-42);
    assert_eq!(b.port(), -1);
    assert_eq!(b.to_string(), "//h");
}

#[test]
fn built_uri_exposes_components() {
    let uri = UriBuilder::new()
        .set_scheme("https")
        .set_host("example.com")
        .set_port(8443)
        .set_path("/a b")
        .build()
        .unwrap();
    assert_eq!(uri.host(), Some("example.com"));
    assert_eq!(uri.port(), 8443);
    assert_eq!(uri.raw_path(), Some("/a%20b"));
}
