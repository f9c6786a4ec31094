use uri_forge::component::{Authority, Scheme};
use uri_forge::Uri;

#[test]
fn parse_absolute() {
    let uri = Uri::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(uri.scheme().unwrap().as_str(), "ftp");
    assert_eq!(uri.raw_authority(), Some("ftp.is.co.za"));
    assert_eq!(uri.host(), Some("ftp.is.co.za"));
    assert_eq!(uri.port(), -1);
    assert_eq!(uri.raw_path(), Some("/rfc/rfc1808.txt"));
    assert_eq!(uri.raw_query(), None);
    assert_eq!(uri.raw_fragment(), None);
    assert!(uri.is_absolute());
    assert!(!uri.is_opaque());
}

#[test]
fn parse_full() {
    let uri = Uri::parse("foo://user@example.com:8042/over/there?name=ferret#nose").unwrap();
    assert_eq!(uri.raw_authority(), Some("user@example.com:8042"));
    assert_eq!(uri.raw_userinfo(), Some("user"));
    assert_eq!(uri.host(), Some("example.com"));
    assert_eq!(uri.port(), 8042);
    assert_eq!(uri.raw_path(), Some("/over/there"));
    assert_eq!(uri.raw_query(), Some("name=ferret"));
    assert_eq!(uri.raw_fragment(), Some("nose"));
    assert_eq!(
        uri.raw_scheme_specific_part(),
        "//user@example.com:8042/over/there?name=ferret"
    );
}

#[test]
fn parse_opaque() {
    let uri = Uri::parse("mailto:John.Doe@example.com").unwrap();
    assert_eq!(uri.scheme().unwrap().as_str(), "mailto");
    assert!(uri.is_opaque());
    assert_eq!(uri.raw_path(), None);
    assert_eq!(uri.raw_scheme_specific_part(), "John.Doe@example.com");

    let uri = Uri::parse("urn:oasis:names:docbook:dtd:xml:4.1.2").unwrap();
    assert!(uri.is_opaque());
    assert_eq!(uri.raw_scheme_specific_part(), "oasis:names:docbook:dtd:xml:4.1.2");
}

#[test]
fn parse_relative() {
    let uri = Uri::parse("/a/b?q#f").unwrap();
    assert!(!uri.is_absolute());
    assert!(uri.scheme().is_none());
    assert_eq!(uri.raw_path(), Some("/a/b"));
    assert_eq!(uri.raw_query(), Some("q"));
    assert_eq!(uri.raw_fragment(), Some("f"));
    assert_eq!(uri.raw_scheme_specific_part(), "/a/b?q");

    let uri = Uri::parse("//example.com/x").unwrap();
    assert_eq!(uri.host(), Some("example.com"));
    assert_eq!(uri.raw_path(), Some("/x"));

    assert!(Uri::parse("").unwrap().raw_path().unwrap().is_empty());
}

#[test]
fn parse_ipv6_host_keeps_brackets() {
    let uri = Uri::parse("http://[::1]:8080/x").unwrap();
    assert_eq!(uri.host(), Some("[::1]"));
    assert_eq!(uri.port(), 8080);
    assert_eq!(uri.raw_authority(), Some("[::1]:8080"));

    let uri = Uri::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert_eq!(uri.host(), Some("[2001:db8::7]"));
    assert_eq!(uri.raw_query(), Some("objectClass?one"));
}

#[test]
fn parse_empty_and_emptyish_ports() {
    let uri = Uri::parse("http://example.com:/").unwrap();
    assert_eq!(uri.host(), Some("example.com"));
    assert_eq!(uri.port(), -1);

    let uri = Uri::parse("http://example.com:8080").unwrap();
    assert_eq!(uri.port(), 8080);
    assert_eq!(uri.raw_path(), Some(""));
}

#[test]
fn non_server_authority_keeps_raw_form() {
    // A non-numeric port is not server form; the authority stays raw
    // and the host is unset.
    let uri = Uri::parse("http://host:8x/").unwrap();
    assert_eq!(uri.raw_authority(), Some("host:8x"));
    assert_eq!(uri.host(), None);
    assert_eq!(uri.port(), -1);

    let uri = Uri::parse("foo://a:b:c/").unwrap();
    assert_eq!(uri.raw_authority(), Some("a:b:c"));
    assert_eq!(uri.host(), None);
}

#[test]
fn decoded_getters() {
    let uri = Uri::parse("http://u%20ser@example.com/#fr%C3%A4g").unwrap();
    assert_eq!(uri.raw_userinfo(), Some("u%20ser"));
    assert_eq!(uri.userinfo(), Some("u ser".to_owned()));
    assert_eq!(uri.raw_fragment(), Some("fr%C3%A4g"));
    assert_eq!(uri.fragment(), Some("fräg".to_owned()));
}

#[test]
fn parse_errors() {
    // Scheme must start with a letter.
    assert!(Uri::parse("1http://example.com").is_err());
    // Colon in the first segment of a relative reference.
    assert!(Uri::parse("a:b/c").is_ok());
    assert!(Uri::parse("./a:b").is_ok());
    // Space is not a URI character.
    let e = Uri::parse("http://exa mple/").unwrap_err();
    assert_eq!(e.index(), 10);
    // Incomplete and non-hexadecimal octets.
    let e = Uri::parse("http://h/%zz").unwrap_err();
    assert_eq!(e.index(), 9);
    assert!(Uri::parse("http://h/%4").is_err());
    // Unmatched or invalid IP literals.
    assert!(Uri::parse("http://[::1").is_err());
    assert!(Uri::parse("http://[vX.1]").is_err());
    assert!(Uri::parse("http://[12345::%]").is_err());
}

#[test]
fn parse_ipv_future() {
    let uri = Uri::parse("foo://[v1.fe:dc]:8080/").unwrap();
    assert_eq!(uri.host(), Some("[v1.fe:dc]"));
    assert_eq!(uri.port(), 8080);
}

#[test]
fn display_from_str_and_eq() {
    let s = "http://example.com/a?b#c";
    let uri: Uri = s.parse().unwrap();
    assert_eq!(uri.to_string(), s);
    assert_eq!(uri.as_str(), s);
    assert_eq!(uri, *s);
    assert_eq!(uri, Uri::parse(s).unwrap());
}

#[test]
fn scheme_comparison_and_default_port() {
    let uri = Uri::parse("FTP://Mirror.Example.NET/pub").unwrap();
    let scheme = uri.scheme().unwrap();
    assert_eq!(scheme, Scheme::new_or_panic("ftp"));
    assert_eq!(scheme.as_str(), "FTP");
    assert_eq!(scheme.default_port(), Some(21));
    assert_eq!(Scheme::new_or_panic("wss").default_port(), Some(443));
    assert_eq!(Scheme::new_or_panic("example").default_port(), None);
    assert!(Scheme::new("").is_none());
    assert!(Scheme::new("9p").is_none());
    assert!(Scheme::new("coap+tcp").is_some());
}

#[test]
fn authority_parse() {
    let auth = Authority::parse("user@[::1]:8080").unwrap();
    assert_eq!(auth.userinfo(), Some("user"));
    assert_eq!(auth.host(), "::1");
    assert_eq!(auth.port(), 8080);
    assert_eq!(auth.to_string(), "user@[::1]:8080");

    let auth = Authority::parse("example.com").unwrap();
    assert_eq!(auth.userinfo(), None);
    assert_eq!(auth.host(), "example.com");
    assert_eq!(auth.port(), -1);

    assert_eq!(Authority::parse("example.com:").unwrap().port(), -1);
    assert_eq!(Authority::parse("example.com:80").unwrap().port(), 80);

    assert!(Authority::parse("a:b:c").is_err());
    assert!(Authority::parse("host:8x").is_err());
    assert!(Authority::parse("[::1").is_err());
    assert!(Authority::parse("[zz]").is_err());
}
