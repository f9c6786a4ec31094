//! IP address literal parsing as per RFC 3986.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Parses an `IPv4address` as defined in
/// [Section 3.2.2 of RFC 3986][host].
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
pub(crate) fn parse_v4(s: &[u8]) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split(|&x| x == b'.');
    for octet in &mut octets {
        *octet = parse_dec_octet(parts.next()?)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

// dec-octet = DIGIT             ; 0-9
//           / %x31-39 DIGIT     ; 10-99
//           / "1" 2DIGIT        ; 100-199
//           / "2" %x30-34 DIGIT ; 200-249
//           / "25" %x30-35      ; 250-255
fn parse_dec_octet(s: &[u8]) -> Option<u8> {
    match *s {
        [x @ b'0'..=b'9'] => Some(x - b'0'),
        [x @ b'1'..=b'9', y @ b'0'..=b'9'] => Some((x - b'0') * 10 + (y - b'0')),
        [b'1', y @ b'0'..=b'9', z @ b'0'..=b'9'] => Some(100 + (y - b'0') * 10 + (z - b'0')),
        [b'2', y @ b'0'..=b'4', z @ b'0'..=b'9'] => Some(200 + (y - b'0') * 10 + (z - b'0')),
        [b'2', b'5', z @ b'0'..=b'5'] => Some(250 + (z - b'0')),
        _ => None,
    }
}

/// Parses an `IPv6address` as defined in
/// [Section 3.2.2 of RFC 3986][host].
///
/// Zone identifiers are not accepted.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
pub(crate) fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    match s.find("::") {
        Some(i) => {
            if s[i + 2..].contains("::") {
                return None;
            }
            let head = parse_groups(&s[..i], false)?;
            let tail = parse_groups(&s[i + 2..], true)?;
            // The "::" stands in for at least one group of zeros.
            if head.len() + tail.len() > 7 {
                return None;
            }
            let mut segments = [0u16; 8];
            segments[..head.len()].copy_from_slice(&head);
            segments[8 - tail.len()..].copy_from_slice(&tail);
            Some(Ipv6Addr::from(segments))
        }
        None => {
            let groups = parse_groups(s, true)?;
            let segments: [u16; 8] = groups.try_into().ok()?;
            Some(Ipv6Addr::from(segments))
        }
    }
}

// Parses colon-separated h16 groups; the last group may be a dotted
// IPv4 address (two groups) when `v4_tail_allowed` is set.
fn parse_groups(s: &str, v4_tail_allowed: bool) -> Option<Vec<u16>> {
    let mut out = Vec::new();
    if s.is_empty() {
        return Some(out);
    }
    let parts: Vec<&str> = s.split(':').collect();
    for (i, part) in parts.iter().enumerate() {
        if v4_tail_allowed && i == parts.len() - 1 && part.contains('.') {
            let addr = parse_v4(part.as_bytes())?;
            let [a, b, c, d] = addr.octets();
            out.push(u16::from_be_bytes([a, b]));
            out.push(u16::from_be_bytes([c, d]));
        } else {
            if part.is_empty() || part.len() > 4 || !part.bytes().all(|x| x.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u16::from_str_radix(part, 16).ok()?);
        }
    }
    Some(out)
}

/// Checks whether `host` is an IPv6 address literal, without brackets.
pub(crate) fn is_ipv6(host: &str) -> bool {
    parse_v6(host).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn v4() {
        assert_eq!(parse_v4(b"127.0.0.1"), Some(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(parse_v4(b"255.255.255.255"), Some(Ipv4Addr::BROADCAST));
        assert_eq!(parse_v4(b"256.0.0.1"), None);
        assert_eq!(parse_v4(b"01.0.0.1"), None);
        assert_eq!(parse_v4(b"1.2.3"), None);
        assert_eq!(parse_v4(b"1.2.3.4.5"), None);
        assert_eq!(parse_v4(b""), None);
    }

    #[test]
    fn v6() {
        assert_eq!(parse_v6("::1"), Some(Ipv6Addr::LOCALHOST));
        assert_eq!(parse_v6("::"), Some(Ipv6Addr::UNSPECIFIED));
        assert_eq!(
            parse_v6("2001:db8::7"),
            Some(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 7))
        );
        assert_eq!(
            parse_v6("1:2:3:4:5:6:7:8"),
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8))
        );
        assert_eq!(
            parse_v6("::ffff:192.0.2.1"),
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc000, 0x201))
        );
        assert_eq!(parse_v6(":::"), None);
        assert_eq!(parse_v6("1::2::3"), None);
        assert_eq!(parse_v6("1:2:3:4:5:6:7"), None);
        assert_eq!(parse_v6("1:2:3:4:5:6:7:8:9"), None);
        assert_eq!(parse_v6("1:2:3:4:5:6:7::8"), None);
        assert_eq!(parse_v6("12345::"), None);
        assert_eq!(parse_v6("g::1"), None);
        assert_eq!(parse_v6("fe80::1%25eth0"), None);
        assert_eq!(parse_v6("example.com"), None);
    }
}
