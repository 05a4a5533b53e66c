//! Link splitting helpers shared by adapters.

/// Split `body#fragment` on the first `#`.
pub fn split_fragment(link: &str) -> (&str, Option<&str>) {
    match link.split_once('#') {
        Some((body, frag)) => (body, Some(frag)),
        None => (link, None),
    }
}

/// Query-style unescape: `+` is a space, `%XY` a byte.
///
/// Returns `None` for a malformed escape or a result that is not UTF-8.
pub fn query_unescape(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    urlencoding::decode(&s.replace('+', " "))
        .ok()
        .map(|c| c.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_hash_wins() {
        assert_eq!(split_fragment("abc#x#y"), ("abc", Some("x#y")));
        assert_eq!(split_fragment("abc"), ("abc", None));
        assert_eq!(split_fragment("abc#"), ("abc", Some("")));
    }

    #[test]
    fn unescapes_query_style() {
        assert_eq!(query_unescape("HK%20Node+1").as_deref(), Some("HK Node 1"));
        assert_eq!(query_unescape("a%2Bb").as_deref(), Some("a+b"));
        assert_eq!(
            query_unescape("%E9%A6%99%E6%B8%AF").as_deref(),
            Some("香港")
        );
        assert_eq!(query_unescape("plain").as_deref(), Some("plain"));
    }

    #[test]
    fn malformed_escapes_fail() {
        assert_eq!(query_unescape("bad%zz"), None);
        assert_eq!(query_unescape("trailing%4"), None);
        assert_eq!(query_unescape("%"), None);
        assert_eq!(query_unescape("%FF%FE"), None);
    }
}
