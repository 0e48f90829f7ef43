//! `Cookie` header parsing.
//!
//! Used by the client to recover the CSRF token from its cookie header, and
//! by the server to read the session and CSRF cookies.

/// Find a cookie by name in a `Cookie` header value and URL-decode it.
///
/// Returns `None` if the cookie is absent or its value is not valid
/// percent-encoded UTF-8.
///
/// ```
/// use hotel_favorites_core::cookie::find_cookie;
///
/// let header = "sessionid=abc; csrftoken=tok%3D%3D";
/// assert_eq!(find_cookie(header, "csrftoken").as_deref(), Some("tok=="));
/// assert_eq!(find_cookie(header, "missing"), None);
/// ```
#[must_use]
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
        .and_then(|raw| urlencoding::decode(raw).ok())
        .map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_and_last() {
        let header = "csrftoken=one; sessionid=two";
        assert_eq!(find_cookie(header, "csrftoken").as_deref(), Some("one"));
        assert_eq!(find_cookie(header, "sessionid").as_deref(), Some("two"));
    }

    #[test]
    fn test_name_must_match_exactly() {
        let header = "xcsrftoken=wrong; csrftoken=right";
        assert_eq!(find_cookie(header, "csrftoken").as_deref(), Some("right"));
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(find_cookie("", "csrftoken"), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(find_cookie("t=a=b", "t").as_deref(), Some("a=b"));
    }
}
