//! Token cookie helpers

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};

/// Name of the cookie carrying the JWT
pub const TOKEN_COOKIE: &str = "token";

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Build the `Set-Cookie` value for a freshly issued token
pub fn token_cookie(
    token: &str,
    now: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    secure: bool,
) -> String {
    let max_age = (expires_at - now).num_seconds().max(0);
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Expires={}; Max-Age={}",
        TOKEN_COOKIE,
        token,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT"),
        max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def.ghi; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, TOKEN_COOKIE),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("token=t1"));

        assert_eq!(extract_cookie(&headers, TOKEN_COOKIE), Some("t1".to_string()));
    }

    #[test]
    fn test_empty_cookie_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));

        assert_eq!(extract_cookie(&headers, TOKEN_COOKIE), None);
    }

    #[test]
    fn test_token_cookie() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let cookie = token_cookie("abc", now, now + Duration::hours(36), false);

        assert!(cookie.starts_with("token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Expires=Tue, 02 Jan 2024 12:00:00 GMT"));
        assert!(cookie.contains("Max-Age=129600"));
        assert!(!cookie.contains("Secure"));

        let secure = token_cookie("abc", now, now + Duration::hours(36), true);
        assert!(secure.ends_with("; Secure"));
    }
}
