//! Storage key schema. These strings are shared with existing deployments and
//! must not change.

/// Global identifier counter.
pub const NEXT_URL_ID: &str = "next.url.id";

/// `shortlink:<token>:url` holds the original URL.
pub fn shortlink_url_key(token: &str) -> String {
    format!("shortlink:{}:url", token)
}

/// `urlhash:<fingerprint>:url` holds the token issued for that URL.
pub fn url_hash_key(fingerprint: &str) -> String {
    format!("urlhash:{}:url", fingerprint)
}

/// `shortlink:<token>:detail` holds the JSON link detail.
pub fn shortlink_detail_key(token: &str) -> String {
    format!("shortlink:{}:detail", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(NEXT_URL_ID, "next.url.id");
        assert_eq!(shortlink_url_key("1"), "shortlink:1:url");
        assert_eq!(url_hash_key("abc123"), "urlhash:abc123:url");
        assert_eq!(shortlink_detail_key("Zz9"), "shortlink:Zz9:detail");
    }
}
