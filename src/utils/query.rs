// Query-string helpers for page-to-page messages and return URLs.

use std::collections::HashMap;

use crate::viewmodels::message::MessageKind;

/// Parsed `?key=value&...` pairs, percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Accepts the raw `location.search` value, with or without the leading `?`.
    pub fn parse(search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        let mut params = HashMap::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode(key), decode(value));
        }

        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn return_url(&self) -> Option<&str> {
        self.get("returnUrl").filter(|url| !url.is_empty())
    }

    /// The `message` / `type` pair another page passed along, if any.
    pub fn flash(&self) -> Option<(String, MessageKind)> {
        let message = self.get("message").filter(|m| !m.is_empty())?;
        let kind = self
            .get("type")
            .map(MessageKind::parse)
            .unwrap_or(MessageKind::Info);
        Some((message.to_string(), kind))
    }
}

/// Percent-escapes only; a literal `+` stays a `+` so emails survive.
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// `path?message=...&type=...` with both values encoded.
pub fn with_message(path: &str, message: &str, kind: MessageKind) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}message={}&type={}",
        path,
        separator,
        urlencoding::encode(message),
        kind.as_str()
    )
}

/// `path?email=...` when an email is known.
pub fn with_email(path: &str, email: Option<&str>) -> String {
    match email.filter(|e| !e.is_empty()) {
        Some(email) => format!("{}?email={}", path, urlencoding::encode(email)),
        None => path.to_string(),
    }
}

/// URL-encoded `a=1&b=2` body.
pub fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes() {
        let params = QueryParams::parse("?message=Session%20expired.&type=error&returnUrl=%2Fbookings");
        assert_eq!(params.get("message"), Some("Session expired."));
        assert_eq!(params.return_url(), Some("/bookings"));
        assert_eq!(
            params.flash(),
            Some(("Session expired.".to_string(), MessageKind::Error))
        );
    }

    #[test]
    fn missing_value_and_plus_signs() {
        let params = QueryParams::parse("flag&email=a+b@x.com&note=hello%20world");
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("email"), Some("a+b@x.com"));
        assert_eq!(params.get("note"), Some("hello world"));
        assert_eq!(params.flash(), None);
    }

    #[test]
    fn flash_defaults_to_info() {
        let params = QueryParams::parse("message=Hi");
        assert_eq!(params.flash(), Some(("Hi".to_string(), MessageKind::Info)));
    }

    #[test]
    fn builds_message_urls() {
        assert_eq!(
            with_message("/login", "Your password has been reset successfully.", MessageKind::Success),
            "/login?message=Your%20password%20has%20been%20reset%20successfully.&type=success"
        );
        assert_eq!(
            with_email("/api/profile/update", Some("a+b@x.com")),
            "/api/profile/update?email=a%2Bb%40x.com"
        );
        assert_eq!(with_email("/api/profile/update", None), "/api/profile/update");
    }

    #[test]
    fn encodes_form_bodies() {
        let body = encode_form(&[
            ("reply".to_string(), "Thanks & welcome".to_string()),
            ("id".to_string(), "4".to_string()),
        ]);
        assert_eq!(body, "reply=Thanks%20%26%20welcome&id=4");
    }
}
