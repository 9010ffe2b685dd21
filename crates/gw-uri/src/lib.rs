//! Parsing contracts for the custom-scheme cookie handshake.
//!
//! A handshake URL has the shape
//! `<scheme>://<host>?cookie=<url-encoded JSON object>` where the JSON
//! object is a flat mapping from cookie name to cookie value.

use gw_core::ShellError;
use gw_core::ShellResult;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Query parameter that carries the serialized cookie mapping.
pub const COOKIE_PARAM: &str = "cookie";

/// One navigation attempt as reported by the browser control.
///
/// Constructed per attempt, consumed within the same synchronous
/// interception call, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    raw: String,
    parsed: Url,
}

impl NavigationRequest {
    pub fn parse(raw: &str) -> ShellResult<Self> {
        let parsed = Url::parse(raw).map_err(|error| {
            ShellError::new(
                "uri.parse_failed",
                format!("failed to parse navigation target `{raw}`: {error}"),
            )
        })?;

        Ok(Self {
            raw: raw.to_owned(),
            parsed,
        })
    }

    /// The URL string exactly as the browser control reported it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Scheme as normalized by URL parsing (always lowercase).
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Authority host, or the empty string when the URL carries none.
    pub fn host(&self) -> &str {
        self.parsed.host_str().unwrap_or("")
    }

    /// Percent-decoded query parameter lookup; repeated names collapse
    /// to the last occurrence, consistent with query-string semantics.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let mut found = None;
        for (key, value) in self.parsed.query_pairs() {
            if key == name {
                found = Some(value.into_owned());
            }
        }
        found
    }

    /// Cookie mapping carried by this request; empty when the `cookie`
    /// parameter is absent or malformed.
    pub fn cookie_payload(&self) -> CookiePayload {
        CookiePayload::decode(self.query_param(COOKIE_PARAM).as_deref())
    }
}

/// Flat cookie-name to cookie-value mapping decoded from the handshake.
///
/// Iteration order is not part of the handshake contract; consumers may
/// only rely on every entry being applied before the redirect runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookiePayload {
    entries: BTreeMap<String, String>,
}

impl CookiePayload {
    /// Decodes the JSON object from the `cookie` query parameter.
    ///
    /// A missing, empty, or malformed payload yields the empty mapping;
    /// decoding never fails. Entries with empty names are dropped since
    /// a cookie name must be non-empty.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let Ok(mut entries) = serde_json::from_str::<BTreeMap<String, String>>(raw) else {
            return Self::default();
        };

        entries.retain(|name, _| !name.is_empty());
        Self { entries }
    }

    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        let mut entries = entries;
        entries.retain(|name, _| !name.is_empty());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// HTTPS destination derived from an intercepted request's authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    url: String,
}

impl RedirectTarget {
    /// Returns `None` for an empty host: a hostless handshake URL has
    /// nowhere to redirect to, so the shell stays on the current page.
    pub fn for_host(host: &str) -> Option<Self> {
        if host.is_empty() {
            return None;
        }

        Some(Self {
            url: format!("https://{host}"),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::CookiePayload;
    use super::NavigationRequest;
    use super::RedirectTarget;
    use std::collections::BTreeMap;

    fn parsed(raw: &str) -> NavigationRequest {
        match NavigationRequest::parse(raw) {
            Ok(request) => request,
            Err(error) => panic!("{error}"),
        }
    }

    #[test]
    fn parses_private_scheme_authority() {
        let request = parsed("autotrader://shop.example?cookie=%7B%7D");
        assert_eq!(request.scheme(), "autotrader");
        assert_eq!(request.host(), "shop.example");
    }

    #[test]
    fn scheme_is_normalized_to_lowercase() {
        let request = parsed("AUTOTRADER://shop.example");
        assert_eq!(request.scheme(), "autotrader");
    }

    #[test]
    fn hostless_url_yields_empty_host() {
        let request = parsed("autotrader:opaque-payload");
        assert_eq!(request.host(), "");
    }

    #[test]
    fn rejects_unparseable_target() {
        let result = NavigationRequest::parse("::not a url::");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "uri.parse_failed");
        }
    }

    #[test]
    fn query_param_is_percent_decoded() {
        let request = parsed("autotrader://h?cookie=%7B%22a%22%3A%22b%22%7D");
        assert_eq!(
            request.query_param("cookie").as_deref(),
            Some(r#"{"a":"b"}"#)
        );
    }

    #[test]
    fn repeated_query_params_collapse_to_last() {
        let request = parsed("autotrader://h?cookie=first&cookie=second");
        assert_eq!(request.query_param("cookie").as_deref(), Some("second"));
    }

    #[test]
    fn decodes_flat_json_object() {
        let payload = CookiePayload::decode(Some(r#"{"session":"abc123","theme":"dark"}"#));
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("session"), Some("abc123"));
        assert_eq!(payload.get("theme"), Some("dark"));
    }

    #[test]
    fn malformed_json_decodes_to_empty_mapping() {
        assert!(CookiePayload::decode(Some("not-json")).is_empty());
        assert!(CookiePayload::decode(Some(r#"{"n":1}"#)).is_empty());
        assert!(CookiePayload::decode(Some("")).is_empty());
        assert!(CookiePayload::decode(None).is_empty());
    }

    #[test]
    fn empty_cookie_names_are_dropped() {
        let payload = CookiePayload::decode(Some(r#"{"":"ghost","real":"x"}"#));
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("real"), Some("x"));
    }

    #[test]
    fn cookie_values_may_be_empty() {
        let payload = CookiePayload::decode(Some(r#"{"cleared":""}"#));
        assert_eq!(payload.get("cleared"), Some(""));
    }

    #[test]
    fn payload_round_trips_through_handshake_url() {
        let mut entries = BTreeMap::new();
        entries.insert("auth".to_owned(), "xyz".to_owned());
        entries.insert("locale".to_owned(), "en-US".to_owned());
        let original = CookiePayload::from_entries(entries.clone());

        let json = match serde_json::to_string(&entries) {
            Ok(json) => json,
            Err(error) => panic!("{error}"),
        };
        let mut handshake = match url::Url::parse("autotrader://shop.example") {
            Ok(url) => url,
            Err(error) => panic!("{error}"),
        };
        handshake
            .query_pairs_mut()
            .append_pair(super::COOKIE_PARAM, &json);

        let request = parsed(handshake.as_str());
        assert_eq!(request.cookie_payload(), original);
    }

    #[test]
    fn redirect_target_prefixes_https() {
        let target = RedirectTarget::for_host("shop.example");
        assert_eq!(target.map(|t| t.as_str().to_owned()).as_deref(), Some("https://shop.example"));
    }

    #[test]
    fn redirect_target_refuses_empty_host() {
        assert_eq!(RedirectTarget::for_host(""), None);
    }
}
