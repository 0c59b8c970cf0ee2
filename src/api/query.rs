//! Request target construction.
//!
//! `{base}/{endpoint}/index?key={key}&{k1}={v1}&...`
//!
//! Parameters are kept in the order supplied; `None` values are dropped
//! entirely. Every value (the key included) is form-urlencoded.

use url::form_urlencoded::byte_serialize;

/// Public tianapi host.
pub const DEFAULT_BASE_URL: &str = "http://api.tianapi.com";

/// One ordered query parameter whose value may be absent.
pub type Param = (&'static str, Option<String>);

/// Endpoint name plus the parameters of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    pub endpoint: &'static str,
    pub params: Vec<Param>,
}

impl EndpointRequest {
    pub fn new(endpoint: &'static str, params: Vec<Param>) -> Self {
        Self { endpoint, params }
    }

    /// Render the full request target for this endpoint.
    pub fn target(&self, base: &str, key: &str) -> String {
        build_target(base, self.endpoint, key, &self.params)
    }
}

/// Build the request target. Pure; `key` is expected to be non-empty and
/// already trimmed by the configuration layer.
pub fn build_target(base: &str, endpoint: &str, key: &str, params: &[Param]) -> String {
    let mut out = format!(
        "{}/{}/index?key={}",
        base.trim_end_matches('/'),
        endpoint,
        encode(key)
    );
    for (name, value) in params {
        if let Some(v) = value {
            out.push('&');
            out.push_str(name);
            out.push('=');
            out.push_str(&encode(v));
        }
    }
    out
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_omitted() {
        let params = vec![
            ("type", None),
            ("name", Some("cat".to_string())),
            ("page", Some("1".to_string())),
            ("word", None),
        ];
        let t = build_target(DEFAULT_BASE_URL, "pet", "k", &params);
        assert_eq!(t, "http://api.tianapi.com/pet/index?key=k&name=cat&page=1");
        assert!(!t.contains("type="));
        assert!(!t.contains("word="));
    }

    #[test]
    fn no_params_yields_key_only() {
        let t = build_target(DEFAULT_BASE_URL, "networkhot", "abc", &[]);
        assert_eq!(t, "http://api.tianapi.com/networkhot/index?key=abc");
    }

    #[test]
    fn values_are_encoded() {
        let params = vec![("area", Some("重庆".to_string()))];
        let t = build_target(DEFAULT_BASE_URL, "citylookup", "k", &params);
        assert_eq!(
            t,
            "http://api.tianapi.com/citylookup/index?key=k&area=%E9%87%8D%E5%BA%86"
        );

        let params = vec![("text", Some("a&b=c d".to_string()))];
        let t = build_target(DEFAULT_BASE_URL, "addressparse", "k", &params);
        assert!(t.ends_with("&text=a%26b%3Dc+d"), "got {t}");
    }

    #[test]
    fn supplied_order_is_kept() {
        let params = vec![
            ("page", Some("2".to_string())),
            ("num", Some("3".to_string())),
            ("rand", Some("1".to_string())),
        ];
        let t = build_target("http://stub.local/", "esports", "k", &params);
        assert_eq!(
            t,
            "http://stub.local/esports/index?key=k&page=2&num=3&rand=1"
        );
    }

    #[test]
    fn endpoint_request_delegates() {
        let req = EndpointRequest::new("jiejiari", vec![("date", Some("2024".into()))]);
        assert_eq!(
            req.target(DEFAULT_BASE_URL, "k"),
            "http://api.tianapi.com/jiejiari/index?key=k&date=2024"
        );
    }
}
