//! Cross-origin policy for browser front ends running on localhost.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, header,
        uri::Authority,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:4200",
    "http://localhost:5173",
];

pub const MAX_AGE: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub allowed_origins: Vec<HeaderValue>,
    pub allowed_methods: Vec<Method>,
    pub allowed_headers: Vec<HeaderName>,
    pub exposed_headers: Vec<HeaderName>,
    pub allow_credentials: bool,
    pub max_age: Duration,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: ALLOWED_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect(),
            allowed_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
                Method::OPTIONS,
            ],
            allowed_headers: vec![
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::ACCEPT,
                HeaderName::from_static("x-requested-with"),
                header::CACHE_CONTROL,
            ],
            exposed_headers: vec![
                header::AUTHORIZATION,
                header::CONTENT_DISPOSITION,
            ],
            allow_credentials: true,
            max_age: MAX_AGE,
        }
    }
}

impl CorsPolicy {
    pub fn allows_origin(&self, origin: &HeaderValue) -> bool {
        self.allowed_origins.contains(origin)
    }

    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins.clone()))
            .allow_methods(self.allowed_methods.clone())
            .allow_headers(self.allowed_headers.clone())
            .expose_headers(self.exposed_headers.clone())
            .allow_credentials(self.allow_credentials)
            .max_age(self.max_age)
    }
}

/// True when `origin` names the same scheme, host and port the request
/// was addressed to through its `Host` header. Missing ports default per
/// scheme.
pub fn is_same_origin(
    origin: &HeaderValue, headers: &HeaderMap, request_scheme: &str,
) -> bool {
    let Some(origin) = origin
        .to_str()
        .ok()
        .and_then(|raw| raw.parse::<Uri>().ok())
    else {
        return false;
    };
    let Some(host) = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.parse::<Authority>().ok())
    else {
        return false;
    };

    let Some(origin_scheme) = origin.scheme_str() else {
        return false;
    };
    let Some(origin_host) = origin.host() else {
        return false;
    };

    origin_scheme.eq_ignore_ascii_case(request_scheme)
        && origin_host.eq_ignore_ascii_case(host.host())
        && origin.port_u16().or(default_port(origin_scheme))
            == host.port_u16().or(default_port(request_scheme))
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme.to_ascii_lowercase().as_str() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Rejects cross-origin requests whose `Origin` is outside the allow-list.
/// Requests without an `Origin` header, and same-origin requests such as
/// those issued by the `/docs` page, pass.
pub async fn enforce_origin(
    State(policy): State<Arc<CorsPolicy>>, request: Request, next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let scheme = request.uri().scheme_str().unwrap_or("http");
        if !policy.allows_origin(origin)
            && !is_same_origin(origin, request.headers(), scheme)
        {
            tracing::debug!(origin = ?origin, "cross-origin request rejected");
            return (StatusCode::FORBIDDEN, "Invalid CORS request")
                .into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        let policy = CorsPolicy::default();

        for origin in ALLOWED_ORIGINS {
            assert!(policy.allows_origin(&HeaderValue::from_static(origin)));
        }
        assert!(
            !policy
                .allows_origin(&HeaderValue::from_static("http://evil.example"))
        );
        assert!(
            !policy.allows_origin(&HeaderValue::from_static(
                "http://localhost:8080"
            ))
        );
    }

    fn host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_same_origin_matches_host() {
        let origin = HeaderValue::from_static("http://localhost:8080");

        assert!(is_same_origin(&origin, &host("localhost:8080"), "http"));
        assert!(is_same_origin(&origin, &host("LOCALHOST:8080"), "http"));
        assert!(!is_same_origin(&origin, &host("localhost:9090"), "http"));
        assert!(!is_same_origin(&origin, &host("example.com:8080"), "http"));
        assert!(!is_same_origin(&origin, &host("localhost:8080"), "https"));
        assert!(!is_same_origin(&origin, &HeaderMap::new(), "http"));
    }

    #[test]
    fn test_same_origin_default_ports() {
        assert!(is_same_origin(
            &HeaderValue::from_static("http://sdms.local"),
            &host("sdms.local:80"),
            "http"
        ));
        assert!(is_same_origin(
            &HeaderValue::from_static("https://sdms.local:443"),
            &host("sdms.local"),
            "https"
        ));
        assert!(!is_same_origin(
            &HeaderValue::from_static("null"),
            &host("sdms.local"),
            "http"
        ));
    }

    #[test]
    fn test_policy_values() {
        let policy = CorsPolicy::default();

        assert_eq!(policy.allowed_methods.len(), 6);
        assert!(policy.allowed_methods.contains(&Method::PATCH));
        assert!(
            policy
                .allowed_headers
                .contains(&HeaderName::from_static("x-requested-with"))
        );
        assert_eq!(policy.exposed_headers, vec![
            header::AUTHORIZATION,
            header::CONTENT_DISPOSITION
        ]);
        assert!(policy.allow_credentials);
        assert_eq!(policy.max_age.as_secs(), 3600);
    }
}
