//! Interpreting the argument a script passes to `fetch`.

use std::{collections::BTreeMap, time::Duration};

use super::FetchError;
use crate::engine::GuestValue;

const ACCEPT: &str = "Accept";
const APPLICATION_JSON: &str = "application/json";

/// HTTP methods a script may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl HttpMethod {
    /// Parses a method name case-insensitively. Unrecognized names are GET.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "post" => HttpMethod::Post,
            "put" => HttpMethod::Put,
            "delete" => HttpMethod::Delete,
            "patch" => HttpMethod::Patch,
            _ => HttpMethod::Get,
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// An outbound request as described by a widget script.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Absolute URL, or a path relative to the app's base URL.
    pub url: String,
    /// Defaults to GET.
    pub method: HttpMethod,
    /// Headers to send. Headers from a request object are ordered by name,
    /// since script objects do not keep insertion order. Always contains an
    /// `Accept` header.
    pub headers: Vec<(String, String)>,
    /// Overrides the host's default request timeout.
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    /// A GET request for `url` accepting JSON.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: vec![(ACCEPT.to_string(), APPLICATION_JSON.to_string())],
            timeout: None,
        }
    }

    /// Builds a request from the value a script passed to `fetch`: either a
    /// URL string or an object with `url`, `method`, `headers` and `timeout`
    /// fields (names matched case-insensitively, unknown fields ignored).
    pub fn from_guest(value: GuestValue) -> Result<Self, FetchError> {
        match value {
            GuestValue::String(url) => Ok(Self::get(url)),
            GuestValue::Mapping(fields) => Self::from_fields(fields),
            other => Err(FetchError::MalformedSpec(format!(
                "expected a URL string or a request object, got {}",
                other.kind()
            ))),
        }
    }

    fn from_fields(fields: BTreeMap<String, GuestValue>) -> Result<Self, FetchError> {
        let mut url = None;
        let mut method = HttpMethod::Get;
        let mut headers = Vec::new();
        let mut timeout = None;

        for (name, value) in fields {
            match name.to_ascii_lowercase().as_str() {
                "url" => url = Some(expect_string("url", value)?),
                "method" => {
                    method = match value {
                        GuestValue::Null => HttpMethod::Get,
                        value => HttpMethod::parse(&expect_string("method", value)?),
                    }
                }
                "headers" => headers = parse_headers(value)?,
                "timeout" => timeout = parse_timeout(value)?,
                _ => {}
            }
        }

        let url = url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| FetchError::MalformedSpec("request object has no url".to_string()))?;

        if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case(ACCEPT)) {
            headers.push((ACCEPT.to_string(), APPLICATION_JSON.to_string()));
        }

        Ok(Self { url, method, headers, timeout })
    }
}

/// Resolves a script-supplied URL against the app's base URL.
///
/// URLs starting with `http` are absolute and returned as-is. Anything else is
/// appended to `app_url` with exactly one `/` between the two.
pub fn resolve_url(app_url: &str, url: &str) -> String {
    if url.starts_with("http") {
        return url.to_string();
    }
    format!("{}/{}", app_url.trim_end_matches('/'), url.trim_start_matches('/'))
}

fn expect_string(field: &str, value: GuestValue) -> Result<String, FetchError> {
    match value {
        GuestValue::String(s) => Ok(s),
        other => Err(FetchError::MalformedSpec(format!(
            "field '{field}' must be a string, got {}",
            other.kind()
        ))),
    }
}

fn parse_headers(value: GuestValue) -> Result<Vec<(String, String)>, FetchError> {
    match value {
        GuestValue::Null => Ok(Vec::new()),
        GuestValue::Mapping(map) => map
            .into_iter()
            .map(|(name, value)| -> Result<(String, String), FetchError> {
                let value = expect_string(&format!("headers.{name}"), value)?;
                Ok((name, value))
            })
            .collect(),
        other => Err(FetchError::MalformedSpec(format!(
            "field 'headers' must be an object, got {}",
            other.kind()
        ))),
    }
}

/// Zero or negative timeouts mean "use the host default".
fn parse_timeout(value: GuestValue) -> Result<Option<Duration>, FetchError> {
    match value {
        GuestValue::Null => Ok(None),
        GuestValue::Number(secs) => {
            let secs = secs.as_f64().unwrap_or_default();
            if secs > 0.0 {
                Duration::try_from_secs_f64(secs).map(Some).map_err(|e| {
                    FetchError::MalformedSpec(format!("field 'timeout' is out of range: {e}"))
                })
            } else {
                Ok(None)
            }
        }
        other => Err(FetchError::MalformedSpec(format!(
            "field 'timeout' must be a number of seconds, got {}",
            other.kind()
        ))),
    }
}
