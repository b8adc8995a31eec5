//! The `fetch` capability: outbound HTTP on behalf of a widget script.

use std::{sync::Arc, time::Duration};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

use super::{FetchError, FetchRequest, FetchResult, classify_response, resolve_url};
use crate::engine::LogChannel;

/// Performs requests for a single invocation, relative to one app's base URL.
pub struct FetchBridge {
    client: Arc<ClientWithMiddleware>,
    app_url: String,
    default_timeout: Duration,
    log: LogChannel,
}

impl FetchBridge {
    /// Creates a bridge bound to `app_url`. The resolved URL of every request
    /// is written to `log`.
    pub fn new(
        client: Arc<ClientWithMiddleware>,
        app_url: impl Into<String>,
        default_timeout: Duration,
        log: LogChannel,
    ) -> Self {
        Self { client, app_url: app_url.into(), default_timeout, log }
    }

    /// Issues `request` and classifies the fully buffered response body.
    ///
    /// The HTTP status does not affect the result; error pages are classified
    /// like any other body.
    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchResult, FetchError> {
        let resolved = resolve_url(&self.app_url, &request.url);
        self.log.log(format!("URL: {resolved}"));

        let url = Url::parse(&resolved)
            .map_err(|e| FetchError::MalformedSpec(format!("invalid URL '{resolved}': {e}")))?;
        let headers = build_headers(&request.headers)?;
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        tracing::debug!(method = ?request.method, %url, ?timeout, "Sending widget request");

        let exchange = async {
            let response = self
                .client
                .request(request.method.into(), url)
                .headers(headers)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| FetchError::from_middleware(e, timeout))?;

            tracing::debug!(status = %response.status(), "Widget request completed");

            response.text().await.map_err(|e| FetchError::from_reqwest(e, timeout))
        };

        let body = match tokio::time::timeout(timeout, exchange).await {
            Ok(body) => body?,
            Err(_) => return Err(FetchError::Timeout(timeout)),
        };

        Ok(classify_response(&body))
    }
}

/// Names differing only in case are the same header; every value supplied for
/// it is sent.
fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            FetchError::MalformedSpec(format!("invalid header name '{name}': {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            FetchError::MalformedSpec(format!("invalid value for header '{name}': {e}"))
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}
