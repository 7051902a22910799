use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn, Instrument};

use crate::models::{RepositoryError, RepositoryResult};

const USER_AGENT: &str = concat!("canteen-menu/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client used by all repositories
pub fn build_http_client(timeout: Duration) -> RepositoryResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| RepositoryError::ConnectionFailed {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// Parse a configured base URL, rejecting anything that cannot carry a path
pub fn parse_base_url(raw: &str) -> RepositoryResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| RepositoryError::InvalidUrl {
        message: format!("{}: {}", raw, e),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(RepositoryError::InvalidUrl {
            message: format!("{}: expected an http or https base URL", raw),
        });
    }

    Ok(url)
}

/// Append percent-encoded path segments to `base`
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> RepositoryResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RepositoryError::InvalidUrl {
            message: format!("{} cannot be a base URL", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// URL without its query string, safe to log
pub(crate) fn loggable_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Span for one outbound HTTP call
fn http_span(method: &'static str, url: &Url, peer_service: &'static str) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        "http.method" = method,
        "http.url" = %loggable_url(url),
        "peer.service" = peer_service,
        "http.status_code" = tracing::field::Empty,
    )
}

pub(crate) async fn get_json<T>(
    client: &Client,
    url: Url,
    peer_service: &'static str,
) -> RepositoryResult<T>
where
    T: DeserializeOwned,
{
    let span = http_span("GET", &url, peer_service);

    async move {
        let shown = loggable_url(&url);
        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RepositoryError::from_reqwest(e, &shown))?;

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %shown, "Upstream returned error status");
            return Err(RepositoryError::UnexpectedStatus {
                status: status.as_u16(),
                url: shown,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RepositoryError::from_reqwest(e, &shown))?;
        debug!(bytes = body.len(), "Received response body");

        Ok(serde_json::from_slice(&body)?)
    }
    .instrument(span)
    .await
}

pub(crate) async fn post_json<B>(
    client: &Client,
    url: Url,
    body: &B,
    peer_service: &'static str,
) -> RepositoryResult<()>
where
    B: Serialize + ?Sized,
{
    let span = http_span("POST", &url, peer_service);

    async move {
        let shown = loggable_url(&url);
        let payload = serde_json::to_vec(body)?;
        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| RepositoryError::from_reqwest(e, &shown))?;

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %shown, "Upstream rejected request");
            return Err(RepositoryError::UnexpectedStatus {
                status: status.as_u16(),
                url: shown,
            });
        }

        Ok(())
    }
    .instrument(span)
    .await
}
