use crate::config::*;
use crate::document::*;
use crate::error::*;
use crate::store::*;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;

/// [`RangeStore`] backed by the REST API.
///
/// - `POST {base}/range` creates a document.
/// - `GET {base}/range` lists summaries.
/// - `GET {base}/range/{id}` fetches one document.
///
/// Every request carries `Authorization: Bearer {token}`. Failures are not retried.
///
/// A create that the server accepts but whose reply carries no identity fails with
/// [`RangeError::Parse`]: the document may already be stored, so retrying can duplicate it.
pub struct HttpRangeStore {
    config: ClientConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct CreatedRange {
    #[serde(rename = "_id", alias = "id")]
    id: String,
}

impl HttpRangeStore {
    /// Creates a client after checking the configuration.
    pub fn new(config: ClientConfig) -> RangeResult<Self> {
        let config = config.checked()?;
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if is_loopback(&config.base_uri) {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| RangeError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Creates a client configured from the environment (see [`ClientConfig::from_env`]).
    #[inline]
    pub fn from_env() -> RangeResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    #[inline]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds `{base}/range/{id}` with `id` escaped as a single path segment.
    fn range_url(&self, id: &str) -> RangeResult<Url> {
        if matches!(id, "" | "." | "..") {
            return Err(RangeError::NotFound(id.to_string()));
        }

        let base = self.config.endpoint("range");
        let mut url = Url::parse(&base)
            .map_err(|e| RangeError::Config(format!("Invalid range endpoint {base:?}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| RangeError::Config(format!("Range endpoint {base:?} has no path")))?
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, token: &AuthToken) -> RangeResult<Response> {
        request
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| {
                log::warn!("request failed: {e}");
                RangeError::Network(e.to_string())
            })
    }
}

#[inline]
fn is_loopback(uri: &str) -> bool {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let authority = rest.split('/').next().unwrap_or_default();
    let host = authority.rsplit_once(':').map_or(authority, |(host, port)| {
        if port.ends_with(']') {
            authority
        } else {
            host
        }
    });
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}

async fn error_status(response: Response) -> RangeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("range store responded {status}");
    if body.is_empty() {
        RangeError::Network(status.to_string())
    } else {
        RangeError::Network(format!("{status}: {body}"))
    }
}

#[async_trait]
impl RangeStore for HttpRangeStore {
    async fn create(&self, token: &AuthToken, document: &RangeDocument) -> RangeResult<String> {
        let url = self.config.endpoint("range");
        log::info!("creating range {:?}", document.name);

        let response = self
            .send(self.http.post(&url).json(document), token)
            .await?;

        if !response.status().is_success() {
            return Err(error_status(response).await);
        }

        let created = response
            .json::<CreatedRange>()
            .await
            .map_err(|e| {
                log::warn!("range {:?} accepted without an identity: {e}", document.name);
                RangeError::Parse(format!("Range saved but the response has no identity: {e}"))
            })?;

        log::info!("created range {}", created.id);
        Ok(created.id)
    }

    async fn list(&self, token: &AuthToken) -> RangeResult<Vec<RangeSummary>> {
        let url = self.config.endpoint("range");
        let response = self.send(self.http.get(&url), token).await?;

        if !response.status().is_success() {
            return Err(error_status(response).await);
        }

        response
            .json::<Vec<RangeSummary>>()
            .await
            .map_err(|e| RangeError::Network(format!("Failed to parse range list: {e}")))
    }

    async fn fetch(&self, token: &AuthToken, id: &str) -> RangeResult<StoredRange> {
        let url = self.range_url(id)?;
        log::info!("fetching range {id}");

        let response = self.send(self.http.get(url), token).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RangeError::NotFound(id.to_string()));
        }

        if !response.status().is_success() {
            return Err(error_status(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| RangeError::Network(e.to_string()))?;

        match serde_json::from_str::<Option<StoredRange>>(&body) {
            Ok(Some(stored)) => Ok(stored),
            Ok(None) => Err(RangeError::NotFound(id.to_string())),
            Err(e) => {
                log::warn!("malformed range {id}: {e}");
                Err(RangeError::NotFound(format!("{id}: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_config() {
        let config = ClientConfig {
            base_uri: "localhost".to_string(),
            ..Default::default()
        };
        assert!(matches!(HttpRangeStore::new(config), Err(RangeError::Config(_))));

        let store = HttpRangeStore::new(ClientConfig::default()).unwrap();
        assert_eq!(store.config().endpoint("range"), "http://localhost:3000/range");
    }

    #[test]
    fn test_is_loopback() {
        let tests = [
            ("http://localhost:3000", true),
            ("http://localhost", true),
            ("http://127.0.0.1:9/api", true),
            ("http://[::1]:8080", true),
            ("http://[::1]", true),
            ("https://ranges.example.com", false),
            ("http://localhost.example.com:3000", false),
        ];

        for (uri, expected) in tests {
            assert_eq!(is_loopback(uri), expected, "{uri}");
        }
    }

    #[test]
    fn test_range_url_escapes_id() {
        let store = HttpRangeStore::new(ClientConfig::default()).unwrap();
        let tests = [
            ("abc123", "http://localhost:3000/range/abc123"),
            ("../user/me", "http://localhost:3000/range/..%2Fuser%2Fme"),
            ("abc?admin=1", "http://localhost:3000/range/abc%3Fadmin=1"),
            ("a#b", "http://localhost:3000/range/a%23b"),
            ("a b", "http://localhost:3000/range/a%20b"),
        ];

        for (id, expected) in tests {
            assert_eq!(store.range_url(id).unwrap().as_str(), expected, "{id}");
        }

        for id in ["", ".", ".."] {
            assert!(matches!(store.range_url(id), Err(RangeError::NotFound(_))), "{id}");
        }
    }

    #[test]
    fn test_created_range_id() {
        let created = serde_json::from_str::<CreatedRange>(r#"{"_id":"abc","name":"x"}"#).unwrap();
        assert_eq!(created.id, "abc");
        let created = serde_json::from_str::<CreatedRange>(r#"{"id":"def"}"#).unwrap();
        assert_eq!(created.id, "def");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_network_error() {
        let store = HttpRangeStore::new(ClientConfig {
            base_uri: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .unwrap();

        let result = store.list(&AuthToken::new("t")).await;
        assert!(matches!(result, Err(RangeError::Network(_))));
    }
}
