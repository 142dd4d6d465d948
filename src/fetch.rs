use crate::{Error, Result};
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

/// Browser-like User-Agent; the embed host rejects obvious bot agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for fetching encoded payloads from the embed host.
#[derive(Clone)]
pub struct PayloadClient {
    client: Client,
}

impl PayloadClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a payload body as text, sending the embed page as Referer.
    ///
    /// Any non-success status is reported as `UpstreamStatus`; callers treat
    /// it as "no result from this source", not a fatal error.
    pub async fn fetch_payload(&self, url: &str, referer: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::REFERER, referer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes: Bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::FetchFailed {
            url: url.to_string(),
            reason: format!("Invalid UTF-8: {}", e),
        })
    }
}

impl Default for PayloadClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_payload_sends_referer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payload"))
            .and(header("Referer", "https://host.test/e/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("deadbeef"))
            .expect(1)
            .mount(&server)
            .await;

        let body = PayloadClient::new()
            .fetch_payload(&format!("{}/payload", server.uri()), "https://host.test/e/1")
            .await
            .unwrap();
        assert_eq!(body, "deadbeef");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = PayloadClient::new()
            .fetch_payload(&format!("{}/payload", server.uri()), "https://host.test/e/1")
            .await;
        assert!(matches!(
            result,
            Err(Error::UpstreamStatus { status: 404, .. })
        ));
    }
}
