use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use shelf_logging::shelf_info;

use crate::{CatalogBook, FailureKind, LookupFailure, LookupRequest, LookupResponse};

#[derive(Debug, Clone)]
pub struct CollaboratorSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole exchange. The backend is slow, so this is generous.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/books".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// The one network call the client makes.
#[async_trait::async_trait]
pub trait Collaborator: Send + Sync {
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<CatalogBook>, LookupFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCollaborator {
    settings: CollaboratorSettings,
}

impl ReqwestCollaborator {
    pub fn new(settings: CollaboratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CollaboratorSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, LookupFailure> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| LookupFailure::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, LookupFailure> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Collaborator for ReqwestCollaborator {
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<CatalogBook>, LookupFailure> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| LookupFailure::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let body = serde_json::to_vec(request)
            .map_err(|err| LookupFailure::new(FailureKind::MalformedBody, err.to_string()))?;
        let client = self.build_client()?;

        shelf_info!("POST {} shelf={}", endpoint, request.shelf);
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        if !status.is_success() {
            // The backend answers 400 with a plain sentence explaining what is wrong.
            let text = String::from_utf8_lossy(&bytes);
            let message = match text.trim() {
                "" => status.to_string(),
                text => text.to_string(),
            };
            return Err(LookupFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let parsed: LookupResponse = serde_json::from_slice(&bytes)
            .map_err(|err| LookupFailure::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(parsed.books)
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> LookupFailure {
    LookupFailure::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> LookupFailure {
    if err.is_timeout() {
        return LookupFailure::new(FailureKind::Timeout, err.to_string());
    }
    LookupFailure::new(FailureKind::Network, err.to_string())
}
