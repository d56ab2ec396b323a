use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde::de::DeserializeOwned;
use sync_logging::{sync_debug, sync_warn};

use crate::{Envelope, Favourite, FavouriteId, FavouritesSource, RemoteError, TransportKind};

const LIST_PATH: &str = "lg/collect/usertools/json";
const DELETE_PATH: &str = "lg/collect/deletetool/json";

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Sent verbatim as the `Cookie` header; the API keys the user by it.
    pub session_cookie: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.wanandroid.com".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
            session_cookie: None,
        }
    }
}

/// HTTP/JSON implementation of [`FavouritesSource`].
#[derive(Debug, Clone)]
pub struct ReqwestSource {
    settings: SourceSettings,
    client: reqwest::Client,
}

impl ReqwestSource {
    pub fn new(settings: SourceSettings) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RemoteError::transport(TransportKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, RemoteError> {
        let joined = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path);
        url::Url::parse(&joined)
            .map_err(|err| RemoteError::transport(TransportKind::InvalidUrl, err.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.settings.session_cookie.as_deref() {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned + Send>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, RemoteError> {
        let response = self.authorize(request).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::transport(
                TransportKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RemoteError::transport(
                    TransportKind::TooLarge { max_bytes },
                    format!("content-length {content_len}"),
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(RemoteError::transport(
                    TransportKind::TooLarge { max_bytes },
                    "body exceeded limit while streaming",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|err| RemoteError::transport(TransportKind::Decode, err.to_string()))?;
        envelope.into_result()
    }
}

#[async_trait::async_trait]
impl FavouritesSource for ReqwestSource {
    async fn fetch_favourites(&self) -> Result<Vec<Favourite>, RemoteError> {
        let url = self.endpoint(LIST_PATH)?;
        sync_debug!("GET {}", url);
        let data: Option<Vec<Favourite>> = self.send(self.client.get(url)).await?;
        // A user with nothing collected gets `"data": null`.
        Ok(data.unwrap_or_default())
    }

    async fn delete_favourite(&self, id: FavouriteId) -> Result<(), RemoteError> {
        let url = self.endpoint(DELETE_PATH)?;
        sync_debug!("POST {} id={}", url, id);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(format!("id={id}"));
        let result: Result<Option<serde_json::Value>, RemoteError> = self.send(request).await;
        if let Err(RemoteError::Server { code, message }) = &result {
            sync_warn!("Server refused delete of {}: {} {}", id, code, message);
        }
        result.map(|_| ())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::transport(TransportKind::Timeout, err.to_string());
    }
    RemoteError::transport(TransportKind::Network, err.to_string())
}
