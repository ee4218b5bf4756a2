//! The I/O seam between the executor and the network.
//!
//! # Design
//! `Transport` turns a plain-data `HttpRequest` into a plain-data
//! `HttpResponse`. Non-2xx statuses are returned as data, never as `Err`; the
//! executor owns status interpretation. `Err` is reserved for requests that
//! produced no response at all.

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MultipartBody, RequestBody};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// `Transport` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Falls back to reqwest's defaults (no timeout) when the configured
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    timeout_secs = config.timeout.as_secs(),
                    "failed to build HTTP client, using defaults without timeout: {e}"
                );
                reqwest::Client::new()
            });
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&ApiConfig::default())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart(body) => builder.multipart(multipart_form(body)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::transport(format!("failed to read response body: {e}")))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn multipart_form(body: MultipartBody) -> Result<reqwest::multipart::Form, RequestError> {
    let mut part =
        reqwest::multipart::Part::bytes(body.file.bytes).file_name(body.file.file_name);
    if let Some(content_type) = &body.file.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|e| RequestError::transport(format!("invalid file content type: {e}")))?;
    }

    let mut form = reqwest::multipart::Form::new().part("file", part);
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    Ok(form)
}
