//! The single choke point through which every resource client reaches the
//! network.
//!
//! # Design
//! Request construction is pure: `build_request` turns an endpoint path and
//! `RequestOptions` into an `HttpRequest`, applying the default content type,
//! caller headers and the bearer credential. All public paths (JSON,
//! multipart, raw bytes) funnel through one private `send`, so auth injection
//! and error normalization have a single source of truth. The body encoding
//! is chosen by the `RequestBody` variant.
//!
//! Calls are independent: no retry, no deduplication, no queuing.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::credentials::CredentialStore;
use crate::error::{decode_error_message, RequestError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MultipartBody, RequestBody};
use crate::transport::Transport;

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Per-call request description passed to `RequestExecutor::execute`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// Merged over the defaults; a caller header replaces a default of the
    /// same name.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Attach the stored bearer token when one is present.
    pub authenticated: bool,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
            authenticated: true,
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn post_empty() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn post_json<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Self::new(HttpMethod::Post).json(body)
    }

    pub fn put_json<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Self::new(HttpMethod::Put).json(body)
    }

    pub fn post_form(pairs: Vec<(String, String)>) -> Self {
        Self {
            body: RequestBody::Form(pairs),
            ..Self::new(HttpMethod::Post)
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let body = serde_json::to_string(body).map_err(|e| {
            RequestError::transport(format!("failed to serialize request body: {e}"))
        })?;
        self.body = RequestBody::Json(body);
        Ok(self)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Never attach the bearer token, even when one is stored.
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Builds, sends and decodes requests against the configured service.
pub struct RequestExecutor {
    config: ApiConfig,
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    pub fn new(
        config: ApiConfig,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            credentials,
            transport,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Resolve the URL and headers for a call without sending it.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers: Vec<(String, String)> = Vec::new();
        match options.body {
            // The transport writes the multipart boundary header itself.
            RequestBody::Multipart(_) => {}
            RequestBody::Form(_) => headers.push((CONTENT_TYPE.to_string(), FORM.to_string())),
            RequestBody::Empty | RequestBody::Json(_) => {
                headers.push((CONTENT_TYPE.to_string(), JSON.to_string()))
            }
        }
        for (name, value) in options.headers {
            set_header(&mut headers, &name, value);
        }
        if options.authenticated {
            if let Some(token) = self.credentials.token() {
                set_header(&mut headers, AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        HttpRequest {
            method: options.method,
            url: self.config.url(path),
            headers,
            body: options.body,
        }
    }

    /// Send a request and decode the JSON response as `T`.
    ///
    /// A 204 response decodes `T` from an empty object, so callers that may
    /// receive one must declare a type that tolerates `{}`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.send(self.build_request(path, options)).await?;
        decode_json(&response)
    }

    /// Send a request whose response body is irrelevant (deletes, actions).
    pub async fn execute_discard(&self, path: &str, options: RequestOptions) -> Result<()> {
        self.send(self.build_request(path, options)).await?;
        Ok(())
    }

    /// POST a multipart payload and decode the JSON response as `T`.
    pub async fn execute_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> Result<T> {
        let options = RequestOptions {
            body: RequestBody::Multipart(body),
            ..RequestOptions::post_empty()
        };
        self.execute(path, options).await
    }

    /// Authenticated GET returning the raw response bytes.
    pub async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .send(self.build_request(path, RequestOptions::get()))
            .await?;
        Ok(response.body)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method.as_str();
        let url = request.url.clone();
        tracing::debug!(method, url = %url, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method, url = %url, "request failed: {e}");
            e
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let message = decode_error_message(&response.body)
            .unwrap_or_else(|| self.config.fallback_error_message.clone());
        tracing::warn!(method, url = %url, status = response.status, "request rejected: {message}");
        Err(RequestError::http(response.status, message))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    let decoded = if response.status == 204 {
        serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
    } else {
        serde_json::from_slice(&response.body)
    };
    decoded.map_err(|e| {
        RequestError::http(response.status, format!("failed to decode response: {e}"))
    })
}
