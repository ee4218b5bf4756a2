//! Scripted `Transport` for unit tests: replays queued responses and records
//! every request it was asked to send.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::MedcardClient;
use crate::config::ApiConfig;
use crate::credentials::{CredentialStore, MemoryTokenStorage};
use crate::error::RequestError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub const BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, RequestError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(RequestError::transport(message)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left")
    }
}

/// Client wired to a scripted transport and an observable memory storage.
pub fn client() -> (MedcardClient, ScriptedTransport, MemoryTokenStorage) {
    let transport = ScriptedTransport::new();
    let storage = MemoryTokenStorage::new();
    let client = MedcardClient::with_transport(
        ApiConfig::new(BASE_URL),
        CredentialStore::new(storage.clone()),
        transport.clone(),
    );
    (client, transport, storage)
}

/// Same as `client()` but already holding a token.
pub fn authed_client(token: &str) -> (MedcardClient, ScriptedTransport, MemoryTokenStorage) {
    let (client, transport, storage) = client();
    client.credentials().set_token(Some(token));
    (client, transport, storage)
}
