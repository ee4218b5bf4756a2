//! Root facade over the medcard API.
//!
//! # Design
//! `MedcardClient` owns the `RequestExecutor` (and through it the credential
//! store and transport) and hands out borrowed, stateless resource clients.
//! Wrap it in an `Arc` to share between tasks; calls issued concurrently are
//! independent and unordered. A `login` racing a `logout` on the same client
//! leaves the credential in whichever state was written last.

use std::sync::Arc;

use crate::api::{
    AnalysesApi, AuthApi, CalendarApi, MedcardApi, ProductsApi, RecommendationsApi, UsersApi,
};
use crate::config::ApiConfig;
use crate::credentials::CredentialStore;
use crate::executor::RequestExecutor;
use crate::transport::{ReqwestTransport, Transport};

#[derive(Debug)]
pub struct MedcardClient {
    executor: RequestExecutor,
}

impl MedcardClient {
    /// Client over HTTP with the token persisted in the user's data directory.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_credentials(config, CredentialStore::persistent())
    }

    /// `new` with configuration read from the environment.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn with_credentials(config: ApiConfig, credentials: CredentialStore) -> Self {
        let transport = ReqwestTransport::new(&config);
        Self::with_transport(config, credentials, transport)
    }

    pub fn with_transport(
        config: ApiConfig,
        credentials: CredentialStore,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            executor: RequestExecutor::new(config, Arc::new(credentials), Arc::new(transport)),
        }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn config(&self) -> &ApiConfig {
        self.executor.config()
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.executor.credentials()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.executor)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.executor)
    }

    pub fn analyses(&self) -> AnalysesApi<'_> {
        AnalysesApi::new(&self.executor)
    }

    pub fn medcard(&self) -> MedcardApi<'_> {
        MedcardApi::new(&self.executor)
    }

    pub fn calendar(&self) -> CalendarApi<'_> {
        CalendarApi::new(&self.executor)
    }

    pub fn recommendations(&self) -> RecommendationsApi<'_> {
        RecommendationsApi::new(&self.executor)
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(&self.executor)
    }
}
