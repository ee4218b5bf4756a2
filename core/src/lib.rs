//! Typed async client for the medcard medical-records service.
//!
//! # Overview
//! Authenticates a user, persists the bearer token, and exposes the
//! service's resources (analyses, medical documents, reminders,
//! recommendations, products) as typed async operations.
//!
//! # Design
//! - `CredentialStore` holds the token in memory and mirrors it to a
//!   `TokenStorage` backend; it hydrates lazily on first read.
//! - `RequestExecutor` builds every request as plain data (`HttpRequest`),
//!   injects the credential, hands it to a `Transport`, and normalizes any
//!   failure into `RequestError`.
//! - Resource clients under `api` are thin, borrowed facades over the
//!   executor; `MedcardClient` is the entry point that hands them out.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod executor;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::MedcardClient;
pub use config::ApiConfig;
pub use credentials::{CredentialStore, FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use error::{RequestError, Result};
pub use executor::{RequestExecutor, RequestOptions};
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, MultipartBody, RequestBody};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Analysis, AnalysisStatus, AnalysisUpload, AuthToken, Biomarker, BiomarkerStatus,
    DocumentCategory, DocumentUpload, MedicalDocument, MedicalDocumentUpdate, Product,
    Recommendation, RecommendationType, RegisterRequest, Reminder, ReminderCreate, ReminderType,
    ReminderUpdate, User, UserUpdate,
};
