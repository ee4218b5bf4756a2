//! Wire records exchanged with the medcard service.
//!
//! # Design
//! Optional or nullable keys are explicit `Option` fields. Closed
//! enumerations are serde enums, so an unknown value fails decoding instead of
//! slipping through as a string. Dates and timestamps are passed through
//! verbatim; the service is the source of truth for their format.
//!
//! Update payloads skip `None` fields when serialized so that only the fields
//! the caller intends to change reach the server.

use serde::{Deserialize, Serialize};

use crate::http::FilePart;

/// Bearer credential returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// "First Last", whichever parts are present, or the email.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomarkerStatus {
    Normal,
    Low,
    High,
    Critical,
}

/// A single measured value. `status` is assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biomarker {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub reference_min: Option<f64>,
    #[serde(default)]
    pub reference_max: Option<f64>,
    pub status: BiomarkerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub lab_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub status: AnalysisStatus,
    pub created_at: String,
    /// `None` until the service has processed the upload.
    #[serde(default)]
    pub biomarkers: Option<Vec<Biomarker>>,
}

impl Analysis {
    pub fn is_processed(&self) -> bool {
        self.biomarkers.is_some()
    }

    /// Biomarkers the service flagged as outside their reference range.
    pub fn abnormal_biomarkers(&self) -> impl Iterator<Item = &Biomarker> {
        self.biomarkers
            .iter()
            .flatten()
            .filter(|b| b.status != BiomarkerStatus::Normal)
    }
}

/// Multipart payload for `POST /analyses/upload`.
#[derive(Debug, Clone)]
pub struct AnalysisUpload {
    pub file: FilePart,
    pub title: Option<String>,
    pub lab_name: Option<String>,
}

impl AnalysisUpload {
    pub fn new(file: FilePart) -> Self {
        Self {
            file,
            title: None,
            lab_name: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn lab_name(mut self, lab_name: impl Into<String>) -> Self {
        self.lab_name = Some(lab_name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Analysis,
    Consultation,
    Examination,
    Other,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Analysis => "analysis",
            DocumentCategory::Consultation => "consultation",
            DocumentCategory::Examination => "examination",
            DocumentCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalDocument {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: DocumentCategory,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    #[serde(default)]
    pub document_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicalDocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DocumentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_date: Option<String>,
}

/// Multipart payload for `POST /medcard/upload`.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file: FilePart,
    pub title: String,
    pub category: DocumentCategory,
    pub description: Option<String>,
    pub document_date: Option<String>,
}

impl DocumentUpload {
    pub fn new(file: FilePart, title: impl Into<String>, category: DocumentCategory) -> Self {
        Self {
            file,
            title: title.into(),
            category,
            description: None,
            document_date: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn document_date(mut self, date: impl Into<String>) -> Self {
        self.document_date = Some(date.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Analysis,
    Checkup,
    Medication,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub reminder_date: String,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub reminder_date: String,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
}

/// Partial reminder update. Completion is deliberately absent: it changes
/// only through `CalendarApi::mark_completed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reminder_type: Option<ReminderType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Ai,
    Doctor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub analysis_id: i64,
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub content: String,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}
