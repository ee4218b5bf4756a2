//! In-memory stand-in for the medcard service.
//!
//! Implements the same wire contract the client speaks: form-encoded login
//! issuing opaque bearer tokens, `{"detail": ...}` error bodies, 204 on
//! delete, and multipart uploads. State lives in a single `RwLock`ed store
//! and is lost when the router is dropped.
//!
//! # Design
//! The file reads top to bottom: wire records, the `Store`, error bodies and
//! request guards (bearer lookup, multipart parsing), then handlers grouped by
//! resource, and finally `app`/`run`. Handlers scope every record to the
//! authenticated user, so another user's id answers 404.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DOCUMENT_CATEGORIES: [&str; 4] = ["analysis", "consultation", "examination", "other"];
pub const REMINDER_TYPES: [&str; 4] = ["analysis", "checkup", "medication", "other"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Biomarker {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub lab_name: Option<String>,
    pub date: Option<String>,
    pub status: String,
    pub created_at: String,
    pub biomarkers: Option<Vec<Biomarker>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MedicalDocument {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub document_date: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub reminder_date: String,
    #[serde(rename = "type")]
    pub reminder_type: String,
    pub is_completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub analysis_id: i64,
    #[serde(rename = "type")]
    pub recommendation_type: String,
    pub content: String,
    pub products: Option<Vec<Product>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: serde_json::Value,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub document_date: Option<String>,
}

#[derive(Deserialize)]
pub struct ReminderCreate {
    pub title: String,
    pub description: Option<String>,
    pub reminder_date: String,
    #[serde(rename = "type")]
    pub reminder_type: String,
}

#[derive(Deserialize)]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_date: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<String>,
    /// Never applied; completion only changes through `/complete`.
    pub is_completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

struct Account {
    user: User,
    password: String,
}

struct StoredDocument {
    meta: MedicalDocument,
    content: Vec<u8>,
}

#[derive(Default)]
pub struct Store {
    accounts: Vec<Account>,
    tokens: HashMap<String, i64>,
    analyses: BTreeMap<i64, Analysis>,
    documents: BTreeMap<i64, StoredDocument>,
    reminders: BTreeMap<i64, Reminder>,
    recommendations: Vec<Recommendation>,
    products: Vec<Product>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn with_catalog() -> Self {
        let mut store = Store::default();
        let catalog = [
            ("Iron bisglycinate", "Gentle iron supplement", 890.0, "supplements"),
            ("Vitamin D3 2000 IU", "Daily vitamin D", 650.0, "vitamins"),
            ("Blood pressure monitor", "Automatic upper-arm tonometer", 4200.0, "devices"),
        ];
        for (name, description, price, category) in catalog {
            let id = store.next_id();
            store.products.push(Product {
                id,
                name: name.to_string(),
                description: Some(description.to_string()),
                price: Some(price),
                image_url: Some(format!("/static/products/{id}.png")),
                category: Some(category.to_string()),
            });
        }
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Detail>);
type ApiResult<T> = Result<T, ApiError>;

fn error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(Detail {
            detail: serde_json::Value::String(message.to_string()),
        }),
    )
}

/// Validation failure in the list-of-errors shape.
fn missing_field(field: &str) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(Detail {
            detail: serde_json::json!([{
                "loc": ["body", field],
                "msg": format!("field required: {field}"),
                "type": "value_error.missing",
            }]),
        }),
    )
}

fn not_found(what: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

fn now() -> String {
    chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Resolve the bearer token in `headers` to a user id.
fn authenticate(store: &Store, headers: &HeaderMap) -> ApiResult<i64> {
    let unauthorized = || error(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(unauthorized)?;
    store.tokens.get(token).copied().ok_or_else(unauthorized)
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_catalog()));
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users/me", get(me).put(update_me))
        .route("/analyses", get(list_analyses))
        .route("/analyses/upload", post(upload_analysis))
        .route("/analyses/{id}", get(get_analysis).delete(delete_analysis))
        .route("/medcard", get(list_documents))
        .route("/medcard/upload", post(upload_document))
        .route(
            "/medcard/{id}",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/medcard/{id}/download", get(download_document))
        .route("/calendar/reminders", get(list_reminders).post(create_reminder))
        .route(
            "/calendar/reminders/{id}",
            put(update_reminder).delete(delete_reminder),
        )
        .route("/calendar/reminders/{id}/complete", post(complete_reminder))
        .route("/recommendations/analysis/{id}", get(analysis_recommendations))
        .route("/recommendations/latest", get(latest_recommendations))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let mut store = db.write().await;
    if store.accounts.iter().any(|a| a.user.email == input.email) {
        return Err(error(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let user = User {
        id: store.next_id(),
        email: input.email,
        first_name: None,
        last_name: None,
        is_active: true,
        is_verified: false,
        created_at: now(),
    };
    store.accounts.push(Account {
        user: user.clone(),
        password: input.password,
    });
    tracing::info!(user_id = user.id, "registered");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(State(db): State<Db>, Form(input): Form<LoginForm>) -> ApiResult<Json<Token>> {
    let mut store = db.write().await;
    let user_id = store
        .accounts
        .iter()
        .find(|a| a.user.email == input.username && a.password == input.password)
        .map(|a| a.user.id)
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Incorrect email or password"))?;
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(token.clone(), user_id);
    tracing::info!(user_id, "issued token");
    Ok(Json(Token {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

async fn me(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<User>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    store
        .accounts
        .iter()
        .find(|a| a.user.id == user_id)
        .map(|a| Json(a.user.clone()))
        .ok_or_else(|| not_found("User"))
}

async fn update_me(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    let account = store
        .accounts
        .iter_mut()
        .find(|a| a.user.id == user_id)
        .ok_or_else(|| not_found("User"))?;
    if let Some(email) = input.email {
        account.user.email = email;
    }
    if let Some(first_name) = input.first_name {
        account.user.first_name = Some(first_name);
    }
    if let Some(last_name) = input.last_name {
        account.user.last_name = Some(last_name);
    }
    Ok(Json(account.user.clone()))
}

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Bytes,
}

struct Upload {
    file: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut upload = Upload {
        file: None,
        fields: HashMap::new(),
    };
    let bad_request = |e: axum::extract::multipart::MultipartError| {
        error(StatusCode::BAD_REQUEST, &e.body_text())
    };
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(bad_request)?;
            upload.file = Some(UploadedFile {
                name: file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field.text().await.map_err(bad_request)?;
            upload.fields.insert(name, value);
        }
    }
    Ok(upload)
}

async fn list_analyses(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<Vec<Analysis>>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    Ok(Json(
        store
            .analyses
            .values()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect(),
    ))
}

async fn get_analysis(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<Analysis>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    store
        .analyses
        .get(&id)
        .filter(|a| a.user_id == user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Analysis"))
}

async fn upload_analysis(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<Analysis>> {
    let user_id = authenticate(&*db.read().await, &headers)?;
    let mut upload = read_upload(multipart).await?;
    let file = upload.file.ok_or_else(|| missing_field("file"))?;
    if file.bytes.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Uploaded file is empty"));
    }

    let mut store = db.write().await;
    let analysis = Analysis {
        id: store.next_id(),
        user_id,
        title: upload
            .fields
            .remove("title")
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.trim().to_string())
            .unwrap_or(file.name),
        lab_name: upload.fields.remove("lab_name"),
        date: None,
        status: "pending".to_string(),
        created_at: now(),
        biomarkers: None,
    };
    let recommendation = Recommendation {
        id: store.next_id(),
        analysis_id: analysis.id,
        recommendation_type: "ai".to_string(),
        content: format!("Discuss \"{}\" with your doctor once processing completes.", analysis.title),
        products: store.products.first().cloned().map(|p| vec![p]),
    };
    store.recommendations.push(recommendation);
    store.analyses.insert(analysis.id, analysis.clone());
    tracing::info!(user_id, analysis_id = analysis.id, "analysis uploaded");
    Ok(Json(analysis))
}

async fn delete_analysis(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    match store.analyses.get(&id) {
        Some(a) if a.user_id == user_id => {}
        _ => return Err(not_found("Analysis")),
    }
    store.analyses.remove(&id);
    store.recommendations.retain(|r| r.analysis_id != id);
    Ok(StatusCode::NO_CONTENT)
}

fn validate_category(category: &str) -> ApiResult<()> {
    if DOCUMENT_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!("Unknown category: {category}"),
        ))
    }
}

async fn list_documents(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Vec<MedicalDocument>>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    Ok(Json(
        store
            .documents
            .values()
            .rev()
            .map(|d| &d.meta)
            .filter(|d| d.user_id == user_id)
            .filter(|d| query.category.as_deref().map_or(true, |c| d.category == c))
            .cloned()
            .collect(),
    ))
}

async fn get_document(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<MedicalDocument>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    store
        .documents
        .get(&id)
        .map(|d| &d.meta)
        .filter(|d| d.user_id == user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Document"))
}

async fn upload_document(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<MedicalDocument>> {
    let user_id = authenticate(&*db.read().await, &headers)?;
    let mut upload = read_upload(multipart).await?;
    let file = upload.file.ok_or_else(|| missing_field("file"))?;
    let title = upload
        .fields
        .remove("title")
        .ok_or_else(|| missing_field("title"))?;
    let category = upload
        .fields
        .remove("category")
        .ok_or_else(|| missing_field("category"))?;
    validate_category(&category)?;

    let mut store = db.write().await;
    let meta = MedicalDocument {
        id: store.next_id(),
        user_id,
        title,
        description: upload.fields.remove("description"),
        category,
        file_name: file.name,
        file_type: file.content_type,
        file_size: file.bytes.len() as i64,
        document_date: upload.fields.remove("document_date"),
        created_at: now(),
    };
    store.documents.insert(
        meta.id,
        StoredDocument {
            meta: meta.clone(),
            content: file.bytes.to_vec(),
        },
    );
    tracing::info!(user_id, document_id = meta.id, "document uploaded");
    Ok(Json(meta))
}

async fn update_document(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<DocumentUpdate>,
) -> ApiResult<Json<MedicalDocument>> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    let doc = store
        .documents
        .get_mut(&id)
        .map(|d| &mut d.meta)
        .filter(|d| d.user_id == user_id)
        .ok_or_else(|| not_found("Document"))?;
    if let Some(title) = input.title {
        doc.title = title;
    }
    if let Some(description) = input.description {
        doc.description = Some(description);
    }
    if let Some(category) = input.category {
        doc.category = category;
    }
    if let Some(document_date) = input.document_date {
        doc.document_date = Some(document_date);
    }
    Ok(Json(doc.clone()))
}

async fn delete_document(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    match store.documents.get(&id) {
        Some(d) if d.meta.user_id == user_id => {}
        _ => return Err(not_found("Document")),
    }
    store.documents.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn download_document(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    let doc = store
        .documents
        .get(&id)
        .filter(|d| d.meta.user_id == user_id)
        .ok_or_else(|| not_found("Document"))?;
    Ok((
        [
            (header::CONTENT_TYPE, doc.meta.file_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.meta.file_name),
            ),
        ],
        doc.content.clone(),
    )
        .into_response())
}

fn validate_reminder_type(reminder_type: &str) -> ApiResult<()> {
    if REMINDER_TYPES.contains(&reminder_type) {
        Ok(())
    } else {
        Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!("Unknown reminder type: {reminder_type}"),
        ))
    }
}

async fn list_reminders(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<Vec<Reminder>>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    let mut reminders: Vec<Reminder> = store
        .reminders
        .values()
        .filter(|r| r.user_id == user_id)
        .cloned()
        .collect();
    reminders.sort_by(|a, b| a.reminder_date.cmp(&b.reminder_date));
    Ok(Json(reminders))
}

async fn create_reminder(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ReminderCreate>,
) -> ApiResult<(StatusCode, Json<Reminder>)> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    validate_reminder_type(&input.reminder_type)?;
    let reminder = Reminder {
        id: store.next_id(),
        user_id,
        title: input.title,
        description: input.description,
        reminder_date: input.reminder_date,
        reminder_type: input.reminder_type,
        is_completed: false,
    };
    store.reminders.insert(reminder.id, reminder.clone());
    Ok((StatusCode::CREATED, Json(reminder)))
}

async fn update_reminder(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<ReminderUpdate>,
) -> ApiResult<Json<Reminder>> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    if let Some(reminder_type) = &input.reminder_type {
        validate_reminder_type(reminder_type)?;
    }
    let reminder = store
        .reminders
        .get_mut(&id)
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| not_found("Reminder"))?;
    if let Some(title) = input.title {
        reminder.title = title;
    }
    if let Some(description) = input.description {
        reminder.description = Some(description);
    }
    if let Some(reminder_date) = input.reminder_date {
        reminder.reminder_date = reminder_date;
    }
    if let Some(reminder_type) = input.reminder_type {
        reminder.reminder_type = reminder_type;
    }
    if input.is_completed.is_some() {
        tracing::warn!(reminder_id = id, "ignoring is_completed on generic update");
    }
    Ok(Json(reminder.clone()))
}

async fn delete_reminder(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    match store.reminders.get(&id) {
        Some(r) if r.user_id == user_id => {}
        _ => return Err(not_found("Reminder")),
    }
    store.reminders.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn complete_reminder(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<Reminder>> {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    let reminder = store
        .reminders
        .get_mut(&id)
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| not_found("Reminder"))?;
    reminder.is_completed = true;
    Ok(Json(reminder.clone()))
}

async fn analysis_recommendations(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Recommendation>>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    if !store.analyses.get(&id).is_some_and(|a| a.user_id == user_id) {
        return Err(not_found("Analysis"));
    }
    Ok(Json(
        store
            .recommendations
            .iter()
            .filter(|r| r.analysis_id == id)
            .cloned()
            .collect(),
    ))
}

/// The five newest recommendations across the user's analyses.
async fn latest_recommendations(
    State(db): State<Db>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Recommendation>>> {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    Ok(Json(
        store
            .recommendations
            .iter()
            .rev()
            .filter(|r| {
                store
                    .analyses
                    .get(&r.analysis_id)
                    .is_some_and(|a| a.user_id == user_id)
            })
            .take(5)
            .cloned()
            .collect(),
    ))
}

async fn list_products(
    State(db): State<Db>,
    Query(query): Query<CategoryQuery>,
) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(
        store
            .products
            .iter()
            .filter(|p| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |c| p.category.as_deref() == Some(c))
            })
            .cloned()
            .collect(),
    )
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Product>> {
    let store = db.read().await;
    store
        .products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Product"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_serializes_type_field() {
        let reminder = Reminder {
            id: 1,
            user_id: 2,
            title: "Checkup".to_string(),
            description: None,
            reminder_date: "2024-06-01T09:00:00".to_string(),
            reminder_type: "checkup".to_string(),
            is_completed: false,
        };
        let json = serde_json::to_value(&reminder).unwrap();
        assert_eq!(json["type"], "checkup");
        assert!(json.get("reminder_type").is_none());
    }

    #[test]
    fn reminder_update_all_fields_optional() {
        let input: ReminderUpdate = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.reminder_type.is_none());
        assert!(input.is_completed.is_none());
    }

    #[test]
    fn catalog_is_seeded_with_sequential_ids() {
        let store = Store::with_catalog();
        let ids: Vec<i64> = store.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn authenticate_requires_known_bearer() {
        let mut store = Store::default();
        store.tokens.insert("t".to_string(), 7);

        let mut headers = HeaderMap::new();
        assert!(authenticate(&store, &headers).is_err());

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(authenticate(&store, &headers).is_err());

        headers.insert(header::AUTHORIZATION, "Bearer t".parse().unwrap());
        assert_eq!(authenticate(&store, &headers).unwrap(), 7);
    }

    #[test]
    fn missing_field_uses_validation_shape() {
        let (status, Json(body)) = missing_field("title");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.detail[0]["loc"][1], "title");
    }
}
