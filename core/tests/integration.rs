//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the real
//! `MedcardClient` (reqwest transport, file-backed credential store) over
//! HTTP. This validates request encoding (form login, JSON, multipart, query
//! strings) and response decoding against an actual server.

use medcard_client::{
    AnalysisStatus, AnalysisUpload, ApiConfig, CredentialStore, DocumentCategory, DocumentUpload,
    FilePart, FileTokenStorage, MedcardClient, MedicalDocumentUpdate, RecommendationType,
    ReminderCreate, ReminderType, ReminderUpdate, UserUpdate,
};

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn connect(base_url: &str, token_path: &std::path::Path) -> MedcardClient {
    MedcardClient::with_credentials(
        ApiConfig::new(base_url),
        CredentialStore::new(FileTokenStorage::new(token_path)),
    )
}

#[tokio::test]
async fn session_lifecycle() {
    let base_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("access_token");
    let client = connect(&base_url, &token_path);

    // Step 1: unauthenticated profile read is rejected with the server message.
    let err = client.users().me().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Could not validate credentials");

    // Step 2: register does not log in.
    let user = client.auth().register("anna@example.com", "s3cret").await.unwrap();
    assert_eq!(user.email, "anna@example.com");
    assert!(!client.auth().is_authenticated());

    // Step 3: wrong password.
    let err = client.auth().login("anna@example.com", "nope").await.unwrap_err();
    assert_eq!(err.message, "Incorrect email or password");
    assert!(!client.auth().is_authenticated());

    // Step 4: login persists the token to disk.
    let token = client.auth().login("anna@example.com", "s3cret").await.unwrap();
    assert_eq!(client.credentials().token(), Some(token.access_token.clone()));
    assert_eq!(std::fs::read_to_string(&token_path).unwrap(), token.access_token);

    // Step 5: a fresh client hydrates the token from disk.
    let restored = connect(&base_url, &token_path);
    let me = restored.users().me().await.unwrap();
    assert_eq!(me.id, user.id);

    // Step 6: partial profile update.
    let update = UserUpdate {
        last_name: Some("Ivanova".to_string()),
        ..Default::default()
    };
    let updated = restored.users().update_me(&update).await.unwrap();
    assert_eq!(updated.last_name.as_deref(), Some("Ivanova"));
    assert_eq!(updated.email, "anna@example.com");

    // Step 7: logout is local and removes the file.
    restored.auth().logout();
    assert!(!token_path.exists());
    assert!(restored.users().me().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn analyses_and_recommendations() {
    let base_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let client = connect(&base_url, &dir.path().join("access_token"));
    client.auth().register("a@b.com", "pw").await.unwrap();
    client.auth().login("a@b.com", "pw").await.unwrap();

    assert!(client.analyses().get_all().await.unwrap().is_empty());

    let upload = AnalysisUpload::new(FilePart::from_bytes("blood.pdf", b"%PDF-1.7 data".to_vec()))
        .title("Blood test")
        .lab_name("Invitro");
    let analysis = client.analyses().upload(upload).await.unwrap();
    assert_eq!(analysis.title, "Blood test");
    assert_eq!(analysis.lab_name.as_deref(), Some("Invitro"));
    assert_eq!(analysis.status, AnalysisStatus::Pending);
    assert!(!analysis.is_processed());

    let fetched = client.analyses().get_by_id(analysis.id).await.unwrap();
    assert_eq!(fetched, analysis);

    let recs = client.recommendations().for_analysis(analysis.id).await.unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].recommendation_type, RecommendationType::Ai);
    assert!(recs[0].products.as_ref().is_some_and(|p| !p.is_empty()));
    assert_eq!(client.recommendations().latest().await.unwrap(), recs);

    client.analyses().delete(analysis.id).await.unwrap();
    let err = client.analyses().get_by_id(analysis.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message, "Analysis not found");
}

#[tokio::test]
async fn medical_documents() {
    let base_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let client = connect(&base_url, &dir.path().join("access_token"));
    client.auth().register("a@b.com", "pw").await.unwrap();
    client.auth().login("a@b.com", "pw").await.unwrap();

    let file_path = dir.path().join("ecg.pdf");
    std::fs::write(&file_path, b"ECG-DATA").unwrap();
    let file = FilePart::from_path(&file_path).await.unwrap();
    let upload = DocumentUpload::new(file, "Cardiologist", DocumentCategory::Consultation)
        .description("Annual visit")
        .document_date("2024-02-10");
    let doc = client.medcard().upload(upload).await.unwrap();
    assert_eq!(doc.file_name, "ecg.pdf");
    assert_eq!(doc.file_type, "application/pdf");
    assert_eq!(doc.file_size, 8);
    assert_eq!(doc.category, DocumentCategory::Consultation);

    let filtered = client
        .medcard()
        .get_all(Some(DocumentCategory::Consultation))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert!(client
        .medcard()
        .get_all(Some(DocumentCategory::Examination))
        .await
        .unwrap()
        .is_empty());

    let update = MedicalDocumentUpdate {
        title: Some("Cardiologist, follow-up".to_string()),
        ..Default::default()
    };
    let updated = client.medcard().update(doc.id, &update).await.unwrap();
    assert_eq!(updated.title, "Cardiologist, follow-up");
    assert_eq!(updated.description.as_deref(), Some("Annual visit"));

    assert_eq!(
        client.medcard().download_url(doc.id),
        format!("{base_url}/medcard/{}/download", doc.id)
    );
    assert_eq!(client.medcard().download(doc.id).await.unwrap(), b"ECG-DATA");

    client.medcard().delete(doc.id).await.unwrap();
    assert!(client.medcard().get_by_id(doc.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn document_upload_validation_error_is_readable() {
    let base_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let client = connect(&base_url, &dir.path().join("access_token"));
    client.auth().register("a@b.com", "pw").await.unwrap();
    client.auth().login("a@b.com", "pw").await.unwrap();

    // `DocumentUpload` only carries known categories; go through the executor.
    let body = medcard_client::MultipartBody::new(FilePart::from_bytes("x.pdf", vec![1]))
        .text("title", "X")
        .text("category", "xray");
    let err = client
        .executor()
        .execute_multipart::<serde_json::Value>("/medcard/upload", body)
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(422));
    assert_eq!(err.message, "Unknown category: xray");
}

#[tokio::test]
async fn reminders() {
    let base_url = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let client = connect(&base_url, &dir.path().join("access_token"));
    client.auth().register("a@b.com", "pw").await.unwrap();
    client.auth().login("a@b.com", "pw").await.unwrap();

    let create = ReminderCreate {
        title: "Vitamin D".to_string(),
        description: Some("2000 IU".to_string()),
        reminder_date: "2024-05-01T09:00:00".to_string(),
        reminder_type: ReminderType::Medication,
    };
    let reminder = client.calendar().create(&create).await.unwrap();
    assert!(!reminder.is_completed);

    let update = ReminderUpdate {
        reminder_type: Some(ReminderType::Checkup),
        ..Default::default()
    };
    let updated = client.calendar().update(reminder.id, &update).await.unwrap();
    assert_eq!(updated.reminder_type, ReminderType::Checkup);
    assert_eq!(updated.description.as_deref(), Some("2000 IU"));
    assert!(!updated.is_completed);

    let completed = client.calendar().mark_completed(reminder.id).await.unwrap();
    assert!(completed.is_completed);

    let all = client.calendar().get_all().await.unwrap();
    assert_eq!(all, vec![completed]);

    client.calendar().delete(reminder.id).await.unwrap();
    assert!(client.calendar().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn product_catalog_without_login() {
    let base_url = spawn_server().await;
    let client = MedcardClient::with_credentials(ApiConfig::new(&base_url), CredentialStore::in_memory());

    let all = client.products().get_all(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let vitamins = client.products().get_all(Some("vitamins")).await.unwrap();
    assert_eq!(vitamins.len(), 1);

    let product = client.products().get_by_id(vitamins[0].id).await.unwrap();
    assert_eq!(product, vitamins[0]);

    let err = client.products().get_by_id(999).await.unwrap_err();
    assert_eq!(err.message, "Product not found");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MedcardClient::with_credentials(
        ApiConfig::new(&format!("http://{addr}")),
        CredentialStore::in_memory(),
    );
    let err = client.analyses().get_all().await.unwrap_err();
    assert!(err.status.is_none());
}
