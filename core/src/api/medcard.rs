//! Medical documents ("medcard"): uploaded files with descriptive metadata.

use crate::api::with_query;
use crate::error::Result;
use crate::executor::{RequestExecutor, RequestOptions};
use crate::http::MultipartBody;
use crate::types::{DocumentCategory, DocumentUpload, MedicalDocument, MedicalDocumentUpdate};

pub struct MedcardApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> MedcardApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get_all(&self, category: Option<DocumentCategory>) -> Result<Vec<MedicalDocument>> {
        let path = with_query("/medcard", "category", category.as_ref().map(DocumentCategory::as_str));
        self.executor.execute(&path, RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<MedicalDocument> {
        self.executor
            .execute(&format!("/medcard/{id}"), RequestOptions::get())
            .await
    }

    pub async fn upload(&self, upload: DocumentUpload) -> Result<MedicalDocument> {
        let body = MultipartBody::new(upload.file)
            .text("title", upload.title)
            .text("category", upload.category.as_str())
            .optional_text("description", upload.description)
            .optional_text("document_date", upload.document_date);
        self.executor.execute_multipart("/medcard/upload", body).await
    }

    pub async fn update(&self, id: i64, update: &MedicalDocumentUpdate) -> Result<MedicalDocument> {
        self.executor
            .execute(&format!("/medcard/{id}"), RequestOptions::put_json(update)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.executor
            .execute_discard(&format!("/medcard/{id}"), RequestOptions::delete())
            .await
    }

    /// Link target for the document's file. No request is made, and the
    /// link carries no credential.
    pub fn download_url(&self, id: i64) -> String {
        self.executor.config().url(&format!("/medcard/{id}/download"))
    }

    /// Fetch the document's file with the stored credential attached.
    pub async fn download(&self, id: i64) -> Result<Vec<u8>> {
        self.executor
            .fetch_bytes(&format!("/medcard/{id}/download"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{FilePart, HttpMethod, RequestBody};
    use crate::testing;
    use crate::types::{DocumentCategory, DocumentUpload, MedicalDocumentUpdate};

    const DOC: &str = r#"{"id":42,"user_id":7,"title":"Cardiologist","description":null,"category":"consultation",
        "file_name":"ecg.pdf","file_type":"application/pdf","file_size":1024,"document_date":"2024-02-10","created_at":"2024-02-11T08:00:00"}"#;

    #[test]
    fn download_url_is_pure() {
        let (client, transport, _) = testing::client();
        assert_eq!(
            client.medcard().download_url(42),
            "http://localhost:8000/medcard/42/download"
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn get_all_filters_by_category() {
        let (client, transport, _) = testing::authed_client("T1");
        transport.respond(200, &format!("[{DOC}]")).respond(200, "[]");

        let docs = client.medcard().get_all(Some(DocumentCategory::Consultation)).await.unwrap();
        assert_eq!(docs[0].category, DocumentCategory::Consultation);
        assert_eq!(
            transport.last_request().url,
            "http://localhost:8000/medcard?category=consultation"
        );

        client.medcard().get_all(None).await.unwrap();
        assert_eq!(transport.last_request().url, "http://localhost:8000/medcard");
    }

    #[tokio::test]
    async fn upload_sends_required_and_optional_fields() {
        let (client, transport, _) = testing::authed_client("T1");
        transport.respond(200, DOC);
        let upload = DocumentUpload::new(
            FilePart::from_bytes("ecg.pdf", vec![1, 2, 3]),
            "Cardiologist",
            DocumentCategory::Consultation,
        )
        .document_date("2024-02-10");
        let doc = client.medcard().upload(upload).await.unwrap();
        assert_eq!(doc.id, 42);

        let sent = transport.last_request();
        assert_eq!(sent.url, "http://localhost:8000/medcard/upload");
        let RequestBody::Multipart(body) = sent.body else {
            panic!("expected a multipart body");
        };
        assert_eq!(body.field("title"), Some("Cardiologist"));
        assert_eq!(body.field("category"), Some("consultation"));
        assert_eq!(body.field("document_date"), Some("2024-02-10"));
        assert_eq!(body.field("description"), None);
    }

    #[tokio::test]
    async fn update_is_partial_put() {
        let (client, transport, _) = testing::authed_client("T1");
        transport.respond(200, DOC);
        let update = MedicalDocumentUpdate {
            description: Some("Follow-up in 6 months".to_string()),
            ..Default::default()
        };
        client.medcard().update(42, &update).await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url, "http://localhost:8000/medcard/42");
        assert_eq!(
            sent.body,
            RequestBody::Json(r#"{"description":"Follow-up in 6 months"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn delete_and_download() {
        let (client, transport, _) = testing::authed_client("T1");
        transport.respond(204, "").respond(200, "%PDF");

        client.medcard().delete(42).await.unwrap();
        assert_eq!(transport.last_request().method, HttpMethod::Delete);

        let bytes = client.medcard().download(42).await.unwrap();
        assert_eq!(bytes, b"%PDF");
        let sent = transport.last_request();
        assert_eq!(sent.url, "http://localhost:8000/medcard/42/download");
        assert_eq!(sent.header("authorization"), Some("Bearer T1"));
    }
}
