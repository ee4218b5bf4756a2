//! Lab analyses: uploaded result files that the service parses into
//! biomarkers.

use crate::error::Result;
use crate::executor::{RequestExecutor, RequestOptions};
use crate::http::MultipartBody;
use crate::types::{Analysis, AnalysisUpload};

pub struct AnalysesApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> AnalysesApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get_all(&self) -> Result<Vec<Analysis>> {
        self.executor.execute("/analyses", RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Analysis> {
        self.executor
            .execute(&format!("/analyses/{id}"), RequestOptions::get())
            .await
    }

    /// Upload a result file. The returned record is the server's, which may
    /// normalize the title or derive one when none was given.
    pub async fn upload(&self, upload: AnalysisUpload) -> Result<Analysis> {
        let body = MultipartBody::new(upload.file)
            .optional_text("title", upload.title)
            .optional_text("lab_name", upload.lab_name);
        self.executor.execute_multipart("/analyses/upload", body).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.executor
            .execute_discard(&format!("/analyses/{id}"), RequestOptions::delete())
            .await
    }
}
