//! Read-only recommendations derived from analyses.

use crate::error::Result;
use crate::executor::{RequestExecutor, RequestOptions};
use crate::types::Recommendation;

pub struct RecommendationsApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> RecommendationsApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn for_analysis(&self, analysis_id: i64) -> Result<Vec<Recommendation>> {
        self.executor
            .execute(
                &format!("/recommendations/analysis/{analysis_id}"),
                RequestOptions::get(),
            )
            .await
    }

    pub async fn latest(&self) -> Result<Vec<Recommendation>> {
        self.executor
            .execute("/recommendations/latest", RequestOptions::get())
            .await
    }
}
