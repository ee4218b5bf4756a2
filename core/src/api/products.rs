//! Read-only product catalog.

use crate::api::with_query;
use crate::error::Result;
use crate::executor::{RequestExecutor, RequestOptions};
use crate::types::Product;

pub struct ProductsApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> ProductsApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn get_all(&self, category: Option<&str>) -> Result<Vec<Product>> {
        let path = with_query("/products", "category", category);
        self.executor.execute(&path, RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product> {
        self.executor
            .execute(&format!("/products/{id}"), RequestOptions::get())
            .await
    }
}
