//! The signed-in user's profile.

use crate::error::Result;
use crate::executor::{RequestExecutor, RequestOptions};
use crate::types::{User, UserUpdate};

pub struct UsersApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> UsersApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn me(&self) -> Result<User> {
        self.executor.execute("/users/me", RequestOptions::get()).await
    }

    /// Send only the fields set in `update`; the server merges them.
    pub async fn update_me(&self, update: &UserUpdate) -> Result<User> {
        self.executor
            .execute("/users/me", RequestOptions::put_json(update)?)
            .await
    }
}
