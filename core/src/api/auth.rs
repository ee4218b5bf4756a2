//! Login, registration and logout.
//!
//! Login is the only operation that writes the credential store, and logout
//! the only one that clears it. Logout is local: the service keeps no session
//! to invalidate.

use serde::Deserialize;

use crate::error::{RequestError, Result};
use crate::executor::{RequestExecutor, RequestOptions};
use crate::types::{AuthToken, RegisterRequest, User};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

pub struct AuthApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> AuthApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    /// Exchange credentials for a bearer token and store it.
    ///
    /// The credentials go out form-encoded as `username`/`password`. A
    /// response without an access token is an error and leaves the stored
    /// credential untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let form = vec![
            ("username".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let response: TokenResponse = self
            .executor
            .execute("/auth/login", RequestOptions::post_form(form).unauthenticated())
            .await?;

        let access_token = response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                RequestError::invalid_response("login response did not include an access token")
            })?;
        let token = AuthToken {
            access_token,
            token_type: response.token_type.unwrap_or_else(|| "bearer".to_string()),
        };

        self.executor.credentials().set_token(Some(&token.access_token));
        tracing::info!("logged in");
        Ok(token)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.executor
            .execute("/auth/register", RequestOptions::post_json(&body)?.unauthenticated())
            .await
    }

    pub fn logout(&self) {
        self.executor.credentials().clear();
        tracing::info!("logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.executor.credentials().has_token()
    }
}
