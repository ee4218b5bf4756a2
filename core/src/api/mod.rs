//! Resource clients: one thin facade per family of endpoints.
//!
//! Each facade borrows the client's `RequestExecutor` and maps typed
//! arguments onto a path and `RequestOptions`. None of them hold state or add
//! error handling of their own; every failure is the executor's
//! `RequestError`.

pub mod analyses;
pub mod auth;
pub mod calendar;
pub mod medcard;
pub mod products;
pub mod recommendations;
pub mod users;

pub use analyses::AnalysesApi;
pub use auth::AuthApi;
pub use calendar::CalendarApi;
pub use medcard::MedcardApi;
pub use products::ProductsApi;
pub use recommendations::RecommendationsApi;
pub use users::UsersApi;

/// Append `?name=value` with the value percent-encoded, or nothing.
pub(crate) fn with_query(path: &str, name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{path}?{name}={}", urlencoding::encode(value)),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_encoded() {
        assert_eq!(with_query("/products", "category", None), "/products");
        assert_eq!(
            with_query("/products", "category", Some("vitamins & minerals")),
            "/products?category=vitamins%20%26%20minerals"
        );
    }
}
