//! Authenticated JSON transport for the memo API.
//!
//! Every request carries the session's id token in the `Authorization`
//! header, sourced from a [`TokenProvider`] so the auth session itself stays
//! an external collaborator. A 401 response triggers the provider's forced
//! sign-out hook before the error is returned; other non-2xx statuses map to
//! [`ClientError::Api`] with the status and any response body attached.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::ClientError;

/// Source of the bearer token for API calls.
///
/// Implementations wrap whatever auth session exists outside this crate
/// (a Cognito session in the browser, an env var in the CLI, a fixture in
/// tests).
pub trait TokenProvider: Send + Sync {
    /// The current session's id token, or `None` when signed out.
    fn id_token(&self) -> Option<String>;

    /// Called when the server rejects the token (401); the session should
    /// sign out locally. Default: nothing.
    fn forced_sign_out(&self) {}
}

/// A fixed token, for the CLI and tests.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn id_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// JSON transport bound to one API base URL and one token provider.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, http: reqwest::Client::new(), tokens }
    }

    /// The base URL requests are issued against, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue an authenticated JSON request.
    ///
    /// Returns `Ok(None)` for a 204 response, `Ok(Some(body))` otherwise.
    ///
    /// # Errors
    ///
    /// [`ClientError::Authentication`] when no token is available,
    /// [`ClientError::Api`] for a non-2xx response (after invoking forced
    /// sign-out on 401), [`ClientError::Http`] when the request never
    /// completes.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ClientError> {
        let token = self.tokens.id_token().ok_or(ClientError::Authentication)?;
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, url).header(AUTHORIZATION, token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.forced_sign_out();
            }
            let body = response.json::<Value>().await.ok();
            return Err(ClientError::Api { status: status.as_u16(), body });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }
}
