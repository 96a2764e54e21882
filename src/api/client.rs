//! HTTP client for the Altar backend.

use altar_core::{IdentityContext, Session, ShareInfo};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::AltarBackend;
use crate::types::{
    ApiError, AuthResponse, ClientError, LoginRequest, RegisterRequest, RegisterResponse, Result,
    VerifyRequest,
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const VERIFY_PATH: &str = "/auth/verify";

/// `reqwest`-backed [`AltarBackend`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(req: RequestBuilder, identity: &IdentityContext) -> RequestBuilder {
        match identity.bearer() {
            Some(bearer) => req.header(reqwest::header::AUTHORIZATION, bearer),
            None => req,
        }
    }

    /// GET a JSON body, optionally with the viewer's bearer token.
    async fn fetch_with_auth<T: DeserializeOwned>(
        &self,
        path: &str,
        identity: &IdentityContext,
    ) -> Result<T> {
        let req = Self::authorize(self.http.get(self.url(path)), identity);
        let resp = req.send().await?;
        Self::decode(path, resp).await
    }

    /// POST a JSON body without authentication.
    async fn post_json<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(path, resp).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            return serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()));
        }

        match status {
            StatusCode::FORBIDDEN => Err(ClientError::AccessDenied),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(path.to_string())),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthenticated),
            _ => {
                let message = match resp.json::<ApiError>().await {
                    Ok(err) => err.error,
                    Err(_) => status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string(),
                };
                Err(ClientError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl AltarBackend for BackendClient {
    async fn fetch_session(&self, id: &str, identity: &IdentityContext) -> Result<Session> {
        tracing::debug!(session = id, "Fetching session");
        let value: serde_json::Value = self
            .fetch_with_auth(&format!("/session/{}", id), identity)
            .await?;
        Ok(Session::from_value(value)?)
    }

    async fn fetch_share_info(&self, id: &str, identity: &IdentityContext) -> Result<ShareInfo> {
        tracing::debug!(session = id, "Fetching share info");
        self.fetch_with_auth(&format!("/shared/session/{}", id), identity)
            .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json(LOGIN_PATH, &body).await
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<RegisterResponse> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        self.post_json(REGISTER_PATH, &body).await
    }

    async fn verify(&self, email: &str, code: &str) -> Result<AuthResponse> {
        let body = VerifyRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.post_json(VERIFY_PATH, &body).await
    }
}
