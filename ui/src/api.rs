//! API client for communicating with the altar backend

use std::fmt;

use altar_core::{
    settle, AccessResolver, IdentityContext, LoadFailure, PageView, Session, ShareInfo,
    ShareLookup,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::*;

/// Why a request failed
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    Network(String),
    Forbidden,
    Status(u16, String),
    Decode(String),
}

impl ApiFailure {
    pub fn into_load_failure(self) -> LoadFailure {
        match self {
            ApiFailure::Network(e) => LoadFailure::Network(e),
            ApiFailure::Forbidden => LoadFailure::Status(403),
            ApiFailure::Status(code, _) => LoadFailure::Status(code),
            ApiFailure::Decode(e) => LoadFailure::Decode(e),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Network(e) => write!(f, "Network error: {}", e),
            ApiFailure::Forbidden => write!(f, "Permission denied"),
            ApiFailure::Status(_, message) => write!(f, "{}", message),
            ApiFailure::Decode(e) => write!(f, "Failed to parse response: {}", e),
        }
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiFailure> {
    if !resp.ok() {
        let status = resp.status();
        if status == 403 {
            return Err(ApiFailure::Forbidden);
        }
        if let Ok(err) = resp.json::<ApiError>().await {
            return Err(ApiFailure::Status(status, err.error));
        }
        return Err(ApiFailure::Status(
            status,
            format!("Request failed with status {}", status),
        ));
    }

    resp.json::<T>()
        .await
        .map_err(|e| ApiFailure::Decode(e.to_string()))
}

/// Make authenticated API requests
pub async fn fetch_with_auth<T: DeserializeOwned>(
    url: &str,
    identity: &IdentityContext,
) -> Result<T, ApiFailure> {
    let req = match identity.bearer() {
        Some(bearer) => Request::get(url).header("Authorization", &bearer),
        None => Request::get(url),
    };

    let resp = req
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    read_json(resp).await
}

/// POST a JSON body without authentication
pub async fn post_json<T, R>(url: &str, body: &T) -> Result<R, ApiFailure>
where
    T: Serialize,
    R: DeserializeOwned,
{
    let req = Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| ApiFailure::Decode(format!("Failed to serialize request: {}", e)))?;

    let resp = req
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    read_json(resp).await
}

/// Fetch a session and its wall
pub async fn fetch_session(
    base_url: &str,
    id: &str,
    identity: &IdentityContext,
) -> Result<Session, ApiFailure> {
    let url = format!("{}/session/{}", base_url, id);
    let value: serde_json::Value = fetch_with_auth(&url, identity).await?;
    Session::from_value(value).map_err(|e| ApiFailure::Decode(e.to_string()))
}

/// Fetch sharing metadata; 403 comes back as [`ApiFailure::Forbidden`]
pub async fn fetch_share_info(
    base_url: &str,
    id: &str,
    identity: &IdentityContext,
) -> Result<ShareInfo, ApiFailure> {
    let url = format!("{}/shared/session/{}", base_url, id);
    fetch_with_auth(&url, identity).await
}

/// Load both halves of a session page concurrently and resolve access
pub async fn load_page(
    base_url: &str,
    id: &str,
    identity: &IdentityContext,
    resolver: &AccessResolver,
) -> PageView {
    let (session, share) = futures::join!(
        fetch_session(base_url, id, identity),
        fetch_share_info(base_url, id, identity),
    );

    let share = match share {
        Ok(info) => ShareLookup::Found(info),
        Err(ApiFailure::Forbidden) => ShareLookup::Denied,
        Err(e) => ShareLookup::Unavailable(e.to_string()),
    };

    settle(
        session.map_err(ApiFailure::into_load_failure),
        share,
        identity,
        resolver,
    )
}

/// Login to the API
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<AuthResponse, ApiFailure> {
    let url = format!("{}/auth/login", base_url);
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    post_json(&url, &body).await
}

/// Register a new user
pub async fn register(
    base_url: &str,
    email: &str,
    password: &str,
    name: &str,
) -> Result<RegisterResponse, ApiFailure> {
    let url = format!("{}/auth/register", base_url);
    let body = RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    };
    post_json(&url, &body).await
}

/// Confirm an email address with the mailed code
pub async fn verify(base_url: &str, email: &str, code: &str) -> Result<AuthResponse, ApiFailure> {
    let url = format!("{}/auth/verify", base_url);
    let body = VerifyRequest {
        email: email.to_string(),
        code: code.to_string(),
    };
    post_json(&url, &body).await
}
