//! Shared test fixtures.
#![allow(dead_code)]

use altar::types::{AuthResponse, ClientError, RegisterResponse, Result};
use altar::{AltarBackend, IdentityContext, Session, ShareInfo};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// How the mock answers the share lookup.
#[derive(Clone)]
pub enum ShareReply {
    Info(ShareInfo),
    Forbidden,
    NotFound,
}

/// In-memory backend with canned responses.
pub struct MockBackend {
    pub session: Option<Session>,
    pub share: ShareReply,
    pub token: String,
    /// Emails passed to `login`/`verify`, in call order.
    pub calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new(session: Session, share: ShareReply) -> Self {
        Self {
            session: Some(session),
            share,
            token: "test-token".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_session(share: ShareReply) -> Self {
        Self {
            session: None,
            ..Self::new(Session::default(), share)
        }
    }
}

#[async_trait]
impl AltarBackend for MockBackend {
    async fn fetch_session(&self, _id: &str, _identity: &IdentityContext) -> Result<Session> {
        self.session
            .clone()
            .ok_or_else(|| ClientError::Network("connection refused".to_string()))
    }

    async fn fetch_share_info(&self, id: &str, _identity: &IdentityContext) -> Result<ShareInfo> {
        match &self.share {
            ShareReply::Info(info) => Ok(info.clone()),
            ShareReply::Forbidden => Err(ClientError::AccessDenied),
            ShareReply::NotFound => Err(ClientError::NotFound(format!("/shared/session/{}", id))),
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.calls.lock().unwrap().push(email.to_string());
        if password != "hunter2" {
            return Err(ClientError::Unauthenticated);
        }
        Ok(AuthResponse {
            token: self.token.clone(),
            email: Some(email.to_string()),
            name: None,
        })
    }

    async fn register(&self, email: &str, _password: &str, _name: &str) -> Result<RegisterResponse> {
        self.calls.lock().unwrap().push(email.to_string());
        Ok(RegisterResponse {
            token: None,
            message: Some("Check your inbox".to_string()),
        })
    }

    async fn verify(&self, email: &str, code: &str) -> Result<AuthResponse> {
        self.calls.lock().unwrap().push(email.to_string());
        if code != "123456" {
            return Err(ClientError::Status {
                status: 400,
                message: "invalid code".to_string(),
            });
        }
        Ok(AuthResponse {
            token: self.token.clone(),
            email: None,
            name: None,
        })
    }
}

/// A session owned by `owner@example.com` with three blocks.
pub fn sample_session() -> Session {
    Session::from_value(json!({
        "id": 42,
        "name": "Abuela",
        "user_id": "owner@example.com",
        "data": {
            "width": 640,
            "height": 480,
            "background": "#f5e6d3",
            "blocks": [
                { "id": "a", "src": "abc", "position": { "x": 10, "y": 20 }, "zIndex": 3 },
                { "id": "b", "src": "https://cdn.example.com/b.png", "zIndex": 1 },
                { "id": "c", "src": "data:image/png;base64,AAAA", "shape": "circle" }
            ]
        }
    }))
    .unwrap()
}
