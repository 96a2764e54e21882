//! Backend API access.
//!
//! [`AltarBackend`] is the seam between page logic and transport; the
//! production implementation is [`client::BackendClient`].

pub mod client;

use altar_core::{IdentityContext, Session, ShareInfo};
use async_trait::async_trait;

use crate::types::{AuthResponse, RegisterResponse, Result};

pub use client::BackendClient;

/// Operations the client performs against the Altar backend.
#[async_trait]
pub trait AltarBackend: Send + Sync {
    /// `GET /session/{id}`.
    async fn fetch_session(&self, id: &str, identity: &IdentityContext) -> Result<Session>;

    /// `GET /shared/session/{id}`; HTTP 403 maps to `ClientError::AccessDenied`.
    async fn fetch_share_info(&self, id: &str, identity: &IdentityContext) -> Result<ShareInfo>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<RegisterResponse>;

    async fn verify(&self, email: &str, code: &str) -> Result<AuthResponse>;
}
