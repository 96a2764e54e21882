//! Settling a page load.
//!
//! A session page issues two independent fetches, the session and its share
//! info. Once both have settled the outcome is folded into a [`PageView`]:
//! the session to render, the `editable` flag and any user-facing errors.

use std::fmt;

use crate::access::{AccessDecision, AccessResolver, IdentityContext};
use crate::model::{Session, ShareInfo};

/// Why the session fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The request never produced a response.
    Network(String),
    /// The backend answered with a non-success status.
    Status(u16),
    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::Network(e) => write!(f, "network error: {}", e),
            LoadFailure::Status(code) => write!(f, "request failed with status {}", code),
            LoadFailure::Decode(e) => write!(f, "failed to parse response: {}", e),
        }
    }
}

/// Outcome of the share-info fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareLookup {
    Found(ShareInfo),
    /// HTTP 403: the viewer may not see this session's sharing.
    Denied,
    /// Anything else (not shared, 404, network or decode failure).
    Unavailable(String),
}

impl ShareLookup {
    pub fn is_denied(&self) -> bool {
        matches!(self, ShareLookup::Denied)
    }

    pub fn share_info(&self) -> Option<&ShareInfo> {
        match self {
            ShareLookup::Found(info) => Some(info),
            _ => None,
        }
    }
}

/// User-visible error states of a session page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    LoadFailed(LoadFailure),
    PermissionDenied,
}

impl PageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PageError::LoadFailed(_) => "Failed to load session.",
            PageError::PermissionDenied => "You do not have permission to access this session.",
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

/// Everything a session page needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub session: Option<Session>,
    pub share: ShareLookup,
    pub decision: AccessDecision,
    /// Permission errors first, then load errors.
    pub errors: Vec<PageError>,
}

impl PageView {
    pub fn editable(&self) -> bool {
        self.decision.editable
    }

    pub fn is_denied(&self) -> bool {
        self.errors.contains(&PageError::PermissionDenied)
    }
}

/// Fold both fetch outcomes into a page view.
///
/// A 403 on the share lookup forces `editable = false` and reports
/// [`PageError::PermissionDenied`] whether or not the session loaded. Without
/// a session nothing is editable.
pub fn settle(
    session: Result<Session, LoadFailure>,
    share: ShareLookup,
    identity: &IdentityContext,
    resolver: &AccessResolver,
) -> PageView {
    let mut errors = Vec::new();
    if share.is_denied() {
        errors.push(PageError::PermissionDenied);
    }
    if let ShareLookup::Unavailable(reason) = &share {
        tracing::warn!("Share info unavailable, falling back to owner check: {}", reason);
    }

    let (session, decision) = match session {
        Ok(session) => {
            let decision = resolver.decide(
                share.share_info(),
                &session,
                identity.email(),
                share.is_denied(),
            );
            tracing::debug!(
                session = session.id.as_deref().unwrap_or("?"),
                editable = decision.editable,
                reason = ?decision.reason,
                "Resolved session access"
            );
            (Some(session), decision)
        }
        Err(failure) => {
            tracing::error!("Failed to load session: {}", failure);
            errors.push(PageError::LoadFailed(failure));
            let decision = if share.is_denied() {
                AccessDecision::denied()
            } else {
                resolver.decide(None, &Session::default(), None, false)
            };
            (None, decision)
        }
    };

    PageView {
        session,
        share,
        decision,
        errors,
    }
}
