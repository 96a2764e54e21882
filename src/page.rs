//! Session page controller.

use altar_core::{settle, AccessResolver, IdentityContext, PageView, ShareLookup};

use crate::api::AltarBackend;
use crate::types::ClientError;

/// Fetch the session and its share info concurrently, then resolve access.
pub async fn load_page<B>(
    backend: &B,
    session_id: &str,
    identity: &IdentityContext,
    resolver: &AccessResolver,
) -> PageView
where
    B: AltarBackend + ?Sized,
{
    let (session, share) = tokio::join!(
        backend.fetch_session(session_id, identity),
        backend.fetch_share_info(session_id, identity),
    );

    let share = match share {
        Ok(info) => ShareLookup::Found(info),
        Err(ClientError::AccessDenied) => ShareLookup::Denied,
        Err(e) => ShareLookup::Unavailable(e.to_string()),
    };

    settle(
        session.map_err(ClientError::into_load_failure),
        share,
        identity,
        resolver,
    )
}
