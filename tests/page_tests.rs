//! Session page controller tests over an in-memory backend.

mod common;

use altar::{
    load_page, AccessReason, AccessResolver, EmailMatch, IdentityContext, PageError, RenderMode,
    ShareInfo,
};
use common::{sample_session, MockBackend, ShareReply};
use rstest::rstest;

fn viewer(email: &str) -> IdentityContext {
    IdentityContext::new("tok", email)
}

#[rstest]
#[case::public_anonymous(ShareReply::Info(ShareInfo::public()), None, true, AccessReason::PublicShare)]
#[case::private_editor(
    ShareReply::Info(ShareInfo::private(["ed@example.com"])),
    Some("ed@example.com"),
    true,
    AccessReason::ListedEditor
)]
#[case::private_stranger(
    ShareReply::Info(ShareInfo::private(["ed@example.com"])),
    Some("x@example.com"),
    false,
    AccessReason::NotListed
)]
#[case::private_owner_not_listed(
    ShareReply::Info(ShareInfo::private(["ed@example.com"])),
    Some("owner@example.com"),
    false,
    AccessReason::NotListed
)]
#[case::unshared_owner(ShareReply::Info(ShareInfo::default()), Some("owner@example.com"), true, AccessReason::Owner)]
#[case::unshared_stranger(ShareReply::Info(ShareInfo::default()), Some("x@example.com"), false, AccessReason::NotOwner)]
#[case::missing_share_owner(ShareReply::NotFound, Some("owner@example.com"), true, AccessReason::Owner)]
#[case::forbidden_owner(ShareReply::Forbidden, Some("owner@example.com"), false, AccessReason::Denied)]
#[tokio::test]
async fn test_page_access(
    #[case] share: ShareReply,
    #[case] email: Option<&str>,
    #[case] editable: bool,
    #[case] reason: AccessReason,
) {
    let backend = MockBackend::new(sample_session(), share);
    let identity = email.map(viewer).unwrap_or_default();

    let view = load_page(&backend, "42", &identity, &AccessResolver::default()).await;

    assert_eq!(view.editable(), editable);
    assert_eq!(view.decision.reason, reason);
}

#[tokio::test]
async fn test_forbidden_share_reports_permission_error() {
    let backend = MockBackend::new(sample_session(), ShareReply::Forbidden);
    let view = load_page(&backend, "42", &viewer("x@example.com"), &AccessResolver::default()).await;

    assert!(view.is_denied());
    assert!(view.session.is_some());
    assert_eq!(
        view.errors[0].user_message(),
        "You do not have permission to access this session."
    );
}

#[tokio::test]
async fn test_failed_session_is_never_editable() {
    let backend = MockBackend::failing_session(ShareReply::Info(ShareInfo::public()));
    let view = load_page(&backend, "42", &viewer("x@example.com"), &AccessResolver::default()).await;

    assert!(!view.editable());
    assert!(view.session.is_none());
    assert!(matches!(view.errors.as_slice(), [PageError::LoadFailed(_)]));
}

#[tokio::test]
async fn test_failed_session_and_forbidden_share_report_both() {
    let backend = MockBackend::failing_session(ShareReply::Forbidden);
    let view = load_page(&backend, "42", &IdentityContext::anonymous(), &AccessResolver::default()).await;

    assert!(matches!(
        view.errors.as_slice(),
        [PageError::PermissionDenied, PageError::LoadFailed(_)]
    ));
}

#[tokio::test]
async fn test_case_sensitive_policy() {
    let backend = MockBackend::new(sample_session(), ShareReply::Info(ShareInfo::default()));
    let identity = viewer("OWNER@example.com");

    let lenient = load_page(&backend, "42", &identity, &AccessResolver::default()).await;
    let strict = load_page(
        &backend,
        "42",
        &identity,
        &AccessResolver::new(EmailMatch::CaseSensitive),
    )
    .await;

    assert!(lenient.editable());
    assert!(!strict.editable());
}

#[tokio::test]
async fn test_view_feeds_renderer() {
    let backend = MockBackend::new(sample_session(), ShareReply::Info(ShareInfo::public()));
    let view = load_page(&backend, "42", &IdentityContext::anonymous(), &AccessResolver::default()).await;

    let session = view.session.as_ref().unwrap();
    let tree = altar::render_wall(session.wall(), RenderMode::from_editable(view.editable()));

    assert!(tree.mode.is_editable());
    let order: Vec<_> = tree.blocks.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
    assert!(tree.blocks.iter().all(|b| b.interactive));
}
