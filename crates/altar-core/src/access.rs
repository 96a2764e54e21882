//! Client-side edit permission for a session.
//!
//! The decision is a pure function of the share metadata, the session and the
//! viewer identity. It only gates editing affordances in the UI; the backend
//! enforces ownership and editor membership on every write.

use serde::{Deserialize, Serialize};

use crate::model::{Session, ShareInfo, ShareType};

/// Who is looking at the page.
///
/// Built once from whatever identity store the host uses and passed explicitly
/// to the resolver and to authenticated requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            email: Some(email.into()),
        }
    }

    /// The viewer email, if present and non-blank.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }
}

/// How viewer emails are compared with editor and owner emails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailMatch {
    /// Trim and compare ASCII case-insensitively.
    #[default]
    CaseInsensitive,
    /// Byte-for-byte comparison.
    CaseSensitive,
}

impl EmailMatch {
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            EmailMatch::CaseInsensitive => a.trim().eq_ignore_ascii_case(b.trim()),
            EmailMatch::CaseSensitive => a == b,
        }
    }
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessReason {
    /// The share lookup was refused with HTTP 403.
    Denied,
    /// The session is shared publicly.
    PublicShare,
    /// The viewer is on the private editor list.
    ListedEditor,
    /// Private share and the viewer is not listed (or anonymous).
    NotListed,
    /// Not shared, and the viewer is the owner.
    Owner,
    /// Not shared, and the viewer is not the owner (or anonymous).
    NotOwner,
}

/// Outcome of [`AccessResolver::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub editable: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    fn new(editable: bool, reason: AccessReason) -> Self {
        Self { editable, reason }
    }

    pub fn denied() -> Self {
        Self::new(false, AccessReason::Denied)
    }
}

/// Resolves the `editable` flag for a page view.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessResolver {
    email_match: EmailMatch,
}

impl AccessResolver {
    pub fn new(email_match: EmailMatch) -> Self {
        Self { email_match }
    }

    pub fn email_match(&self) -> EmailMatch {
        self.email_match
    }

    /// Apply the rules in order: denial, public share, private editor list,
    /// then the owner fallback.
    pub fn decide(
        &self,
        share_info: Option<&ShareInfo>,
        session: &Session,
        viewer_email: Option<&str>,
        had_fetch_error: bool,
    ) -> AccessDecision {
        if had_fetch_error {
            return AccessDecision::denied();
        }

        let viewer = viewer_email.filter(|e| !e.trim().is_empty());

        match share_info.and_then(|s| s.share_type) {
            Some(ShareType::Public) => AccessDecision::new(true, AccessReason::PublicShare),
            Some(ShareType::Private) => {
                let listed = viewer.is_some_and(|v| {
                    share_info
                        .map(|s| s.editors.as_slice())
                        .unwrap_or_default()
                        .iter()
                        .any(|editor| self.email_match.matches(editor, v))
                });
                if listed {
                    AccessDecision::new(true, AccessReason::ListedEditor)
                } else {
                    AccessDecision::new(false, AccessReason::NotListed)
                }
            }
            None => {
                let owner = match (viewer, session.owner_identity()) {
                    (Some(v), Some(owner)) => self.email_match.matches(owner, v),
                    _ => false,
                };
                if owner {
                    AccessDecision::new(true, AccessReason::Owner)
                } else {
                    AccessDecision::new(false, AccessReason::NotOwner)
                }
            }
        }
    }

    pub fn resolve_editable(
        &self,
        share_info: Option<&ShareInfo>,
        session: &Session,
        viewer_email: Option<&str>,
        had_fetch_error: bool,
    ) -> bool {
        self.decide(share_info, session, viewer_email, had_fetch_error)
            .editable
    }
}

/// [`AccessResolver::resolve_editable`] with the default (case-insensitive)
/// email policy.
pub fn resolve_editable(
    share_info: Option<&ShareInfo>,
    session: &Session,
    viewer_email: Option<&str>,
    had_fetch_error: bool,
) -> bool {
    AccessResolver::default().resolve_editable(share_info, session, viewer_email, had_fetch_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn session_owned_by(owner: &str) -> Session {
        Session {
            id: Some("1".to_string()),
            user_id: Some(owner.to_string()),
            ..Session::default()
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("anyone@x.com"))]
    #[case(Some("owner@x.com"))]
    fn test_public_share_grants_everyone(#[case] viewer: Option<&str>) {
        let session = session_owned_by("owner@x.com");
        assert!(resolve_editable(
            Some(&ShareInfo::public()),
            &session,
            viewer,
            false
        ));
    }

    #[rstest]
    #[case(Some(ShareInfo::public()))]
    #[case(Some(ShareInfo::private(["a@x.com"])))]
    #[case(None)]
    fn test_fetch_error_always_denies(#[case] share: Option<ShareInfo>) {
        let session = session_owned_by("a@x.com");
        let decision =
            AccessResolver::default().decide(share.as_ref(), &session, Some("a@x.com"), true);
        assert_eq!(decision, AccessDecision::denied());
    }

    #[rstest]
    #[case(Some("a@x.com"), true)]
    #[case(Some("b@x.com"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn test_private_share_scenario(#[case] viewer: Option<&str>, #[case] expected: bool) {
        let session = session_owned_by("owner@x.com");
        let share = ShareInfo::private(["a@x.com"]);
        assert_eq!(
            resolve_editable(Some(&share), &session, viewer, false),
            expected
        );
    }

    #[test]
    fn test_private_share_with_no_editors_denies_everyone() {
        let session = session_owned_by("owner@x.com");
        let share = ShareInfo::private(Vec::<String>::new());
        for viewer in [None, Some("owner@x.com"), Some("a@x.com")] {
            assert!(!resolve_editable(Some(&share), &session, viewer, false));
        }
    }

    #[test]
    fn test_private_share_ignores_owner() {
        let session = session_owned_by("owner@x.com");
        let share = ShareInfo::private(["a@x.com"]);
        let decision =
            AccessResolver::default().decide(Some(&share), &session, Some("owner@x.com"), false);
        assert_eq!(decision.reason, AccessReason::NotListed);
        assert!(!decision.editable);
    }

    #[test]
    fn test_editors_ignored_unless_private() {
        let session = session_owned_by("owner@x.com");
        let share = ShareInfo {
            share_type: None,
            editors: vec!["a@x.com".to_string()],
        };
        assert!(!resolve_editable(Some(&share), &session, Some("a@x.com"), false));
        assert!(resolve_editable(Some(&share), &session, Some("owner@x.com"), false));
    }

    #[rstest]
    #[case(Some("owner@x.com"), true)]
    #[case(Some("other@x.com"), false)]
    #[case(Some("   "), false)]
    #[case(None, false)]
    fn test_owner_fallback(#[case] viewer: Option<&str>, #[case] expected: bool) {
        let session = session_owned_by("owner@x.com");
        assert_eq!(resolve_editable(None, &session, viewer, false), expected);
    }

    #[test]
    fn test_owner_fallback_without_owner() {
        let session = Session::default();
        assert!(!resolve_editable(None, &session, Some("a@x.com"), false));
    }

    #[test]
    fn test_case_policy() {
        let session = session_owned_by("Owner@X.com");
        let share = ShareInfo::private(["A@x.com"]);

        let relaxed = AccessResolver::default();
        assert!(relaxed.resolve_editable(Some(&share), &session, Some("a@X.COM "), false));
        assert!(relaxed.resolve_editable(None, &session, Some("owner@x.com"), false));

        let strict = AccessResolver::new(EmailMatch::CaseSensitive);
        assert!(!strict.resolve_editable(Some(&share), &session, Some("a@x.com"), false));
        assert!(strict.resolve_editable(Some(&share), &session, Some("A@x.com"), false));
        assert!(!strict.resolve_editable(None, &session, Some("owner@x.com"), false));
    }

    #[test]
    fn test_identity_context() {
        let anon = IdentityContext::anonymous();
        assert!(!anon.is_authenticated());
        assert_eq!(anon.bearer(), None);

        let id = IdentityContext::new("tok", "a@x.com");
        assert_eq!(id.bearer().as_deref(), Some("Bearer tok"));
        assert_eq!(id.email(), Some("a@x.com"));

        let blank = IdentityContext {
            token: Some(" ".to_string()),
            email: Some("".to_string()),
        };
        assert!(!blank.is_authenticated());
        assert_eq!(blank.email(), None);
    }

    #[test]
    fn test_resolver_reports_its_matching() {
        assert_eq!(
            AccessResolver::default().email_match(),
            EmailMatch::CaseInsensitive
        );
        let strict = AccessResolver::new(EmailMatch::CaseSensitive);
        assert_eq!(strict.email_match(), EmailMatch::CaseSensitive);
        assert!(!strict.resolve_editable(
            None,
            &session_owned_by("Owner@x.com"),
            Some("owner@x.com"),
            false
        ));
    }
}
