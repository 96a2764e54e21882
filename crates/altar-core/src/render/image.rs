//! Image source resolution.

use std::borrow::Cow;

/// Path of the backend endpoint that serves opaque image references.
pub const IMAGE_ENDPOINT: &str = "/api/images/url/";

/// Rewrites opaque image references to the image-serving endpoint.
///
/// `http://`, `https://` and `data:` sources are used verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResolver {
    origin: String,
}

impl ImageResolver {
    /// Resolve relative to the page origin (`/api/images/url/{ref}`).
    pub fn relative() -> Self {
        Self::default()
    }

    /// Resolve against an absolute API origin, e.g. for exported HTML.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve<'a>(&self, src: &'a str) -> Cow<'a, str> {
        let src = src.trim();
        if is_direct(src) {
            Cow::Borrowed(src)
        } else {
            Cow::Owned(format!("{}{}{}", self.origin, IMAGE_ENDPOINT, src))
        }
    }
}

fn is_direct(src: &str) -> bool {
    let head = src.get(..8).unwrap_or(src).to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://") || head.starts_with("data:")
}
