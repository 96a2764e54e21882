use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

/// How a session is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    /// Anyone with the link may edit.
    Public,
    /// Only listed editors may edit.
    Private,
}

impl FromStr for ShareType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(ShareType::Public),
            "private" => Ok(ShareType::Private),
            other => Err(format!("unknown share type '{}'", other)),
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareType::Public => write!(f, "public"),
            ShareType::Private => write!(f, "private"),
        }
    }
}

/// Sharing metadata from `GET /shared/session/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareInfo {
    /// `None` when the session is not shared or the type is unrecognised.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "share_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub share_type: Option<ShareType>,

    /// Editor emails; only meaningful for private shares.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub editors: Vec<String>,
}

fn share_type<'de, D>(deserializer: D) -> Result<Option<ShareType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient::text(deserializer)?;
    Ok(raw.and_then(|s| match s.parse() {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::debug!("Treating share as unconfigured: {}", e);
            None
        }
    }))
}

impl ShareInfo {
    pub fn public() -> Self {
        Self {
            share_type: Some(ShareType::Public),
            editors: Vec::new(),
        }
    }

    pub fn private<I, S>(editors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            share_type: Some(ShareType::Private),
            editors: editors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.share_type.is_some()
    }
}
