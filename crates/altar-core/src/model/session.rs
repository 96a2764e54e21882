use serde::{Deserialize, Serialize};

use super::WallDescription;
use crate::error::{Error, Result};
use crate::lenient;

/// A saved altar as returned by `GET /session/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    /// Owning user as stored by the backend.
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_id: Option<String>,

    /// Owner email, when the backend includes it alongside `user_id`.
    #[serde(
        default,
        alias = "user_email",
        alias = "creator_email",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_email: Option<String>,

    /// The wall payload. Older sessions store it as JSON text.
    #[serde(default, deserialize_with = "lenient::embedded_object")]
    pub data: Option<WallDescription>,
}

static EMPTY_WALL: std::sync::OnceLock<WallDescription> = std::sync::OnceLock::new();

impl Session {
    /// Decode a session payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decode an already parsed session payload.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidInput(
                "session payload is not a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The identity the owner check compares viewer emails against.
    ///
    /// This is client-supplied data; the backend remains the authority on
    /// ownership.
    pub fn owner_identity(&self) -> Option<&str> {
        non_blank(self.owner_email.as_deref()).or_else(|| non_blank(self.user_id.as_deref()))
    }

    /// The wall to render, or an empty wall when the session has none yet.
    pub fn wall(&self) -> &WallDescription {
        match &self.data {
            Some(wall) => wall,
            None => EMPTY_WALL.get_or_init(WallDescription::default),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Untitled altar")
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
