//! Global application state

use altar_core::{AccessResolver, IdentityContext, ImageResolver, Renderer};
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

const STORAGE_KEY_IDENTITY: &str = "altar_identity";

/// Backend origin baked in at build time; empty means same origin.
const API_BASE: Option<&str> = option_env!("ALTAR_API_BASE");

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Signed-in viewer, anonymous when nothing is stored
    pub identity: RwSignal<IdentityContext>,
    /// API base URL
    pub api_base: RwSignal<String>,
    pub resolver: AccessResolver,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            identity: RwSignal::new(Self::load_from_storage()),
            api_base: RwSignal::new(API_BASE.unwrap_or("").trim_end_matches('/').to_string()),
            resolver: AccessResolver::default(),
        }
    }

    fn load_from_storage() -> IdentityContext {
        LocalStorage::get(STORAGE_KEY_IDENTITY).unwrap_or_default()
    }

    pub fn save_identity(&self, identity: IdentityContext) {
        if let Err(e) = LocalStorage::set(STORAGE_KEY_IDENTITY, &identity) {
            tracing::warn!("Failed to persist identity: {}", e);
        }
        self.identity.set(identity);
    }

    pub fn clear_identity(&self) {
        LocalStorage::delete(STORAGE_KEY_IDENTITY);
        self.identity.set(IdentityContext::anonymous());
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.with(|i| i.is_authenticated())
    }

    /// Renderer resolving image references against the API origin
    pub fn renderer(&self) -> Renderer {
        Renderer::new(ImageResolver::with_origin(self.api_base.get_untracked()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
