//! # altar
//!
//! Native client for the virtual altar backend.
//!
//! The pure logic (wall model, access resolution, wall rendering) lives in
//! [`altar_core`]; this crate adds the HTTP client, configuration, identity
//! storage, the session page controller and the `altar` command-line tool.
//!
//! ```rust,no_run
//! use altar::{load_page, AccessResolver, BackendClient, IdentityContext};
//!
//! # async fn example() {
//! let backend = BackendClient::new("http://localhost:3000");
//! let identity = IdentityContext::new("token", "ana@example.com");
//! let view = load_page(&backend, "42", &identity, &AccessResolver::default()).await;
//! if view.editable() {
//!     println!("you may edit this altar");
//! }
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod page;
pub mod types;
pub mod utils;

pub use altar_core::{
    render_wall, resolve_editable, AccessDecision, AccessReason, AccessResolver, EmailMatch,
    IdentityContext, PageError, PageView, RenderMode, Session, ShareInfo, ShareLookup, ShareType,
    VisualTree, WallDescription,
};
pub use api::{AltarBackend, BackendClient};
pub use page::load_page;
pub use types::{ClientError, Result};
pub use utils::identity::IdentityStore;
pub use utils::toml_config::{AltarConfig, ConfigError};
