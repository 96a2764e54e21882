//! # altar-core
//!
//! Data model, access resolution and wall rendering for the Altar client.
//!
//! Everything in this crate is pure: it operates on data already fetched from
//! the Altar backend and never performs I/O, so it compiles for both native
//! targets and `wasm32-unknown-unknown`.
//!
//! ## Quick Start
//!
//! ```rust
//! use altar_core::{render_wall, resolve_editable, RenderMode, Session, ShareInfo};
//!
//! let session = Session::from_json(r##"{
//!     "id": 1,
//!     "name": "Grandma",
//!     "user_id": "owner@example.com",
//!     "data": {
//!         "width": 600,
//!         "height": 400,
//!         "background": "#fff",
//!         "blocks": [
//!             { "id": "b1", "src": "abc123",
//!               "position": { "x": 10, "y": 20 },
//!               "size": { "width": 50, "height": 50 } }
//!         ]
//!     }
//! }"##).unwrap();
//!
//! let share = ShareInfo::private(["a@x.com"]);
//! assert!(resolve_editable(Some(&share), &session, Some("a@x.com"), false));
//!
//! let tree = render_wall(session.wall(), RenderMode::ReadOnly);
//! assert_eq!(tree.blocks[0].src, "/api/images/url/abc123");
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Sessions, walls, blocks and share metadata
//! - [`access`] - Whether a viewer may edit a session
//! - [`render`] - Wall description to positioned visual tree
//! - [`page`] - Settling concurrent session/share fetches into a page view

/// Decide whether a viewer may edit a session.
pub mod access;
/// Error types.
pub mod error;
mod lenient;
/// Wire model fetched from the backend.
pub mod model;
/// Page-level settlement of fetched data.
pub mod page;
/// Wall rendering.
pub mod render;

pub use access::{
    resolve_editable, AccessDecision, AccessReason, AccessResolver, EmailMatch, IdentityContext,
};
pub use error::{Error, Result};
pub use model::{
    Background, BackgroundKind, Block, BlockBorder, Filters, Frame, Position, Session, Shape,
    ShareInfo, ShareType, Size, WallBorder, WallDescription,
};
pub use page::{settle, LoadFailure, PageError, PageView, ShareLookup};
pub use render::{
    render_wall, BackgroundFill, BlockVisual, ContainerVisual, ImageResolver, RenderMode, Renderer,
    VisualTree,
};
