//! Wire model shared by every Altar client.
//!
//! All types decode leniently: unknown fields are ignored and malformed
//! optional fields decode as absent, so the renderer can substitute defaults.

mod session;
mod share;
mod wall;

pub use session::Session;
pub use share::{ShareInfo, ShareType};
pub use wall::{
    Background, BackgroundKind, Block, BlockBorder, Filters, Frame, Position, Shape, Size,
    WallBorder, WallDescription,
};
