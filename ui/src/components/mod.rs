//! Reusable UI components

pub mod header;
pub mod loading;
pub mod wall;

pub use header::Header;
pub use loading::{LoadingOverlay, LoadingSpinner};
pub use wall::{ErrorBanner, Wall};
