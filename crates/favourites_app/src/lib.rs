//! Favourites app: session controller, shared overlay and the console host.
pub mod controller;
pub mod overlay;
pub mod platform;
pub mod ports;

pub use controller::SyncController;
pub use overlay::{LoadingIndicator, LoadingOverlay, OverlayGuard};
pub use ports::{Navigator, Notifier, Ports};
