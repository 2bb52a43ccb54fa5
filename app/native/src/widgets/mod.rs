//! Collaborator widgets.
//!
//! Small event consumers that share no state with the core or with each other.
//! Each one binds to its elements once at startup and stays inert when they
//! are missing.
//!
//! - [`NavToggle`] - Mobile menu open/close
//! - [`SmoothScroll`] - `data-scroll` jump links
//! - [`GalleryModal`] - Image preview in a native dialog
//! - [`FloatingControls`] - Injected call link and back-to-top button
//! - [`ContactForm`] - Form submission through a `mailto:` URI

pub mod contact;
pub mod floating;
pub mod gallery;
pub mod nav_toggle;
pub mod smooth_scroll;

pub use contact::{ContactForm, ContactMessage, Language, encode_uri_component, mailto_uri};
pub use floating::FloatingControls;
pub use gallery::GalleryModal;
pub use nav_toggle::NavToggle;
pub use smooth_scroll::SmoothScroll;
