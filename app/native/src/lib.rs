//! Lumen - a viewport-reactive page controller.
//!
//! The controller drives the presentation of a single long-scrolling page:
//! a compact header, hero parallax, a pointer-following glow, one-shot reveal
//! animations, the active navigation link, and a handful of small widgets.
//! It talks to the page only through the [`platform::Document`] trait, so it
//! runs the same against a browser binding or the in-memory
//! [`platform::MemoryPage`] that backs the tests and `lumen simulate`.

// Core modules
pub mod config;
pub mod constants;
pub mod error;
pub mod platform;
pub mod schema;

// Controller modules
pub mod controller;
pub mod motion;
pub mod observer;
pub mod presentation;
pub mod reveal;
pub mod scheduler;
pub mod sections;
pub mod signals;
pub mod widgets;

// Host modules
pub mod cli;
pub mod scenario;
pub mod simulation;
