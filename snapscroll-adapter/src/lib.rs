//! Input adapters for the `snapscroll` crate.
//!
//! The `snapscroll` crate is UI-agnostic and focuses on the motion math and state. This crate
//! provides the framework-neutral glue a host needs to feed it real input:
//!
//! - Discrete steps (keys) and item clicks
//! - Pointer/touch drags with 1:1 tracking and snap-on-release
//! - Wheel notches vs. continuous trackpad panning, with a debounce standing in for "fingers
//!   lifted"
//! - A [`Controller`] that owns the surface and is driven by `tick(now_ms)`
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod debounce;
mod gesture;
mod wheel;


pub use controller::Controller;
pub use debounce::DebounceTimer;
pub use gesture::{GestureSnapshot, PointerId};
pub use wheel::{WheelKind, notch_delta};
