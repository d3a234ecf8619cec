//! A headless, item-snapping kinetic scroll engine.
//!
//! For input adapters (keys, clicks, drag, wheel/trackpad) and a tick-driven controller, see the
//! `snapscroll-adapter` crate.
//!
//! Given a vertical list of fixed-height items, the engine turns scroll requests into eased,
//! whole-pixel motion that always comes to rest on exactly one item, and announces that item
//! once per settle. Requests compose with an in-flight animation, so new input can extend or
//! reverse a flick without restarting it.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`ScrollSurface`] (viewport/content extents and a writable scroll position)
//! - animation frames: call [`Scroller::frame`] with the token the engine hands out
//! - a timestamp in milliseconds for every frame
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod easing;
mod error;
mod options;
mod scroller;
mod state;
mod surface;
mod types;

#[cfg(test)]
mod tests;

pub use easing::CubicBezier;
pub use error::ConfigError;
pub use options::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_MIN_ANIMATION_DURATION_MS, DEFAULT_PAN_SETTLE_DELAY_MS,
    OnItemClickCallback, OnSelectCallback, ScrollerOptions,
};
pub use scroller::Scroller;
pub use state::ScrollState;
pub use surface::{MemorySurface, ScrollSurface};
pub use types::{
    AnimationHandle, Direction, FrameOutcome, FrameToken, Phase, Selection, Stability,
};

pub type ItemKey = u64;
