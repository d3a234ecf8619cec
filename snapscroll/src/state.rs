use crate::AnimationHandle;

/// Per-scroller motion state.
///
/// Owned by [`crate::Scroller`]; adapters and render layers only ever see copies.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Current offset, always within `[0, max_scroll]`.
    ///
    /// Whole-pixel, except when it rests on a fractional `max_scroll`.
    pub position: f64,
    /// Signed, not yet applied scroll request (positive = forward/down).
    pub pending_delta: f64,
    /// Fractional remainder dropped by last frame's rounding.
    pub sub_pixel_carry: f64,
    /// A drag/pan directly owns the position; auto-snapping is suspended.
    pub external_force: bool,
    pub last_announced: Option<usize>,
    pub animation: AnimationHandle,
}

impl ScrollState {
    pub fn resolved_index(&self, item_height: f64) -> usize {
        (self.position / item_height).round().max(0.0) as usize
    }

    pub fn is_idle(&self) -> bool {
        self.animation.is_idle()
    }
}
