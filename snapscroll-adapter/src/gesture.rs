/// Identifies one pointer/touch contact, as reported by the input layer.
pub type PointerId = u64;

/// The drag in progress: which contact owns it and where it was last seen.
///
/// Exists only between pointer down and release/cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureSnapshot {
    pub id: PointerId,
    pub last: f64,
    /// Finger travel not yet handed to the scroller (always under one pixel).
    pub remainder: f64,
}

impl GestureSnapshot {
    pub fn new(id: PointerId, at: f64) -> Self {
        Self {
            id,
            last: at,
            remainder: 0.0,
        }
    }

    /// Records a new coordinate and returns the whole-pixel scroll delta it implies.
    ///
    /// Content follows the finger: moving up (smaller coordinate) scrolls forward. The fraction
    /// is kept and added to the next move, so the list never drifts from the finger.
    pub fn advance(&mut self, at: f64) -> f64 {
        let moved = self.last - at;
        self.last = at;
        split_whole(moved, &mut self.remainder)
    }
}

/// Adds `delta` to `remainder` and moves the whole-pixel part out.
///
/// `remainder` is left in `[-0.5, 0.5]`.
pub(crate) fn split_whole(delta: f64, remainder: &mut f64) -> f64 {
    let total = delta + *remainder;
    let whole = total.round();
    *remainder = total - whole;
    whole
}
