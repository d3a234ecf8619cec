/// How a wheel/trackpad delta should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelKind {
    /// A mouse wheel detent: moves by whole items.
    Notch,
    /// Continuous trackpad panning: tracks 1:1 until the fingers go quiet.
    Pan,
}

impl WheelKind {
    /// Nonzero exact multiples of the item height are notches; anything fractional is panning.
    pub fn classify(delta: f64, item_height: f64) -> Self {
        if delta.is_finite() && delta != 0.0 && item_height > 0.0 && delta % item_height == 0.0 {
            Self::Notch
        } else {
            Self::Pan
        }
    }
}

/// Whole-item delta for one notch event (at least one item, in the direction of `delta`).
pub fn notch_delta(delta: f64, item_height: f64) -> f64 {
    let items = (delta.abs() / item_height).round().max(1.0);
    delta.signum() * items * item_height
}
