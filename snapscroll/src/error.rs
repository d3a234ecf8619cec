/// Construction-time configuration errors.
///
/// The engine has no recoverable runtime errors: once a [`crate::Scroller`] exists, every input
/// is accepted and internal inconsistencies are repaired in place (and logged with
/// `feature = "tracing"`).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("item height must be positive (got {0})")]
    InvalidItemHeight(u32),

    #[error("animation duration must be positive (got {0}ms)")]
    InvalidDuration(u64),

    #[error("minimum animation duration {min_ms}ms exceeds the nominal duration {nominal_ms}ms")]
    InvalidMinDuration { min_ms: u64, nominal_ms: u64 },

    /// Control points must be finite and inside the unit square, which keeps the curve
    /// monotonic in both axes.
    #[error("easing control points ({x1}, {y1}, {x2}, {y2}) do not describe a monotonic curve")]
    InvalidEasing { x1: f64, y1: f64, x2: f64, y2: f64 },
}
