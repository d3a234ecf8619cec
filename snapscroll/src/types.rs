/// Identifies one frame request handed to the host.
///
/// Only the most recently issued token is honored by [`crate::Scroller::frame`]; any other
/// token is stale (superseded or cancelled) and is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameToken(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationHandle {
    #[default]
    Idle,
    Scheduled(FrameToken),
}

impl AnimationHandle {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn token(&self) -> Option<FrameToken> {
        match *self {
            Self::Idle => None,
            Self::Scheduled(token) => Some(token),
        }
    }
}

/// Stepper state machine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    /// First frame after a (re)start; establishes the time baseline.
    Priming,
    Animating,
    /// The requested delta is consumed and a corrective snap toward the nearer boundary is
    /// in flight.
    Settling,
    /// Reported for the frame that ended an activation; the scroller itself is back to `Idle`.
    Halted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Result of a stability check.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stability {
    /// A request is still outstanding.
    Moving,
    /// An external force (drag/pan) owns the position; nothing is snapped.
    Held,
    /// Resting on an item boundary.
    Stable { index: usize },
    /// Off-boundary; a corrective delta of `correction` pixels was queued.
    Correcting { correction: f64 },
}

impl Stability {
    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Held | Self::Stable { .. })
    }
}

/// A settled selection, delivered once per distinct resting index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection<K> {
    pub index: usize,
    pub key: K,
}

/// What one call to [`crate::Scroller::frame`] did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameOutcome<K> {
    /// Phase after the frame (`Halted` when the activation ended).
    pub phase: Phase,
    pub position: f64,
    /// Next frame to run, if the animation continues.
    pub next: Option<FrameToken>,
    pub selection: Option<Selection<K>>,
}

impl<K> FrameOutcome<K> {
    pub fn is_halted(&self) -> bool {
        self.phase == Phase::Halted
    }
}
