use snapscroll::{
    ConfigError, Direction, FrameOutcome, ItemKey, Scroller, ScrollerOptions, ScrollSurface,
    Selection,
};

use crate::gesture::split_whole;
use crate::{DebounceTimer, GestureSnapshot, PointerId, WheelKind, notch_delta};

/// A framework-neutral controller that wraps a [`Scroller`] and its surface and translates input
/// events into scroll requests.
///
/// This type does not hold any UI objects beyond the surface you hand it. Adapters drive it by
/// calling:
/// - `step` / `click_item` / `pointer_*` / `wheel` when input events occur
/// - `tick(now_ms)` on every animation frame (runs the scheduled frame and the pan-settle timer)
#[derive(Clone, Debug)]
pub struct Controller<S, K = ItemKey> {
    scroller: Scroller<K>,
    surface: S,
    gesture: Option<GestureSnapshot>,
    pan_timer: DebounceTimer,
    /// Pan travel not yet handed to the scroller (always under one pixel).
    pan_remainder: f64,
}

impl<S: ScrollSurface, K: Clone> Controller<S, K> {
    pub fn new(options: ScrollerOptions<K>, surface: S) -> Result<Self, ConfigError> {
        Ok(Self::from_scroller(Scroller::new(options)?, surface))
    }

    pub fn from_scroller(mut scroller: Scroller<K>, mut surface: S) -> Self {
        scroller.sync_surface(&mut surface);
        Self {
            scroller,
            surface,
            gesture: None,
            pan_timer: DebounceTimer::new(),
            pan_remainder: 0.0,
        }
    }

    pub fn scroller(&self) -> &Scroller<K> {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut Scroller<K> {
        &mut self.scroller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (Scroller<K>, S) {
        (self.scroller, self.surface)
    }

    /// Whether the host should keep calling `tick` every frame.
    pub fn wants_tick(&self) -> bool {
        self.scroller.is_animating() || self.pan_timer.is_armed()
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.is_animating()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_timer.is_armed()
    }

    pub fn gesture(&self) -> Option<GestureSnapshot> {
        self.gesture
    }

    /// Discrete key step: exactly one item.
    pub fn step(&mut self, direction: Direction) {
        let _ = self.scroller.step(direction);
    }

    /// Item click/tap: reports the raw interaction, then animates to the item.
    pub fn click_item(&mut self, index: usize) {
        let _ = self.scroller.click_item(index);
    }

    /// Places the list on `index` immediately (e.g. Home/End keys, restoring state).
    pub fn jump_to_index(&mut self, index: usize) -> Option<Selection<K>> {
        self.end_pan();
        self.scroller.jump_to_index(index, &mut self.surface)
    }

    /// Starts a drag. Only one contact may drive the list; returns `false` if another owns it.
    pub fn pointer_down(&mut self, id: PointerId, at: f64) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        adebug!(id, at, "pointer_down");
        self.end_pan();
        self.gesture = Some(GestureSnapshot::new(id, at));
        self.scroller.grab();
        true
    }

    /// Moves the list 1:1 with the owning contact. Other contacts are ignored.
    ///
    /// The scroller receives whole pixels; sub-pixel travel accumulates in the gesture.
    pub fn pointer_move(&mut self, id: PointerId, at: f64) -> bool {
        let Some(gesture) = self.gesture.as_mut().filter(|g| g.id == id) else {
            return false;
        };
        let delta = gesture.advance(at);
        atrace!(id, at, delta, "pointer_move");
        if delta != 0.0 {
            let _ = self.scroller.push_delta(delta);
        }
        true
    }

    /// Ends the drag and lets the list settle on the nearer item.
    ///
    /// Returns a selection when the list was already resting on a new item.
    pub fn pointer_up(&mut self, id: PointerId) -> Option<Selection<K>> {
        if self.gesture.is_none_or(|g| g.id != id) {
            return None;
        }
        adebug!(id, "pointer_up");
        self.gesture = None;
        self.scroller.release(&mut self.surface).selection
    }

    /// The platform cancelled the contact; settles exactly like a release.
    pub fn pointer_cancel(&mut self, id: PointerId) -> Option<Selection<K>> {
        self.pointer_up(id)
    }

    /// Wheel/trackpad input with an explicit classification.
    pub fn wheel(&mut self, delta: f64, kind: WheelKind, now_ms: u64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let h = self.scroller.item_height();
        match kind {
            WheelKind::Notch => {
                let _ = self.scroller.push_delta(notch_delta(delta, h));
            }
            WheelKind::Pan => {
                self.scroller.grab();
                let whole = split_whole(delta, &mut self.pan_remainder);
                if whole != 0.0 {
                    let _ = self.scroller.push_delta(whole);
                }
                // No lift event exists for trackpads; silence stands in for it.
                let delay = self.scroller.options().pan_settle_delay_ms;
                self.pan_timer.arm(now_ms, delay);
                atrace!(delta, deadline_ms = ?self.pan_timer.deadline_ms(), "wheel pan");
            }
        }
    }

    /// Wheel/trackpad input classified by [`WheelKind::classify`].
    pub fn wheel_auto(&mut self, delta: f64, now_ms: u64) {
        let kind = WheelKind::classify(delta, self.scroller.item_height());
        self.wheel(delta, kind, now_ms);
    }

    /// Advances the controller by one frame.
    ///
    /// Fires an expired pan-settle timer, then runs the scheduled animation frame (if any).
    /// Returns `None` when there was nothing to do.
    pub fn tick(&mut self, now_ms: u64) -> Option<FrameOutcome<K>> {
        let mut settled = None;
        if self.pan_timer.fire_if_due(now_ms) && self.gesture.is_none() {
            adebug!(now_ms, "pan settled");
            self.pan_remainder = 0.0;
            let out = self.scroller.release(&mut self.surface);
            if out.next.is_none() {
                return Some(out);
            }
            settled = out.selection;
        }

        let token = self.scroller.scheduled()?;
        let mut out = self.scroller.frame(token, now_ms, &mut self.surface);
        if out.selection.is_none() {
            out.selection = settled;
        }
        Some(out)
    }

    fn end_pan(&mut self) {
        self.pan_timer.cancel();
        self.pan_remainder = 0.0;
    }
}
