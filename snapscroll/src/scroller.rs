use crate::{
    AnimationHandle, ConfigError, Direction, FrameOutcome, FrameToken, ItemKey, Phase, ScrollState,
    ScrollSurface, ScrollerOptions, Selection, Stability,
};

/// Magnitudes below this are treated as exactly zero (carry and pending delta).
const EPSILON: f64 = 1e-10;

/// Whole-pixel rounding for requests and steps.
///
/// Ties go to even so a half-pixel remainder counts as consumed instead of bouncing between
/// `+0.5` and `-0.5` forever.
fn whole(v: f64) -> f64 {
    v.round_ties_even()
}

/// A headless, item-snapping kinetic scroll engine.
///
/// The scroller owns a [`ScrollState`] and converts pending scroll requests into eased,
/// whole-pixel position changes, one frame at a time:
/// - Input (`push_delta`, `step`, `click_item`, `grab`/`release`) only changes the pending
///   request and, when idle, hands out a [`FrameToken`].
/// - The host calls [`Scroller::frame`] with that token on its next animation frame, and keeps
///   calling it with `FrameOutcome::next` until the activation halts.
/// - When motion stops on an item boundary, a [`Selection`] is announced once per distinct index.
///
/// It never touches UI objects directly; extents and position go through [`ScrollSurface`].
#[derive(Clone, Debug)]
pub struct Scroller<K = ItemKey> {
    options: ScrollerOptions<K>,
    state: ScrollState,
    phase: Phase,
    baseline_ms: Option<u64>,
    last_frame_ms: Option<u64>,
    next_token: u64,
    anomalies: u64,
}

impl<K: Clone> Scroller<K> {
    /// Creates a scroller, validating the configuration.
    ///
    /// The initial position is `initial_index * item_height` and that index counts as already
    /// announced. Call [`Scroller::sync_surface`] to push it to the host surface.
    pub fn new(options: ScrollerOptions<K>) -> Result<Self, ConfigError> {
        if options.item_height == 0 {
            return Err(ConfigError::InvalidItemHeight(options.item_height));
        }
        if options.animation_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration(options.animation_duration_ms));
        }
        if options.min_animation_duration_ms > options.animation_duration_ms {
            return Err(ConfigError::InvalidMinDuration {
                min_ms: options.min_animation_duration_ms,
                nominal_ms: options.animation_duration_ms,
            });
        }
        options.easing.validate()?;

        sdebug!(
            count = options.count,
            item_height = options.item_height,
            duration_ms = options.animation_duration_ms,
            "Scroller::new"
        );

        let mut state = ScrollState::default();
        if options.count > 0 {
            let index = options.initial_index.min(options.count - 1);
            state.position = index as f64 * options.item_height as f64;
            state.last_announced = Some(index);
        }

        Ok(Self {
            options,
            state,
            phase: Phase::Idle,
            baseline_ms: None,
            last_frame_ms: None,
            next_token: 0,
            anomalies: 0,
        })
    }

    pub fn options(&self) -> &ScrollerOptions<K> {
        &self.options
    }

    /// A copy of the current motion state.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn pending_delta(&self) -> f64 {
        self.state.pending_delta
    }

    pub fn item_height(&self) -> f64 {
        self.options.item_height as f64
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn is_animating(&self) -> bool {
        !self.state.animation.is_idle()
    }

    pub fn is_externally_forced(&self) -> bool {
        self.state.external_force
    }

    /// The frame the host should run next, if any.
    pub fn scheduled(&self) -> Option<FrameToken> {
        self.state.animation.token()
    }

    /// `round(position / item_height)`.
    pub fn resolved_index(&self) -> usize {
        self.state.resolved_index(self.item_height())
    }

    /// The index last reported through a selection notification.
    pub fn selected_index(&self) -> Option<usize> {
        self.state.last_announced
    }

    /// Number of repaired internal inconsistencies (negative offsets) seen so far.
    pub fn anomaly_count(&self) -> u64 {
        self.anomalies
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.get_item_key)(index)
    }

    /// Clamps the position into the surface's scroll range and writes it to the surface.
    pub fn sync_surface(&mut self, surface: &mut impl ScrollSurface) {
        let max = surface.max_scroll();
        self.state.position = self.state.position.clamp(0.0, max);
        surface.set_scroll_position(self.state.position);
    }

    /// Adds a signed scroll request (positive = forward/down).
    ///
    /// Returns a token when this call started a new activation (`Idle -> Priming`). While an
    /// animation is in flight the delta simply composes with it and `None` is returned.
    pub fn push_delta(&mut self, delta: f64) -> Option<FrameToken> {
        if !delta.is_finite() {
            swarn!(delta, "push_delta: ignoring non-finite delta");
            return None;
        }
        self.state.pending_delta += delta;
        strace!(delta, pending = self.state.pending_delta, "push_delta");

        if self.is_animating() {
            if self.phase == Phase::Settling {
                self.phase = Phase::Animating;
            }
            return None;
        }
        if self.state.pending_delta == 0.0 {
            return None;
        }
        Some(self.start())
    }

    /// One discrete step (key press): exactly one item in `direction`.
    pub fn step(&mut self, direction: Direction) -> Option<FrameToken> {
        self.push_delta(direction.sign() * self.item_height())
    }

    /// Pixel delta from where the scroller is heading to the start of `index`.
    pub fn delta_to_index(&self, index: usize) -> f64 {
        let index = index.min(self.options.count.saturating_sub(1));
        let target = index as f64 * self.item_height();
        target - (self.state.position + self.state.pending_delta)
    }

    /// A raw item interaction: notifies `on_item_click` immediately, then animates to the item.
    pub fn click_item(&mut self, index: usize) -> Option<FrameToken> {
        if index >= self.options.count {
            return None;
        }
        if let Some(cb) = &self.options.on_item_click {
            cb(&Selection {
                index,
                key: self.key_for(index),
            });
        }
        self.push_delta(self.delta_to_index(index))
    }

    /// An external force (drag/pan) takes over the position.
    ///
    /// Any request still in flight is dropped: the user caught the list. While held, each
    /// activation ends as soon as no whole pixel is left, so callers feed whole-pixel deltas
    /// and keep the fraction themselves (the adapter's gesture does).
    pub fn grab(&mut self) {
        if self.state.external_force {
            return;
        }
        sdebug!(position = self.state.position, "grab");
        self.state.external_force = true;
        self.state.pending_delta = 0.0;
        self.state.sub_pixel_carry = 0.0;
    }

    /// Ends the external force and lets the scroller settle on a boundary.
    pub fn release(&mut self, surface: &mut impl ScrollSurface) -> FrameOutcome<K> {
        sdebug!(position = self.state.position, "release");
        self.state.external_force = false;
        self.settle(surface)
    }

    /// Runs a stability check outside the frame loop.
    ///
    /// When idle and off-boundary this queues a corrective delta and starts an activation
    /// (`next` is set); when idle and aligned it may announce immediately. While animating it
    /// does nothing: the running animation checks stability itself.
    pub fn settle(&mut self, surface: &mut impl ScrollSurface) -> FrameOutcome<K> {
        if self.is_animating() {
            return self.outcome(None);
        }
        let max = surface.max_scroll();
        let (stability, selection) = self.stabilize(max);
        if let Stability::Correcting { .. } = stability {
            self.start();
        }
        self.outcome(selection)
    }

    /// Stability probe; announces on a fresh resting index and never repeats an announcement.
    ///
    /// A `Correcting` result starts an activation; fetch its token with [`Self::scheduled`].
    pub fn check_stability(&mut self, surface: &mut impl ScrollSurface) -> Stability {
        if self.is_animating() {
            return Stability::Moving;
        }
        let max = surface.max_scroll();
        let (stability, _) = self.stabilize(max);
        if let Stability::Correcting { .. } = stability {
            self.start();
        }
        stability
    }

    /// Stops immediately, wherever the position is. The outstanding token becomes stale.
    pub fn cancel(&mut self) {
        if self.is_animating() {
            sdebug!(position = self.state.position, "cancel");
        }
        self.reset_motion();
    }

    /// Places the scroller on `index` without animating.
    pub fn jump_to_index(
        &mut self,
        index: usize,
        surface: &mut impl ScrollSurface,
    ) -> Option<Selection<K>> {
        self.reset_motion();
        let index = index.min(self.options.count.saturating_sub(1));
        let max = surface.max_scroll();
        self.state.position = (index as f64 * self.item_height()).clamp(0.0, max);
        surface.set_scroll_position(self.state.position);
        let (_, selection) = self.stabilize(max);
        if self.state.pending_delta != 0.0 {
            // Target was beyond the scroll range and off-boundary; animate the correction.
            self.start();
        }
        selection
    }

    /// Runs one animation frame.
    ///
    /// `token` must be the one most recently handed out (by an input call or a previous
    /// `FrameOutcome::next`); anything else is ignored.
    pub fn frame(
        &mut self,
        token: FrameToken,
        now_ms: u64,
        surface: &mut impl ScrollSurface,
    ) -> FrameOutcome<K> {
        if self.state.animation.token() != Some(token) {
            strace!(token = token.0, "frame: stale token");
            let mut out = self.outcome(None);
            out.next = None;
            return out;
        }

        let max = surface.max_scroll();
        if self.state.position > max {
            self.state.position = max;
            surface.set_scroll_position(max);
        }

        match self.phase {
            Phase::Priming => match self.baseline_ms {
                Some(baseline) if now_ms > baseline => {
                    self.phase = Phase::Animating;
                    self.last_frame_ms = Some(baseline);
                    self.animate(now_ms, max, surface)
                }
                Some(_) => self.reschedule(),
                None => {
                    self.baseline_ms = Some(now_ms);
                    self.reschedule()
                }
            },
            Phase::Animating | Phase::Settling => self.animate(now_ms, max, surface),
            Phase::Idle | Phase::Halted => self.halt(None),
        }
    }

    fn animate(
        &mut self,
        now_ms: u64,
        max: f64,
        surface: &mut impl ScrollSurface,
    ) -> FrameOutcome<K> {
        let dt = now_ms.saturating_sub(self.last_frame_ms.unwrap_or(now_ms)) as f64;
        self.last_frame_ms = Some(now_ms);

        let h = self.item_height();
        let pending = self.state.pending_delta;
        let position = self.state.position;

        if whole(pending) == 0.0
            || (position <= 0.0 && pending < 0.0)
            || (position >= max && pending > 0.0)
        {
            // Nothing serviceable is left; drop it and see where we stand.
            strace!(position, pending, max, "frame: sentinel");
            self.state.pending_delta = 0.0;
            self.state.sub_pixel_carry = 0.0;
            return self.after_move(max);
        }

        let dir = pending.signum();
        let dx = if self.state.external_force {
            pending
        } else {
            dir * self.eased_displacement(h, pending, dt)
        };

        let raw = dx + self.state.sub_pixel_carry;
        // Whole pixels only, never against the direction of travel, never past the request.
        let limit = whole(pending.abs());
        let step = if dir > 0.0 {
            whole(raw).clamp(0.0, limit)
        } else {
            whole(raw).clamp(-limit, 0.0)
        };
        let mut carry = raw - step;
        if carry.abs() < EPSILON {
            carry = 0.0;
        }

        let next = (position + step).clamp(0.0, max);
        let applied = next - position;
        if applied != step {
            carry = 0.0;
        }
        self.state.sub_pixel_carry = carry;
        self.state.position = next;
        surface.set_scroll_position(next);

        self.state.pending_delta -= applied;
        if self.state.pending_delta.abs() < EPSILON {
            self.state.pending_delta = 0.0;
        }

        strace!(
            dt,
            dx,
            applied,
            position = next,
            pending = self.state.pending_delta,
            carry,
            "frame"
        );

        self.after_move(max)
    }

    /// The eased, unsigned displacement for this frame (before rounding and clamping).
    fn eased_displacement(&mut self, h: f64, pending: f64, dt: f64) -> f64 {
        let forward = pending > 0.0;
        let exact = self.state.position + self.state.sub_pixel_carry;
        let offset = if forward {
            exact - (exact / h).floor() * h
        } else {
            (exact / h).ceil() * h - exact
        };
        let offset = self.repair_offset(offset, pending);

        let nominal = self.options.animation_duration_ms as f64;
        let floor = self.options.min_animation_duration_ms as f64;
        let duration = (nominal * h / pending.abs()).min(nominal).max(floor);

        let easing = self.options.easing;
        let t = easing.inverse(offset / h) * duration;
        let end = (t + dt) / duration;
        let dx = if end >= 1.0 {
            // The ease for this item completes within the frame: land on the boundary.
            h - offset
        } else {
            (easing.forward(end) - easing.forward((t / duration).min(1.0))) * h
        };
        dx.max(0.0).min(pending.abs())
    }

    /// Clamps a negative offset-from-boundary to zero, recording the anomaly.
    ///
    /// Only floating-point rounding at very large positions produces one; the frame continues
    /// with the repaired value.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) fn repair_offset(&mut self, offset: f64, pending: f64) -> f64 {
        if offset >= 0.0 {
            return offset;
        }
        self.anomalies += 1;
        swarn!(
            offset,
            position = self.state.position,
            pending,
            carry = self.state.sub_pixel_carry,
            external_force = self.state.external_force,
            last_announced = ?self.state.last_announced,
            baseline_ms = ?self.baseline_ms,
            last_frame_ms = ?self.last_frame_ms,
            "offset from boundary should be non-negative; clamping to zero"
        );
        0.0
    }

    fn after_move(&mut self, max: f64) -> FrameOutcome<K> {
        if whole(self.state.pending_delta) != 0.0 {
            return self.reschedule();
        }
        match self.stabilize(max) {
            (Stability::Correcting { .. }, _) => {
                self.phase = Phase::Settling;
                self.reschedule()
            }
            (Stability::Moving, _) => self.reschedule(),
            (Stability::Held | Stability::Stable { .. }, selection) => self.halt(selection),
        }
    }

    /// Stability check. Only called with no outstanding (rounded) request.
    fn stabilize(&mut self, max: f64) -> (Stability, Option<Selection<K>>) {
        if whole(self.state.pending_delta) != 0.0 {
            return (Stability::Moving, None);
        }
        if self.state.external_force {
            return (Stability::Held, None);
        }

        let h = self.item_height();
        let position = self.state.position;
        let offset = position % h;
        if offset == 0.0 {
            self.state.pending_delta = 0.0;
            let index = self.state.resolved_index(h);
            let selection = self.announce(index);
            return (Stability::Stable { index }, selection);
        }

        let mut correction = if offset * 2.0 >= h { h - offset } else { -offset };
        if position + correction > max {
            correction = -offset;
        }
        strace!(position, correction, "settle: correcting");
        self.state.pending_delta = correction;
        self.state.sub_pixel_carry = 0.0;
        (Stability::Correcting { correction }, None)
    }

    fn announce(&mut self, index: usize) -> Option<Selection<K>> {
        if self.options.count == 0 {
            return None;
        }
        let index = index.min(self.options.count - 1);
        if self.state.last_announced == Some(index) {
            return None;
        }
        self.state.last_announced = Some(index);
        let selection = Selection {
            index,
            key: self.key_for(index),
        };
        sdebug!(index, "selection changed");
        if let Some(cb) = &self.options.on_select {
            cb(&selection);
        }
        Some(selection)
    }

    fn start(&mut self) -> FrameToken {
        self.phase = Phase::Priming;
        self.baseline_ms = None;
        self.last_frame_ms = None;
        let token = self.issue_token();
        sdebug!(
            token = token.0,
            pending = self.state.pending_delta,
            "activation started"
        );
        token
    }

    fn issue_token(&mut self) -> FrameToken {
        self.next_token = self.next_token.wrapping_add(1);
        let token = FrameToken(self.next_token);
        self.state.animation = AnimationHandle::Scheduled(token);
        token
    }

    fn reschedule(&mut self) -> FrameOutcome<K> {
        let token = self.issue_token();
        let mut out = self.outcome(None);
        out.next = Some(token);
        out
    }

    fn halt(&mut self, selection: Option<Selection<K>>) -> FrameOutcome<K> {
        strace!(position = self.state.position, "halt");
        self.reset_motion();
        let mut out = self.outcome(selection);
        out.phase = Phase::Halted;
        out
    }

    fn reset_motion(&mut self) {
        self.state.pending_delta = 0.0;
        self.state.sub_pixel_carry = 0.0;
        self.state.animation = AnimationHandle::Idle;
        self.baseline_ms = None;
        self.last_frame_ms = None;
        self.phase = Phase::Idle;
    }

    fn outcome(&self, selection: Option<Selection<K>>) -> FrameOutcome<K> {
        FrameOutcome {
            phase: self.phase,
            position: self.state.position,
            next: self.state.animation.token(),
            selection,
        }
    }
}
