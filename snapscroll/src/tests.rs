use crate::*;

use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

const H: u32 = 36;

type Log = Arc<Mutex<Vec<usize>>>;

fn picker(count: usize) -> (Scroller, MemorySurface, Log) {
    picker_with(ScrollerOptions::new(count, H))
}

fn picker_with(opts: ScrollerOptions) -> (Scroller, MemorySurface, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let opts = opts.with_on_select(Some(move |s: &Selection<u64>| {
        sink.lock().unwrap().push(s.index);
    }));
    let count = opts.count;
    let mut s = Scroller::new(opts).unwrap();
    let mut surface = MemorySurface::for_items(count, H, 1);
    s.sync_surface(&mut surface);
    (s, surface, log)
}

fn announced(log: &Log) -> Vec<usize> {
    log.lock().unwrap().clone()
}

/// Drives frames at ~60fps until the activation halts.
fn run(
    s: &mut Scroller,
    surface: &mut MemorySurface,
    token: Option<FrameToken>,
    now_ms: &mut u64,
) -> Vec<FrameOutcome<u64>> {
    let mut out = Vec::new();
    let mut next = token;
    while let Some(token) = next {
        *now_ms += 16;
        let o = s.frame(token, *now_ms, surface);
        next = o.next;
        out.push(o);
        assert!(out.len() < 10_000, "animation never halted");
    }
    out
}

fn run_frames(
    s: &mut Scroller,
    surface: &mut MemorySurface,
    frames: usize,
    now_ms: &mut u64,
) -> Vec<FrameOutcome<u64>> {
    let mut out = Vec::new();
    for _ in 0..frames {
        let Some(token) = s.scheduled() else {
            break;
        };
        *now_ms += 16;
        out.push(s.frame(token, *now_ms, surface));
    }
    out
}

#[test]
fn easing_endpoints_and_inverse_agree() {
    for curve in [
        CubicBezier::LINEAR,
        CubicBezier::EASE,
        CubicBezier::EASE_OUT,
        CubicBezier::EASE_IN_OUT,
    ] {
        assert_eq!(curve.forward(0.0), 0.0);
        assert_eq!(curve.forward(1.0), 1.0);
        assert_eq!(curve.forward(-3.0), 0.0);
        assert_eq!(curve.forward(7.0), 1.0);

        let mut prev = 0.0;
        for i in 1..100 {
            let p = i as f64 / 100.0;
            let y = curve.forward(p);
            assert!(y >= prev - 1e-9, "{curve:?} not monotonic at {p}");
            prev = y;

            let roundtrip = curve.forward(curve.inverse(p));
            assert!((roundtrip - p).abs() < 1e-4, "{curve:?}: {p} -> {roundtrip}");
        }
    }
}

#[test]
fn linear_curve_is_identity() {
    let c = CubicBezier::LINEAR;
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((c.forward(t) - t).abs() < 1e-6);
        assert!((c.inverse(t) - t).abs() < 1e-6);
    }
}

#[test]
fn swapped_curve_exchanges_axes() {
    let c = CubicBezier::new(0.1, 0.7, 0.3, 0.9).unwrap();
    let s = c.swapped();
    assert_eq!((s.x1, s.y1, s.x2, s.y2), (0.7, 0.1, 0.9, 0.3));
    assert_eq!(s.swapped(), c);
}

#[test]
fn easing_rejects_points_outside_unit_square() {
    assert!(CubicBezier::new(0.25, 0.1, 0.25, 1.0).is_ok());
    assert!(matches!(
        CubicBezier::new(1.5, 0.0, 0.5, 1.0),
        Err(ConfigError::InvalidEasing { .. })
    ));
    assert!(CubicBezier::new(0.2, -0.4, 0.5, 1.0).is_err());
    assert!(CubicBezier::new(0.2, 0.4, f64::NAN, 1.0).is_err());
    assert!(CubicBezier::new(0.2, 0.4, 0.5, f64::INFINITY).is_err());
}

#[test]
fn construction_validates_configuration() {
    assert_eq!(
        Scroller::new(ScrollerOptions::new(5, 0)).unwrap_err(),
        ConfigError::InvalidItemHeight(0)
    );
    assert_eq!(
        Scroller::new(ScrollerOptions::new(5, H).with_animation_duration_ms(0)).unwrap_err(),
        ConfigError::InvalidDuration(0)
    );
    assert_eq!(
        Scroller::new(
            ScrollerOptions::new(5, H)
                .with_animation_duration_ms(100)
                .with_min_animation_duration_ms(200)
        )
        .unwrap_err(),
        ConfigError::InvalidMinDuration {
            min_ms: 200,
            nominal_ms: 100
        }
    );
    let bad = CubicBezier {
        x1: 2.0,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };
    assert!(matches!(
        Scroller::new(ScrollerOptions::new(5, H).with_easing(bad)),
        Err(ConfigError::InvalidEasing { .. })
    ));
}

#[test]
fn initial_index_sets_position_and_counts_as_announced() {
    let (s, surface, log) = picker_with(ScrollerOptions::new(5, H).with_initial_index(3));
    assert_eq!(s.position(), 108.0);
    assert_eq!(surface.position, 108.0);
    assert_eq!(s.selected_index(), Some(3));
    assert!(announced(&log).is_empty());

    let s = Scroller::new(ScrollerOptions::new(5, H).with_initial_index(99)).unwrap();
    assert_eq!(s.selected_index(), Some(4));

    let s = Scroller::new(ScrollerOptions::new(0, H)).unwrap();
    assert_eq!(s.selected_index(), None);
    assert_eq!(s.position(), 0.0);
}

#[test]
fn two_down_keys_land_on_index_two() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;

    let token = s.step(Direction::Forward);
    assert!(token.is_some());
    let frames = run(&mut s, &mut surface, token, &mut now);
    assert!(frames.last().unwrap().is_halted());
    assert_eq!(s.position(), 36.0);

    let token = s.step(Direction::Forward);
    run(&mut s, &mut surface, token, &mut now);

    assert_eq!(s.position(), 72.0);
    assert_eq!(surface.position, 72.0);
    assert_eq!(s.resolved_index(), 2);
    assert_eq!(announced(&log), [1, 2]);
    assert!(!s.is_animating());
    assert_eq!(s.pending_delta(), 0.0);
    assert_eq!(s.state().sub_pixel_carry, 0.0);
}

#[test]
fn halting_frame_carries_the_selection() {
    let (mut s, mut surface, _log) = picker(5);
    let mut now = 0u64;
    let token = s.step(Direction::Forward);
    let frames = run(&mut s, &mut surface, token, &mut now);
    let last = frames.last().unwrap();
    assert_eq!(last.phase, Phase::Halted);
    assert_eq!(last.next, None);
    assert_eq!(last.selection, Some(Selection { index: 1, key: 1 }));
    assert!(frames[..frames.len() - 1].iter().all(|f| f.selection.is_none()));
}

#[test]
fn priming_frame_does_not_move() {
    let (mut s, mut surface, _log) = picker(5);
    let token = s.step(Direction::Forward).unwrap();
    assert_eq!(s.phase(), Phase::Priming);

    let first = s.frame(token, 1000, &mut surface);
    assert_eq!(first.phase, Phase::Priming);
    assert_eq!(first.position, 0.0);

    // No time has passed since the baseline: still priming.
    let again = s.frame(first.next.unwrap(), 1000, &mut surface);
    assert_eq!(again.phase, Phase::Priming);
    assert_eq!(again.position, 0.0);

    let moving = s.frame(again.next.unwrap(), 1016, &mut surface);
    assert_eq!(moving.phase, Phase::Animating);

    let mut now = 1016;
    run_frames(&mut s, &mut surface, 4, &mut now);
    assert!(s.position() > 0.0);
}

#[test]
fn only_one_activation_is_scheduled() {
    let (mut s, _surface, _log) = picker(5);
    let first = s.step(Direction::Forward);
    assert!(first.is_some());
    assert_eq!(s.step(Direction::Forward), None);
    assert_eq!(s.push_delta(12.0), None);
    assert_eq!(s.scheduled(), first);
    assert_eq!(s.pending_delta(), 84.0);
}

#[test]
fn stale_tokens_are_ignored() {
    let (mut s, mut surface, _log) = picker(5);
    let token = s.step(Direction::Forward).unwrap();
    let out = s.frame(token, 0, &mut surface);
    let next = out.next.unwrap();

    // The first token was superseded by the reschedule.
    let stale = s.frame(token, 50, &mut surface);
    assert_eq!(stale.next, None);
    assert_eq!(s.scheduled(), Some(next));

    s.cancel();
    let cancelled = s.frame(next, 100, &mut surface);
    assert_eq!(cancelled.next, None);
    assert_eq!(s.position(), 0.0);
    assert!(!s.is_animating());
}

#[test]
fn single_step_motion_is_monotonic_and_whole_pixel() {
    let (mut s, mut surface, _log) = picker(5);
    let mut now = 0u64;
    let token = s.step(Direction::Forward);
    let mut prev = 0.0;
    for f in run(&mut s, &mut surface, token, &mut now) {
        assert!(f.position >= prev, "moved backwards: {prev} -> {}", f.position);
        assert_eq!(f.position.fract(), 0.0);
        prev = f.position;
    }
    assert_eq!(prev, 36.0);
    assert_eq!(s.anomaly_count(), 0);
}

#[test]
fn clamps_at_the_top() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;
    let token = s.push_delta(-10_000.0);
    for f in run(&mut s, &mut surface, token, &mut now) {
        assert_eq!(f.position, 0.0);
    }
    assert_eq!(surface.position, 0.0);
    assert!(announced(&log).is_empty());
    assert!(!s.is_animating());
}

#[test]
fn clamps_at_the_bottom() {
    let (mut s, mut surface, log) = picker_with(ScrollerOptions::new(5, H).with_initial_index(4));
    assert_eq!(s.position(), 144.0);
    let mut now = 0u64;
    let token = s.push_delta(10_000.0);
    for f in run(&mut s, &mut surface, token, &mut now) {
        assert_eq!(f.position, 144.0);
    }
    assert!(announced(&log).is_empty());
}

#[test]
fn overshooting_request_stops_and_announces_at_the_end() {
    let (mut s, mut surface, log) = picker_with(ScrollerOptions::new(5, H).with_initial_index(3));
    let mut now = 0u64;
    let token = s.push_delta(4.0 * 36.0);
    for f in run(&mut s, &mut surface, token, &mut now) {
        assert!(f.position <= 144.0);
    }
    assert_eq!(s.position(), 144.0);
    assert_eq!(announced(&log), [4]);
}

#[test]
fn stability_checks_are_idempotent() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;
    let token = s.step(Direction::Forward);
    run(&mut s, &mut surface, token, &mut now);
    assert_eq!(announced(&log), [1]);

    for _ in 0..5 {
        assert_eq!(
            s.check_stability(&mut surface),
            Stability::Stable { index: 1 }
        );
        let out = s.settle(&mut surface);
        assert_eq!(out.selection, None);
        assert_eq!(out.next, None);
    }
    assert_eq!(announced(&log), [1]);
}

#[test]
fn held_position_is_never_corrected() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;
    s.grab();
    let token = s.push_delta(10.0);
    let frames = run(&mut s, &mut surface, token, &mut now);
    assert!(frames.last().unwrap().is_halted());
    assert_eq!(s.position(), 10.0);

    for _ in 0..3 {
        assert_eq!(s.check_stability(&mut surface), Stability::Held);
        assert!(!s.is_animating());
    }
    assert_eq!(s.position(), 10.0);
    assert!(announced(&log).is_empty());
}

#[test]
fn drag_tracks_one_to_one() {
    let (mut s, mut surface, _log) = picker(5);
    let mut now = 0u64;
    s.grab();
    let token = s.push_delta(23.0);
    let frames = run(&mut s, &mut surface, token, &mut now);
    // Priming, then the whole movement in a single frame.
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].position, 23.0);
}

#[test]
fn short_drag_snaps_back_without_notifying() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;
    s.grab();
    let token = s.push_delta(10.0);
    run(&mut s, &mut surface, token, &mut now);

    let out = s.release(&mut surface);
    assert_eq!(out.phase, Phase::Priming);
    assert_eq!(s.pending_delta(), -10.0);
    run(&mut s, &mut surface, out.next, &mut now);

    assert_eq!(s.position(), 0.0);
    assert!(announced(&log).is_empty());
}

#[test]
fn released_drag_snaps_to_nearer_boundary_and_notifies_once() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;
    s.grab();
    let token = s.push_delta(30.0);
    run(&mut s, &mut surface, token, &mut now);
    assert_eq!(s.position(), 30.0);

    let out = s.release(&mut surface);
    let frames = run(&mut s, &mut surface, out.next, &mut now);
    assert_eq!(s.position(), 36.0);
    assert_eq!(announced(&log), [1]);
    assert_eq!(frames.iter().filter(|f| f.selection.is_some()).count(), 1);
    assert!(frames.iter().any(|f| f.phase == Phase::Animating));
}

#[test]
fn correction_never_targets_beyond_the_end() {
    // Content is not a whole number of rows past the viewport: max_scroll = 174.
    let (mut s, mut surface, _log) = picker(5);
    surface.content = 210.0;
    let mut now = 0u64;
    s.grab();
    let token = s.push_delta(174.0);
    run(&mut s, &mut surface, token, &mut now);
    assert_eq!(s.position(), 174.0);

    // 174 is past the midpoint of its row, but 180 is unreachable.
    let out = s.release(&mut surface);
    assert_eq!(s.pending_delta(), -30.0);
    run(&mut s, &mut surface, out.next, &mut now);
    assert_eq!(s.position(), 144.0);
}

#[test]
fn grab_catches_an_in_flight_animation() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0u64;
    let _ = s.push_delta(3.0 * 36.0);
    run_frames(&mut s, &mut surface, 6, &mut now);
    assert!(s.is_animating());

    s.grab();
    assert_eq!(s.pending_delta(), 0.0);
    let caught_at = s.position();
    let next = s.scheduled();
    run(&mut s, &mut surface, next, &mut now);
    assert_eq!(s.position(), caught_at);
    assert!(announced(&log).is_empty());
}

#[test]
fn reversal_mid_flight_stays_in_bounds_and_shrinks_request() {
    let (mut s, mut surface, log) = picker_with(ScrollerOptions::new(5, H).with_initial_index(2));
    let mut now = 0u64;
    let _ = s.push_delta(72.0);
    run_frames(&mut s, &mut surface, 6, &mut now);
    assert!(s.is_animating());
    let turn_at = s.position();
    assert!(turn_at > 72.0 && turn_at < 144.0);

    assert_eq!(s.push_delta(-108.0), None);
    let mut prev_pending = s.pending_delta().abs();
    let mut prev_pos = turn_at;
    while let Some(token) = s.scheduled() {
        now += 16;
        let f = s.frame(token, now, &mut surface);
        assert!((0.0..=144.0).contains(&f.position));
        assert!(f.position <= prev_pos, "overshoot after reversal");
        let pending = s.pending_delta().abs();
        assert!(pending <= prev_pending);
        prev_pending = pending;
        prev_pos = f.position;
    }
    assert_eq!(s.position(), 36.0);
    assert_eq!(announced(&log), [1]);
}

#[test]
fn large_requests_settle_faster_per_item() {
    let mut now = 0u64;

    let (mut s, mut surface, _log) = picker(5);
    let mut sequential = 0;
    for _ in 0..4 {
        let token = s.step(Direction::Forward);
        sequential += run(&mut s, &mut surface, token, &mut now).len();
    }
    assert_eq!(s.position(), 144.0);

    let (mut s, mut surface, log) = picker(5);
    let token = s.push_delta(4.0 * 36.0);
    let at_once = run(&mut s, &mut surface, token, &mut now).len();
    assert_eq!(s.position(), 144.0);
    assert_eq!(announced(&log), [4]);

    assert!(at_once < sequential, "{at_once} >= {sequential}");
}

#[test]
fn duration_floor_limits_speed() {
    let mut now = 0u64;
    let opts = ScrollerOptions::new(100, H)
        .with_animation_duration_ms(300)
        .with_min_animation_duration_ms(300);
    let (mut s, mut surface, _log) = picker_with(opts);
    surface.content = 100.0 * 36.0;
    let token = s.push_delta(10.0 * 36.0);
    let frames = run(&mut s, &mut surface, token, &mut now).len();
    // Every item takes the full 300ms (~19 frames).
    assert!(frames >= 10 * 15, "{frames}");
}

#[test]
fn click_notifies_immediately_then_settles_on_item() {
    let clicks: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicks);
    let opts = ScrollerOptions::new(5, H).with_on_item_click(Some(move |s: &Selection<u64>| {
        sink.lock().unwrap().push(s.index);
    }));
    let (mut s, mut surface, log) = picker_with(opts);
    let mut now = 0u64;

    let token = s.click_item(3);
    assert_eq!(announced(&clicks), [3]);
    assert!(announced(&log).is_empty());

    run(&mut s, &mut surface, token, &mut now);
    assert_eq!(s.position(), 108.0);
    assert_eq!(announced(&log), [3]);

    // Clicking the current item is still reported, but nothing moves.
    assert_eq!(s.click_item(3), None);
    assert_eq!(announced(&clicks), [3, 3]);
    assert_eq!(announced(&log), [3]);
    assert_eq!(s.click_item(5), None);
}

#[test]
fn jump_to_index_announces_once() {
    let (mut s, mut surface, log) = picker(5);
    assert_eq!(
        s.jump_to_index(2, &mut surface),
        Some(Selection { index: 2, key: 2 })
    );
    assert_eq!(surface.position, 72.0);
    assert_eq!(s.jump_to_index(2, &mut surface), None);
    assert_eq!(announced(&log), [2]);
}

#[test]
fn custom_keys_flow_into_selections() {
    let opts = ScrollerOptions::new_with_key(3, H, |i| ["a", "b", "c"][i]);
    let mut s = Scroller::new(opts).unwrap();
    let mut surface = MemorySurface::for_items(3, H, 1);
    let mut now = 0u64;
    let token = s.step(Direction::Forward);
    let mut next = token;
    let mut last = None;
    while let Some(t) = next {
        now += 16;
        let f = s.frame(t, now, &mut surface);
        next = f.next;
        last = Some(f);
    }
    assert_eq!(last.unwrap().selection, Some(Selection { index: 1, key: "b" }));
}

#[test]
fn surface_shrinking_mid_flight_clamps_position() {
    let (mut s, mut surface, log) = picker_with(ScrollerOptions::new(5, H).with_initial_index(3));
    let mut now = 0u64;
    let _ = s.step(Direction::Forward);
    run_frames(&mut s, &mut surface, 4, &mut now);
    surface.content = 4.0 * 36.0;
    let next = s.scheduled();
    run(&mut s, &mut surface, next, &mut now);
    assert_eq!(s.position(), 108.0);
    assert_eq!(surface.position, 108.0);
    assert!(announced(&log).is_empty());
}

#[test]
fn non_finite_delta_is_ignored() {
    let (mut s, _surface, _log) = picker(5);
    assert_eq!(s.push_delta(f64::NAN), None);
    assert_eq!(s.push_delta(f64::INFINITY), None);
    assert_eq!(s.pending_delta(), 0.0);
    assert!(!s.is_animating());
}

#[test]
fn random_key_sequences_settle_on_boundaries() {
    let mut rng = Lcg::new(0x5eed);
    for _case in 0..200 {
        let count = rng.gen_range_usize(1, 12);
        let (mut s, mut surface, log) = picker(count);
        let mut now = 0u64;

        for _ in 0..rng.gen_range_usize(1, 10) {
            let dir = if rng.gen_bool() {
                Direction::Forward
            } else {
                Direction::Backward
            };
            let _ = s.step(dir);
            let frames = rng.gen_range_usize(0, 30);
            for f in run_frames(&mut s, &mut surface, frames, &mut now) {
                assert!(f.position >= 0.0 && f.position <= surface.max_scroll());
            }
        }
        let next = s.scheduled();
        run(&mut s, &mut surface, next, &mut now);

        assert_eq!(s.position() % 36.0, 0.0, "count={count}");
        assert_eq!(s.selected_index(), Some(s.resolved_index()));
        let seen = announced(&log);
        for pair in seen.windows(2) {
            assert_ne!(pair[0], pair[1], "duplicate notification");
        }
        if s.resolved_index() == 0 {
            assert!(seen.last().is_none_or(|&i| i == 0));
        } else {
            assert_eq!(seen.last(), Some(&s.resolved_index()));
        }
        assert_eq!(s.anomaly_count(), 0);
    }
}

#[test]
fn negative_offset_is_repaired_and_motion_continues() {
    let (mut s, mut surface, log) = picker(5);
    let mut now = 0;
    let token = s.step(Direction::Forward);
    run_frames(&mut s, &mut surface, 4, &mut now);
    assert!(s.is_animating());
    assert_eq!(s.anomaly_count(), 0);

    let pending = s.pending_delta();
    assert_eq!(s.repair_offset(-3.0, pending), 0.0);
    assert_eq!(s.anomaly_count(), 1);
    assert_eq!(s.repair_offset(12.0, pending), 12.0);
    assert_eq!(s.anomaly_count(), 1);

    let next = s.scheduled();
    assert_ne!(next, token);
    run(&mut s, &mut surface, next, &mut now);
    assert_eq!(surface.position, 36.0);
    assert_eq!(announced(&log), [1]);
}
