// Example: continuous trackpad panning settles only after the fingers go quiet.
use snapscroll::{MemorySurface, ScrollerOptions, Selection};
use snapscroll_adapter::Controller;

fn main() {
    let opts = ScrollerOptions::new(50, 24)
        .with_pan_settle_delay_ms(300)
        .with_on_select(Some(|s: &Selection<u64>| println!("selected {}", s.index)));
    let surface = MemorySurface::for_items(50, 24, 5);
    let mut c = Controller::new(opts, surface).expect("valid configuration");

    let mut now_ms = 0u64;
    // A short burst of fractional deltas, one every other frame.
    for delta in [3.5, 6.25, 9.0, 7.75, 4.5, 2.0, 0.75] {
        c.wheel_auto(delta, now_ms);
        for _ in 0..2 {
            now_ms += 16;
            c.tick(now_ms);
        }
        println!("t={now_ms}ms position={}", c.surface().position);
    }

    while c.wants_tick() {
        now_ms += 16;
        c.tick(now_ms);
    }

    println!(
        "settled at t={now_ms}ms position={} index={}",
        c.surface().position,
        c.scroller().resolved_index()
    );
}
