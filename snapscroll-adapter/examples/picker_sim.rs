// Example: a headless "picker" driven by key presses, a click and a drag.
use snapscroll::{Direction, MemorySurface, ScrollerOptions, Selection};
use snapscroll_adapter::Controller;

const ROW: u32 = 36;

fn run_until_idle(c: &mut Controller<MemorySurface, &'static str>, now_ms: &mut u64) {
    while c.wants_tick() {
        // Simulate a 60fps frame callback.
        *now_ms += 16;
        if let Some(out) = c.tick(*now_ms) {
            if let Some(sel) = out.selection {
                println!("t={now_ms}ms settled on {} ({})", sel.index, sel.key);
            }
        }
    }
}

fn main() {
    let fruits = ["apple", "banana", "cherry", "damson", "elder"];
    let opts = ScrollerOptions::new_with_key(fruits.len(), ROW, move |i| fruits[i])
        .with_on_item_click(Some(|s: &Selection<&'static str>| {
            println!("clicked {}", s.key);
        }));

    // One visible row: the viewport is exactly one item tall.
    let surface = MemorySurface::for_items(fruits.len(), ROW, 1);
    let mut c = Controller::new(opts, surface).expect("valid picker configuration");
    let mut now_ms = 0u64;

    c.step(Direction::Forward);
    run_until_idle(&mut c, &mut now_ms);
    c.step(Direction::Forward);
    run_until_idle(&mut c, &mut now_ms);

    c.click_item(4);
    run_until_idle(&mut c, &mut now_ms);

    // Drag upward by 50px, hold for a few frames, then release.
    c.pointer_down(1, 400.0);
    c.pointer_move(1, 350.0);
    for _ in 0..3 {
        now_ms += 16;
        c.tick(now_ms);
    }
    println!("dragged to {}", c.surface().position);
    if let Some(sel) = c.pointer_up(1) {
        println!("released on {}", sel.key);
    }
    run_until_idle(&mut c, &mut now_ms);

    println!(
        "done: position={} index={:?}",
        c.surface().position,
        c.scroller().selected_index()
    );
}
