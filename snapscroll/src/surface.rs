/// The rendering collaborator's scroll surface, as seen by the engine.
///
/// Extents are read every frame, so a host may resize the viewport or content mid-animation.
/// The engine owns the logical position and writes it back through `set_scroll_position`.
pub trait ScrollSurface {
    fn viewport_extent(&self) -> f64;
    fn content_extent(&self) -> f64;
    fn scroll_position(&self) -> f64;
    fn set_scroll_position(&mut self, position: f64);

    /// Largest reachable position (`content - viewport`, never negative).
    fn max_scroll(&self) -> f64 {
        (self.content_extent() - self.viewport_extent()).max(0.0)
    }
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for &mut S {
    fn viewport_extent(&self) -> f64 {
        (**self).viewport_extent()
    }

    fn content_extent(&self) -> f64 {
        (**self).content_extent()
    }

    fn scroll_position(&self) -> f64 {
        (**self).scroll_position()
    }

    fn set_scroll_position(&mut self, position: f64) {
        (**self).set_scroll_position(position);
    }
}

/// A surface with no UI behind it: plain extents plus a stored position.
///
/// Useful for headless hosts, simulations and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemorySurface {
    pub viewport: f64,
    pub content: f64,
    pub position: f64,
}

impl MemorySurface {
    pub fn new(viewport: f64, content: f64) -> Self {
        Self {
            viewport,
            content,
            position: 0.0,
        }
    }

    /// A surface sized for `count` items of `item_height`, with a viewport of `visible` rows.
    pub fn for_items(count: usize, item_height: u32, visible: usize) -> Self {
        let h = item_height as f64;
        Self::new(visible as f64 * h, count as f64 * h)
    }
}

impl ScrollSurface for MemorySurface {
    fn viewport_extent(&self) -> f64 {
        self.viewport
    }

    fn content_extent(&self) -> f64 {
        self.content
    }

    fn scroll_position(&self) -> f64 {
        self.position
    }

    fn set_scroll_position(&mut self, position: f64) {
        self.position = position;
    }
}
