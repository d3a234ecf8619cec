use std::sync::Arc;

use crate::{CubicBezier, ItemKey, Selection};

/// Called once per distinct settled index, in settle order.
pub type OnSelectCallback<K> = Arc<dyn Fn(&Selection<K>) + Send + Sync>;

/// Called for raw item interactions (clicks/taps), regardless of settle state.
pub type OnItemClickCallback<K> = Arc<dyn Fn(&Selection<K>) + Send + Sync>;

pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;
pub const DEFAULT_MIN_ANIMATION_DURATION_MS: u64 = 60;
pub const DEFAULT_PAN_SETTLE_DELAY_MS: u64 = 500;

/// Configuration for [`crate::Scroller`].
///
/// Cheap to clone: callbacks live in `Arc`s. Values are validated once, by `Scroller::new`.
pub struct ScrollerOptions<K = ItemKey> {
    pub count: usize,
    pub get_item_key: Arc<dyn Fn(usize) -> K + Send + Sync>,

    /// Fixed extent of one item; the snap quantum.
    pub item_height: u32,

    /// Time to ease across a single item when only one item is pending.
    pub animation_duration_ms: u64,
    /// Lower bound for the per-item duration when a large delta is pending.
    pub min_animation_duration_ms: u64,
    pub easing: CubicBezier,

    /// Quiet period after the last continuous pan event before the scroller settles.
    pub pan_settle_delay_ms: u64,

    /// Item shown (and considered announced) at construction.
    pub initial_index: usize,

    pub on_select: Option<OnSelectCallback<K>>,
    pub on_item_click: Option<OnItemClickCallback<K>>,
}

impl<K> Clone for ScrollerOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            get_item_key: Arc::clone(&self.get_item_key),
            item_height: self.item_height,
            animation_duration_ms: self.animation_duration_ms,
            min_animation_duration_ms: self.min_animation_duration_ms,
            easing: self.easing,
            pan_settle_delay_ms: self.pan_settle_delay_ms,
            initial_index: self.initial_index,
            on_select: self.on_select.clone(),
            on_item_click: self.on_item_click.clone(),
        }
    }
}

impl ScrollerOptions<ItemKey> {
    /// Creates options for a list keyed by index (`ItemKey = u64`).
    pub fn new(count: usize, item_height: u32) -> Self {
        Self::new_with_key(count, item_height, |i| i as u64)
    }
}

impl<K> ScrollerOptions<K> {
    /// Creates options with a custom index → item identity mapping.
    pub fn new_with_key(
        count: usize,
        item_height: u32,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            get_item_key: Arc::new(get_item_key),
            item_height,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            min_animation_duration_ms: DEFAULT_MIN_ANIMATION_DURATION_MS,
            easing: CubicBezier::default(),
            pan_settle_delay_ms: DEFAULT_PAN_SETTLE_DELAY_MS,
            initial_index: 0,
            on_select: None,
            on_item_click: None,
        }
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    pub fn with_min_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.min_animation_duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: CubicBezier) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_pan_settle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.pan_settle_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn with_on_select(
        mut self,
        on_select: Option<impl Fn(&Selection<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_select = on_select.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_item_click(
        mut self,
        on_item_click: Option<impl Fn(&Selection<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_item_click = on_item_click.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> core::fmt::Debug for ScrollerOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollerOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("animation_duration_ms", &self.animation_duration_ms)
            .field("min_animation_duration_ms", &self.min_animation_duration_ms)
            .field("easing", &self.easing)
            .field("pan_settle_delay_ms", &self.pan_settle_delay_ms)
            .field("initial_index", &self.initial_index)
            .finish_non_exhaustive()
    }
}
