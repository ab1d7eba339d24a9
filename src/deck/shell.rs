use crate::content::{ContentStore, SectionId};

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 1024;

/// Top-level frame: which section is active and whether the sidebar shows.
#[derive(Debug, Clone)]
pub struct Shell {
    order: Vec<SectionId>,
    active: usize,
    sidebar_open: bool,
    is_mobile: bool,
}

impl Shell {
    pub fn new(store: &ContentStore) -> Self {
        Self {
            order: store.nav_items().iter().map(|item| item.id).collect(),
            active: 0,
            sidebar_open: true,
            is_mobile: false,
        }
    }

    pub fn active(&self) -> SectionId {
        self.order[self.active]
    }

    /// 1-based position and section count
    pub fn position(&self) -> (usize, usize) {
        (self.active + 1, self.order.len())
    }

    pub fn has_prev(&self) -> bool {
        self.active > 0
    }

    pub fn has_next(&self) -> bool {
        self.active + 1 < self.order.len()
    }

    /// Returns true when the active section changed.
    pub fn select(&mut self, id: SectionId) -> bool {
        let Some(idx) = self.order.iter().position(|&s| s == id) else {
            return false;
        };
        if self.is_mobile {
            self.sidebar_open = false;
        }
        let changed = idx != self.active;
        self.active = idx;
        changed
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.active += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.active -= 1;
        true
    }

    /// Section after `id` in navigation order.
    pub fn following(&self, id: SectionId) -> Option<SectionId> {
        let idx = self.order.iter().position(|&s| s == id)?;
        self.order.get(idx + 1).copied()
    }

    pub fn order(&self) -> &[SectionId] {
        &self.order
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_viewport_width(&mut self, width_px: u32) {
        self.is_mobile = width_px < MOBILE_BREAKPOINT_PX;
        if self.is_mobile {
            self.sidebar_open = false;
        }
    }
}
