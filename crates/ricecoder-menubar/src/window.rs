//! Owning window: base layouts plus the overlay stack
//!
//! Input goes to the topmost overlay first and falls through to the base
//! layouts only when no overlay consumes it. Rendering runs the other way:
//! base layouts first, then overlays bottom-up, so the last-pushed overlay
//! is drawn on top.
//!
//! Handlers never mutate the stack directly. They record requests on the
//! [`DispatchContext`] and the window applies them once dispatch returns:
//! closes first, then pushes in the order they were requested.

use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::{buffer::Buffer, layout::Rect};

use crate::components::traits::{Interactive, Overlay, Renderable, WindowLayout};
use crate::event::{Event, KeyCode};
use crate::style::Palette;

/// Tag identifying who owns an overlay, used for replace-on-open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayKey(u64);

impl OverlayKey {
    /// Allocate a key no other caller will receive
    pub fn unique() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a layout added with [`Window::add_layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutId(usize);

/// Overlay waiting to be pushed once dispatch completes
struct OverlayRequest {
    key: Option<OverlayKey>,
    overlay: Box<dyn Overlay>,
}

/// Context handed to every event handler during one dispatch
pub struct DispatchContext {
    palette: Palette,
    window_area: Rect,
    requests: Vec<OverlayRequest>,
    close_requested: bool,
}

impl DispatchContext {
    pub fn new(palette: Palette, window_area: Rect) -> Self {
        Self {
            palette,
            window_area,
            requests: Vec::new(),
            close_requested: false,
        }
    }

    /// Palette of the owning window
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Area of the owning window
    pub fn window_area(&self) -> Rect {
        self.window_area
    }

    /// Push an overlay on top of the stack once dispatch completes
    pub fn push_overlay(&mut self, overlay: Box<dyn Overlay>) {
        self.requests.push(OverlayRequest { key: None, overlay });
    }

    /// Remove any overlay tagged `key`, then push `overlay` with that tag
    pub fn replace_overlay(&mut self, key: OverlayKey, overlay: Box<dyn Overlay>) {
        self.requests.push(OverlayRequest {
            key: Some(key),
            overlay,
        });
    }

    /// Ask for the overlay currently handling the event to be removed
    pub fn close(&mut self) {
        self.close_requested = true;
    }

    /// Number of overlays requested so far
    pub fn pending_overlays(&self) -> usize {
        self.requests.len()
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn take_close(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }
}

struct OverlayEntry {
    key: Option<OverlayKey>,
    overlay: Box<dyn Overlay>,
}

/// Ordered stack of active overlays; the last entry is the topmost
#[derive(Default)]
pub struct OverlayStack {
    entries: Vec<OverlayEntry>,
}

impl OverlayStack {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay ids bottom-up
    pub fn ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.overlay.id().to_string())
            .collect()
    }

    pub fn push(&mut self, overlay: Box<dyn Overlay>) {
        self.open(None, overlay);
    }

    /// Number of overlays carrying `key`
    pub fn count_with_key(&self, key: OverlayKey) -> usize {
        self.entries.iter().filter(|e| e.key == Some(key)).count()
    }

    fn open(&mut self, key: Option<OverlayKey>, overlay: Box<dyn Overlay>) {
        tracing::debug!(overlay = overlay.id(), "Overlay opened");
        self.entries.push(OverlayEntry { key, overlay });
    }

    fn remove_at(&mut self, index: usize) {
        let entry = self.entries.remove(index);
        tracing::debug!(overlay = entry.overlay.id(), "Overlay closed");
    }

    fn remove_keyed(&mut self, key: OverlayKey) {
        while let Some(index) = self.entries.iter().position(|e| e.key == Some(key)) {
            self.remove_at(index);
        }
    }

    fn apply(&mut self, mut closing: Vec<usize>, requests: Vec<OverlayRequest>) {
        closing.sort_unstable_by(|a, b| b.cmp(a));
        closing.dedup();
        for index in closing {
            if index < self.entries.len() {
                self.remove_at(index);
            }
        }

        for OverlayRequest { key, overlay } in requests {
            if let Some(key) = key {
                self.remove_keyed(key);
            }
            self.open(key, overlay);
        }
    }

    fn render(&self, buf: &mut Buffer, palette: &Palette) {
        for entry in &self.entries {
            entry.overlay.render(buf, palette);
        }
    }
}

/// Window hosting a menu bar and the popups it spawns
pub struct Window {
    area: Rect,
    palette: Palette,
    layouts: Vec<Box<dyn WindowLayout>>,
    focus: Option<usize>,
    overlays: OverlayStack,
}

impl Window {
    /// Create a window of the given size in cells
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            area: Rect::new(0, 0, width, height),
            palette: Palette::default(),
            layouts: Vec::new(),
            focus: None,
            overlays: OverlayStack::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Resize the window and lay the base rows out again
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(self.area.x, self.area.y, width, height);
        self.fix();
    }

    /// Add a row to the base widget tree
    pub fn add_layout(&mut self, layout: Box<dyn WindowLayout>) -> LayoutId {
        self.layouts.push(layout);
        self.fix();
        LayoutId(self.layouts.len() - 1)
    }

    /// Borrow a layout back as its concrete type
    pub fn layout<T: 'static>(&self, id: LayoutId) -> Option<&T> {
        self.layouts.get(id.0)?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow a layout back as its concrete type
    pub fn layout_mut<T: 'static>(&mut self, id: LayoutId) -> Option<&mut T> {
        self.layouts.get_mut(id.0)?.as_any_mut().downcast_mut::<T>()
    }

    /// Stack the base layouts top-down inside the window area
    pub fn fix(&mut self) {
        let mut y = self.area.y;
        for layout in self.layouts.iter_mut() {
            let remaining = self.area.bottom().saturating_sub(y);
            let used = layout.layout(Rect::new(self.area.x, y, self.area.width, remaining));
            y = y.saturating_add(used);
        }
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn has_overlays(&self) -> bool {
        !self.overlays.is_empty()
    }

    /// Overlay ids bottom-up
    pub fn overlay_ids(&self) -> Vec<String> {
        self.overlays.ids()
    }

    /// Push an overlay from outside event dispatch
    pub fn add_overlay(&mut self, overlay: Box<dyn Overlay>) {
        self.overlays.push(overlay);
    }

    /// Deliver one event, returning whether anything consumed it
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Resize { width, height } = *event {
            self.resize(width, height);
            return true;
        }

        let mut ctx = DispatchContext::new(self.palette.clone(), self.area);
        let mut closing = Vec::new();
        let mut consumed = false;

        for index in (0..self.overlays.entries.len()).rev() {
            let result = self.overlays.entries[index]
                .overlay
                .handle_event(event, &mut ctx);
            if ctx.take_close() {
                closing.push(index);
            }
            if result.is_consumed() {
                consumed = true;
                break;
            }
        }

        if !consumed {
            consumed = self.dispatch_base(event, &mut ctx);
        }

        let requests = std::mem::take(&mut ctx.requests);
        self.overlays.apply(closing, requests);
        consumed
    }

    fn dispatch_base(&mut self, event: &Event, ctx: &mut DispatchContext) -> bool {
        match event {
            Event::Key(key) if key.code == KeyCode::Tab => self.cycle_focus(true),
            Event::Key(key) if key.code == KeyCode::BackTab => self.cycle_focus(false),
            Event::Key(_) => match self.focus {
                Some(index) => self.layouts[index].handle_event(event, ctx).is_consumed(),
                None => false,
            },
            Event::Mouse(mouse) => {
                let point = ratatui::layout::Position::new(mouse.x, mouse.y);
                let Some(index) = self.layouts.iter().position(|l| l.area().contains(point))
                else {
                    return false;
                };
                let consumed = self.layouts[index].handle_event(event, ctx).is_consumed();
                if consumed && mouse.is_press() && self.focus != Some(index) {
                    if let Some(previous) = self.focus.replace(index) {
                        self.layouts[previous].clear_focus();
                    }
                }
                consumed
            }
            _ => false,
        }
    }

    fn cycle_focus(&mut self, forward: bool) -> bool {
        let count = self.layouts.len();
        if count == 0 {
            return false;
        }
        let start = self.focus.unwrap_or(if forward { 0 } else { count - 1 });
        for step in 0..=count {
            let index = if forward {
                (start + step) % count
            } else {
                (start + count - step % count) % count
            };
            let layout = &mut self.layouts[index];
            let moved = if forward {
                layout.focus_next()
            } else {
                layout.focus_prev()
            };
            if moved {
                self.focus = Some(index);
                return true;
            }
            layout.clear_focus();
        }
        self.focus = None;
        false
    }

    /// Draw base layouts then overlays
    pub fn render(&self, buf: &mut Buffer) {
        self.render_base(buf);
        self.render_overlays(buf);
    }

    pub fn render_base(&self, buf: &mut Buffer) {
        for layout in &self.layouts {
            layout.render(buf, &self.palette);
        }
    }

    pub fn render_overlays(&self, buf: &mut Buffer) {
        self.overlays.render(buf, &self.palette);
    }
}
