//! Popup menu overlay
//!
//! A popup lists the items of one menu at a fixed position and captures input
//! while it is open. Choosing an item runs its action and closes the popup;
//! pressing outside the box, or Esc, closes it without running anything.
//!
//! The item list is a snapshot taken when the popup is created, so later
//! registry updates do not change a popup that is already on screen.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{Block, Borders, Clear, Widget},
};

use super::menu::MenuItem;
use super::traits::{EventResult, Interactive, Overlay, Renderable};
use crate::event::{Event, KeyCode, MouseButton, MouseEventKind};
use crate::style::Palette;
use crate::window::DispatchContext;

/// Popup lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Open,
    Closed,
}

/// Popup menu overlay
#[derive(Debug)]
pub struct PopupMenu {
    id: String,
    items: Vec<MenuItem>,
    bordered: bool,
    palette: Palette,
    /// On-screen box after shifting and clipping to the window
    bounds: Rect,
    selected: usize,
    state: PopupState,
}

impl PopupMenu {
    /// Create a popup whose top-left corner sits at `origin`
    ///
    /// The box is shifted left when it would run past the right edge of
    /// `window_area`; whatever still does not fit is clipped.
    pub fn new(
        items: Vec<MenuItem>,
        origin: (u16, u16),
        bordered: bool,
        palette: Palette,
        window_area: Rect,
    ) -> Self {
        let border = if bordered { 2 } else { 0 };
        let content_width = items.iter().map(MenuItem::width).max().unwrap_or(0);
        let width = (content_width as u16).saturating_add(border);
        let height = (items.len() as u16).saturating_add(border);

        let (mut x, y) = origin;
        if x.saturating_add(width) > window_area.right() {
            x = window_area.right().saturating_sub(width).max(window_area.x);
        }
        let bounds = Rect::new(x, y, width, height).intersection(window_area);

        Self {
            id: "popup".to_string(),
            items,
            bordered,
            palette,
            bounds,
            selected: 0,
            state: PopupState::Open,
        }
    }

    /// Set the identifier reported to the overlay stack
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Labels in display order
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_bordered(&self) -> bool {
        self.bordered
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Index of the highlighted row
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PopupState::Open
    }

    /// Area holding the item rows
    fn inner(&self) -> Rect {
        if self.bordered {
            Block::default().borders(Borders::ALL).inner(self.bounds)
        } else {
            self.bounds
        }
    }

    /// Item index under a screen cell, if any visible row is there
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        let inner = self.inner();
        if !inner.contains(Position::new(x, y)) {
            return None;
        }
        let index = (y - inner.y) as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Rows left visible after clipping to the window
    fn visible_rows(&self) -> usize {
        (self.inner().height as usize).min(self.items.len())
    }

    /// Move highlight down, wrapping to the first visible row
    pub fn select_next(&mut self) {
        let rows = self.visible_rows();
        if rows == 0 {
            return;
        }
        self.selected = (self.selected + 1) % rows;
    }

    /// Move highlight up, wrapping to the last visible row
    pub fn select_prev(&mut self) {
        let rows = self.visible_rows();
        if rows == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            rows - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows().saturating_sub(1);
    }

    fn choose(&mut self, index: usize, ctx: &mut DispatchContext) {
        if index >= self.visible_rows() {
            return;
        }
        let Some(item) = self.items.get(index) else {
            return;
        };
        let action = item.action.clone();
        tracing::debug!(popup = %self.id, item = %item.label, "Menu item selected");
        action.invoke(ctx);
        self.close(ctx);
    }

    fn close(&mut self, ctx: &mut DispatchContext) {
        self.state = PopupState::Closed;
        ctx.close();
    }

    fn handle_mouse(
        &mut self,
        x: u16,
        y: u16,
        kind: MouseEventKind,
        ctx: &mut DispatchContext,
    ) -> EventResult {
        let inside = self.bounds.contains(Position::new(x, y));
        match kind {
            MouseEventKind::Press(button) => {
                if !inside {
                    tracing::debug!(popup = %self.id, "Dismissed by outside click");
                    self.close(ctx);
                } else if button == MouseButton::Left {
                    if let Some(index) = self.row_at(x, y) {
                        self.selected = index;
                        self.choose(index, ctx);
                    }
                }
                EventResult::Consumed
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if !inside {
                    return EventResult::Ignored;
                }
                if let Some(index) = self.row_at(x, y) {
                    self.selected = index;
                }
                EventResult::Consumed
            }
            MouseEventKind::ScrollUp if inside => {
                self.select_prev();
                EventResult::Consumed
            }
            MouseEventKind::ScrollDown if inside => {
                self.select_next();
                EventResult::Consumed
            }
            MouseEventKind::Release(_) if inside => EventResult::Consumed,
            _ => EventResult::Ignored,
        }
    }
}

impl Renderable for PopupMenu {
    /// Draws with the palette captured at activation, not the one passed in
    fn render(&self, buf: &mut Buffer, _palette: &Palette) {
        let area = self.bounds.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        Clear.render(area, buf);

        if self.bordered {
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.palette.popup_border)
                .style(self.palette.popup_item)
                .render(area, buf);
        } else {
            buf.set_style(area, self.palette.popup_item);
        }

        let inner = self.inner().intersection(buf.area);
        for (index, item) in self.items.iter().enumerate().take(inner.height as usize) {
            let style = if index == self.selected {
                self.palette.popup_selected
            } else {
                self.palette.popup_item
            };
            let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
            buf.set_style(row, style);
            buf.set_stringn(row.x, row.y, &item.label, row.width as usize, style);
        }
    }
}

impl Interactive for PopupMenu {
    fn handle_event(&mut self, event: &Event, ctx: &mut DispatchContext) -> EventResult {
        if self.state == PopupState::Closed {
            return EventResult::Ignored;
        }
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse.x, mouse.y, mouse.kind, ctx),
            Event::Key(key) => {
                match key.code {
                    KeyCode::Esc => {
                        tracing::debug!(popup = %self.id, "Cancelled");
                        self.close(ctx);
                    }
                    KeyCode::Up => self.select_prev(),
                    KeyCode::Down => self.select_next(),
                    KeyCode::Home => self.select_first(),
                    KeyCode::End => self.select_last(),
                    KeyCode::Enter => self.choose(self.selected, ctx),
                    _ => {}
                }
                EventResult::Consumed
            }
            Event::Resize { .. } | Event::Tick => EventResult::Ignored,
        }
    }
}

impl Overlay for PopupMenu {
    fn id(&self) -> &str {
        &self.id
    }
}
