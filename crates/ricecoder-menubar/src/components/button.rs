//! Labeled, clickable control

use std::fmt;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};
use unicode_width::UnicodeWidthStr;

use super::traits::{Control, EventResult, Focusable, Interactive, Renderable};
use crate::event::{Event, KeyCode, MouseButton, MouseEventKind};
use crate::style::Palette;
use crate::window::DispatchContext;

/// Button widget
pub struct Button {
    label: String,
    name: Option<String>,
    on_click: Option<Box<dyn FnMut()>>,
    add_box: bool,
    tab_stop: bool,
    focused: bool,
    bounds: Rect,
}

impl Button {
    /// Create a boxed, focusable button
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: None,
            on_click: None,
            add_box: true,
            tab_stop: true,
            focused: false,
            bounds: Rect::default(),
        }
    }

    /// Set the identifying key
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the click callback
    pub fn with_on_click(mut self, on_click: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Draw the bare label without the `< >` box
    pub fn without_box(mut self) -> Self {
        self.add_box = false;
        self
    }

    pub fn with_tab_stop(mut self, tab_stop: bool) -> Self {
        self.tab_stop = tab_stop;
        self
    }

    /// Get the label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Text as drawn on screen
    pub fn display_text(&self) -> String {
        if self.add_box {
            format!("< {} >", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Cells needed to show the label in full
    pub fn display_width(&self) -> u16 {
        self.display_text().width() as u16
    }

    fn click(&mut self) -> EventResult {
        if let Some(on_click) = self.on_click.as_mut() {
            on_click();
        }
        let key = self.name.clone().unwrap_or_else(|| self.label.clone());
        tracing::trace!(control = %key, "Button clicked");
        EventResult::Clicked(key)
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("name", &self.name)
            .field("add_box", &self.add_box)
            .field("focused", &self.focused)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl Renderable for Button {
    fn render(&self, buf: &mut Buffer, palette: &Palette) {
        let area = self.bounds.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let style = if self.focused {
            palette.focused_label
        } else {
            palette.label
        };
        buf.set_stringn(area.x, area.y, self.display_text(), area.width as usize, style);
    }
}

impl Interactive for Button {
    fn handle_event(&mut self, event: &Event, _ctx: &mut DispatchContext) -> EventResult {
        match event {
            Event::Mouse(mouse) => {
                if !self.bounds.contains(Position::new(mouse.x, mouse.y)) {
                    return EventResult::Ignored;
                }
                match mouse.kind {
                    MouseEventKind::Press(MouseButton::Left) => self.click(),
                    _ => EventResult::Ignored,
                }
            }
            Event::Key(key) if self.focused => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.click(),
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }
}

impl Focusable for Button {
    fn can_focus(&self) -> bool {
        self.tab_stop
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Control for Button {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}
