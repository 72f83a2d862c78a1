//! Component traits for the menu bar framework
//!
//! Capabilities are split the same way the rest of the TUI splits them: a
//! widget renders, may handle input, and may take focus. Overlays and window
//! layouts are the two composite roles built on top.

use std::any::Any;

use ratatui::{buffer::Buffer, layout::Rect};

use crate::event::Event;
use crate::style::Palette;
use crate::window::DispatchContext;

/// Result of event handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// The event was handled and must not travel further
    Consumed,
    /// The event was not handled and falls through to the next receiver
    Ignored,
    /// A control was activated; carries the control's identifying key
    Clicked(String),
}

impl EventResult {
    /// Whether the event stops here
    pub fn is_consumed(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Core rendering capability
pub trait Renderable {
    /// Draw into the buffer at the position assigned by the last layout pass
    fn render(&self, buf: &mut Buffer, palette: &Palette);
}

/// Interactive capability - components that handle user input
pub trait Interactive {
    fn handle_event(&mut self, event: &Event, ctx: &mut DispatchContext) -> EventResult;
}

/// Focusable capability - components that can receive keyboard focus
pub trait Focusable {
    fn can_focus(&self) -> bool;
    fn is_focused(&self) -> bool;
    fn set_focused(&mut self, focused: bool);
}

/// A widget that lives inside a layout column
pub trait Control: Renderable + Interactive + Focusable {
    /// Identifying key used by `ColumnLayout::find_widget`
    fn name(&self) -> Option<&str>;

    /// Rectangle assigned by the last layout pass
    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);

    /// Top-left corner of the control on screen
    fn location(&self) -> (u16, u16) {
        let bounds = self.bounds();
        (bounds.x, bounds.y)
    }

    /// Rows this control needs
    fn required_height(&self) -> u16 {
        1
    }
}

/// An ephemeral object on the window's overlay stack
pub trait Overlay: Renderable + Interactive {
    /// Identifier used for logging and inspection
    fn id(&self) -> &str;
}

/// A row of the window's base widget tree
pub trait WindowLayout: Renderable + Interactive {
    /// Assign positions inside `area`, returning the number of rows used
    fn layout(&mut self, area: Rect) -> u16;

    /// Area assigned by the last layout pass
    fn area(&self) -> Rect;

    /// Move focus forward; `false` when focus leaves this layout
    fn focus_next(&mut self) -> bool;

    /// Move focus backward; `false` when focus leaves this layout
    fn focus_prev(&mut self) -> bool;

    fn clear_focus(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
