//! Menu definitions: top-level menus and their items

use std::fmt;
use std::rc::Rc;

use unicode_width::UnicodeWidthStr;

use crate::window::DispatchContext;

/// What happens when an item is chosen
#[derive(Clone)]
pub enum MenuAction {
    /// Zero-argument callback
    Call(Rc<dyn Fn()>),
    /// Callback that may open further overlays, e.g. a dialog
    WithContext(Rc<dyn Fn(&mut DispatchContext)>),
}

impl MenuAction {
    pub fn invoke(&self, ctx: &mut DispatchContext) {
        match self {
            MenuAction::Call(action) => action(),
            MenuAction::WithContext(action) => action(ctx),
        }
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Call(_) => f.write_str("MenuAction::Call"),
            MenuAction::WithContext(_) => f.write_str("MenuAction::WithContext"),
        }
    }
}

/// Menu item
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Item label
    pub label: String,
    /// Action run on selection
    pub action: MenuAction,
}

impl MenuItem {
    /// Create an item with a zero-argument action
    pub fn new(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            action: MenuAction::Call(Rc::new(action)),
        }
    }

    /// Create an item whose action can push overlays onto the window
    pub fn with_context(
        label: impl Into<String>,
        action: impl Fn(&mut DispatchContext) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            action: MenuAction::WithContext(Rc::new(action)),
        }
    }

    /// Display width of the label in cells
    pub fn width(&self) -> usize {
        self.label.width()
    }
}

/// A top-level menu: a bar label and the items it opens
#[derive(Debug, Clone)]
pub struct Menu {
    pub label: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    /// Append an item
    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use ratatui::layout::Rect;

    use super::*;
    use crate::style::Palette;

    #[test]
    fn test_call_action_runs() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let item = MenuItem::new("open", move || seen.set(seen.get() + 1));

        let mut ctx = DispatchContext::new(Palette::default(), Rect::new(0, 0, 10, 10));
        item.action.invoke(&mut ctx);
        item.clone().action.invoke(&mut ctx);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_context_action_receives_context() {
        let item = MenuItem::with_context("about", |ctx| ctx.close());
        let mut ctx = DispatchContext::new(Palette::default(), Rect::new(0, 0, 10, 10));
        item.action.invoke(&mut ctx);
        assert!(ctx.close_requested());
    }

    #[test]
    fn test_menu_builder() {
        let menu = Menu::new("file", Vec::new())
            .item(MenuItem::new("open", || {}))
            .item(MenuItem::new("save", || {}));
        assert_eq!(menu.items.len(), 2);
        assert_eq!(menu.items[1].label, "save");
        assert_eq!(menu.items[0].width(), 4);
    }
}
