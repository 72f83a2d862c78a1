//! Menu bar widget
//!
//! A single-row [`ColumnLayout`] holding one boxless [`Button`] per top-level
//! menu. Clicking a label opens a [`PopupMenu`] one row below it on the
//! owning window's overlay stack.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use ratatui::{buffer::Buffer, layout::Rect};
use unicode_width::UnicodeWidthStr;

use super::button::Button;
use super::menu::{Menu, MenuItem};
use super::popup_menu::PopupMenu;
use super::traits::{Control, EventResult, Interactive, Renderable, WindowLayout};
use crate::error::{MenuError, MenuResult};
use crate::event::Event;
use crate::layout::ColumnLayout;
use crate::style::Palette;
use crate::window::{DispatchContext, OverlayKey, Window};

/// Cells added to each label's width to form its column
const LABEL_PADDING: u16 = 2;

/// Spacing between menu columns
const GUTTER: u16 = 1;

/// Menu bar widget
pub struct MenuBar {
    layout: ColumnLayout,
    labels: Vec<String>,
    registry: HashMap<String, Vec<MenuItem>>,
    bordered: bool,
    key: OverlayKey,
}

impl MenuBar {
    /// Build a bar sized to `owner`'s width
    ///
    /// Each label gets a column of its width plus padding; a final column
    /// takes whatever is left so the bar spans the window. When the labels
    /// overflow the window that trailing column is zero and labels past the
    /// right edge are clipped.
    pub fn new(owner: &Window, menus: Vec<Menu>, bordered: bool) -> MenuResult<Self> {
        let mut seen = HashSet::new();
        for menu in &menus {
            if !seen.insert(menu.label.as_str()) {
                return Err(MenuError::DuplicateMenu {
                    label: menu.label.clone(),
                });
            }
        }

        let columns = column_widths(menus.iter().map(|m| m.label.as_str()), owner.width());
        let mut layout = ColumnLayout::new(columns, GUTTER, false);
        let mut labels = Vec::with_capacity(menus.len());
        let mut registry = HashMap::with_capacity(menus.len());

        for (column, menu) in menus.into_iter().enumerate() {
            let button = Button::new(menu.label.clone())
                .with_name(menu.label.clone())
                .without_box()
                .with_tab_stop(true);
            layout.add_widget(column, Box::new(button));
            labels.push(menu.label.clone());
            registry.insert(menu.label, menu.items);
        }

        tracing::debug!(menus = labels.len(), bordered, "Menu bar created");

        Ok(Self {
            layout,
            labels,
            registry,
            bordered,
            key: OverlayKey::unique(),
        })
    }

    /// Column widths, trailing filler column included
    pub fn columns(&self) -> &[u16] {
        self.layout.columns()
    }

    /// Top-level labels in display order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Items currently registered for a label
    pub fn items(&self, label: &str) -> Option<&[MenuItem]> {
        self.registry.get(label).map(Vec::as_slice)
    }

    pub fn is_bordered(&self) -> bool {
        self.bordered
    }

    /// Tag placed on popups this bar opens
    pub fn overlay_key(&self) -> OverlayKey {
        self.key
    }

    /// On-screen position of a label after layout
    pub fn label_location(&self, label: &str) -> Option<(u16, u16)> {
        self.layout.find_widget(label).map(|w| w.location())
    }

    /// Replace the items of an existing menu
    ///
    /// The set of menus is fixed at construction, so unknown labels are
    /// rejected and the registry is left untouched. Popups already open keep
    /// showing the items they were opened with.
    pub fn update_items(&mut self, label: &str, items: Vec<MenuItem>) -> MenuResult<()> {
        let Some(entry) = self.registry.get_mut(label) else {
            tracing::warn!(menu = label, "Rejected item update for unknown menu");
            return Err(MenuError::unknown_menu(label));
        };
        tracing::debug!(menu = label, items = items.len(), "Menu items updated");
        *entry = items;
        Ok(())
    }

    /// Open the popup for `label` below its control
    pub(crate) fn activate(&self, label: &str, ctx: &mut DispatchContext) {
        let (Some(items), Some((x, y))) = (self.registry.get(label), self.label_location(label))
        else {
            tracing::warn!(menu = label, "Activation for unknown menu");
            return;
        };

        let popup = PopupMenu::new(
            items.clone(),
            (x, y.saturating_add(1)),
            self.bordered,
            ctx.palette().clone(),
            ctx.window_area(),
        )
        .with_id(format!("popup:{}", label));

        tracing::debug!(menu = label, x, y = y + 1, "Menu activated");
        ctx.replace_overlay(self.key, Box::new(popup));
    }
}

/// Column widths for a row of labels spanning `total_width` cells
pub fn column_widths<'a>(labels: impl IntoIterator<Item = &'a str>, total_width: u16) -> Vec<u16> {
    let mut columns: Vec<u16> = labels
        .into_iter()
        .map(|label| (label.width() as u16).saturating_add(LABEL_PADDING))
        .collect();
    let used = columns.iter().fold(0u16, |acc, w| acc.saturating_add(*w));
    columns.push(total_width.saturating_sub(used));
    columns
}

impl Renderable for MenuBar {
    fn render(&self, buf: &mut Buffer, palette: &Palette) {
        self.layout.render(buf, palette);
    }
}

impl Interactive for MenuBar {
    fn handle_event(&mut self, event: &Event, ctx: &mut DispatchContext) -> EventResult {
        match self.layout.handle_event(event, ctx) {
            EventResult::Clicked(label) => {
                self.activate(&label, ctx);
                EventResult::Consumed
            }
            other => other,
        }
    }
}

impl WindowLayout for MenuBar {
    fn layout(&mut self, area: Rect) -> u16 {
        self.layout.layout(area)
    }

    fn area(&self) -> Rect {
        self.layout.area()
    }

    fn focus_next(&mut self) -> bool {
        self.layout.focus_next()
    }

    fn focus_prev(&mut self) -> bool {
        self.layout.focus_prev()
    }

    fn clear_focus(&mut self) {
        self.layout.clear_focus();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
