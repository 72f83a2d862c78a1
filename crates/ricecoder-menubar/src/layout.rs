//! Column layout container
//!
//! A layout splits one horizontal band of the window into fixed-width
//! columns. Widgets added to a column stack top-down, one row each.

use std::any::Any;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::components::traits::{
    Control, EventResult, Focusable, Interactive, Renderable, WindowLayout,
};
use crate::event::Event;
use crate::style::Palette;
use crate::window::DispatchContext;

/// Column layout manager
pub struct ColumnLayout {
    columns: Vec<u16>,
    gutter: u16,
    fill_frame: bool,
    widgets: Vec<Vec<Box<dyn Control>>>,
    /// (column, row) of the focused widget
    focus: Option<(usize, usize)>,
    area: Rect,
}

impl ColumnLayout {
    /// Create a layout with explicit column widths in cells
    pub fn new(columns: Vec<u16>, gutter: u16, fill_frame: bool) -> Self {
        let widgets = columns.iter().map(|_| Vec::new()).collect();
        Self {
            columns,
            gutter,
            fill_frame,
            widgets,
            focus: None,
            area: Rect::default(),
        }
    }

    /// Column widths
    pub fn columns(&self) -> &[u16] {
        &self.columns
    }

    pub fn gutter(&self) -> u16 {
        self.gutter
    }

    /// Add a widget to the bottom of a column
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn add_widget(&mut self, column: usize, widget: Box<dyn Control>) {
        assert!(
            column < self.columns.len(),
            "Column {} out of range for a {}-column layout",
            column,
            self.columns.len()
        );
        self.widgets[column].push(widget);
    }

    /// Find a previously added widget by its key
    pub fn find_widget(&self, name: &str) -> Option<&dyn Control> {
        self.widgets
            .iter()
            .flatten()
            .find(|w| w.name() == Some(name))
            .map(|w| w.as_ref())
    }

    /// Total number of widgets across all columns
    pub fn widget_count(&self) -> usize {
        self.widgets.iter().map(Vec::len).sum()
    }

    /// Key of the focused widget
    pub fn focused_name(&self) -> Option<&str> {
        let (column, row) = self.focus?;
        self.widgets[column][row].name()
    }

    /// Focusable widget positions in traversal order (column-major)
    fn focus_order(&self) -> Vec<(usize, usize)> {
        self.widgets
            .iter()
            .enumerate()
            .flat_map(|(column, widgets)| {
                widgets
                    .iter()
                    .enumerate()
                    .filter(|(_, w)| w.can_focus())
                    .map(move |(row, _)| (column, row))
            })
            .collect()
    }

    fn set_focus(&mut self, target: Option<(usize, usize)>) {
        if let Some((column, row)) = self.focus.take() {
            self.widgets[column][row].set_focused(false);
        }
        if let Some((column, row)) = target {
            self.widgets[column][row].set_focused(true);
        }
        self.focus = target;
    }

    fn step_focus(&mut self, forward: bool) -> bool {
        let order = self.focus_order();
        let next = match self.focus.and_then(|f| order.iter().position(|&p| p == f)) {
            None if forward => order.first().copied(),
            None => order.last().copied(),
            Some(index) if forward => order.get(index + 1).copied(),
            Some(index) => index.checked_sub(1).and_then(|i| order.get(i).copied()),
        };
        self.set_focus(next);
        next.is_some()
    }
}

impl Renderable for ColumnLayout {
    fn render(&self, buf: &mut Buffer, palette: &Palette) {
        let area = self.area.intersection(buf.area);
        if !area.is_empty() {
            buf.set_style(area, palette.background);
        }
        for widget in self.widgets.iter().flatten() {
            widget.render(buf, palette);
        }
    }
}

impl Interactive for ColumnLayout {
    fn handle_event(&mut self, event: &Event, ctx: &mut DispatchContext) -> EventResult {
        match event {
            Event::Mouse(mouse) => {
                let point = Position::new(mouse.x, mouse.y);
                let hit = self.widgets.iter().enumerate().find_map(|(column, widgets)| {
                    widgets
                        .iter()
                        .position(|w| w.bounds().contains(point))
                        .map(|row| (column, row))
                });
                let Some((column, row)) = hit else {
                    return EventResult::Ignored;
                };
                if mouse.is_press() && self.widgets[column][row].can_focus() {
                    self.set_focus(Some((column, row)));
                }
                self.widgets[column][row].handle_event(event, ctx)
            }
            Event::Key(_) => match self.focus {
                Some((column, row)) => self.widgets[column][row].handle_event(event, ctx),
                None => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }
}

impl WindowLayout for ColumnLayout {
    fn layout(&mut self, area: Rect) -> u16 {
        let rows = self
            .widgets
            .iter()
            .map(|column| column.iter().map(|w| w.required_height()).sum::<u16>())
            .max()
            .unwrap_or(0);
        let height = if self.fill_frame {
            area.height
        } else {
            rows.min(area.height)
        };
        self.area = Rect::new(area.x, area.y, area.width, height);

        let mut x = area.x;
        for (column, widgets) in self.widgets.iter_mut().enumerate() {
            let column_width = self.columns[column];
            let width = if column_width > self.gutter {
                column_width - self.gutter
            } else {
                column_width
            };
            let mut y = area.y;
            for widget in widgets.iter_mut() {
                let widget_height = widget.required_height();
                widget.set_bounds(Rect::new(x, y, width, widget_height));
                y = y.saturating_add(widget_height);
            }
            x = x.saturating_add(column_width);
        }

        height
    }

    fn area(&self) -> Rect {
        self.area
    }

    fn focus_next(&mut self) -> bool {
        self.step_focus(true)
    }

    fn focus_prev(&mut self) -> bool {
        self.step_focus(false)
    }

    fn clear_focus(&mut self) {
        self.set_focus(None);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Button;

    fn two_column_layout() -> ColumnLayout {
        let mut layout = ColumnLayout::new(vec![6, 6, 28], 1, false);
        layout.add_widget(0, Box::new(Button::new("file").with_name("file").without_box()));
        layout.add_widget(1, Box::new(Button::new("edit").with_name("edit").without_box()));
        layout
    }

    #[test]
    fn test_columns_are_placed_left_to_right() {
        let mut layout = two_column_layout();
        let height = layout.layout(Rect::new(0, 0, 40, 10));
        assert_eq!(height, 1);

        let file = layout.find_widget("file").unwrap();
        let edit = layout.find_widget("edit").unwrap();
        assert_eq!(file.bounds(), Rect::new(0, 0, 5, 1));
        assert_eq!(edit.location(), (6, 0));
    }

    #[test]
    fn test_layout_respects_area_origin() {
        let mut layout = two_column_layout();
        layout.layout(Rect::new(3, 2, 40, 10));
        assert_eq!(layout.find_widget("edit").unwrap().location(), (9, 2));
    }

    #[test]
    fn test_fill_frame_takes_remaining_height() {
        let mut layout = ColumnLayout::new(vec![10], 0, true);
        assert_eq!(layout.layout(Rect::new(0, 0, 10, 7)), 7);
    }

    #[test]
    fn test_rows_stack_within_a_column() {
        let mut layout = ColumnLayout::new(vec![10], 0, false);
        layout.add_widget(0, Box::new(Button::new("a").with_name("a")));
        layout.add_widget(0, Box::new(Button::new("b").with_name("b")));
        assert_eq!(layout.layout(Rect::new(0, 0, 10, 5)), 2);
        assert_eq!(layout.find_widget("b").unwrap().location(), (0, 1));
    }

    #[test]
    fn test_find_missing_widget() {
        let layout = two_column_layout();
        assert!(layout.find_widget("view").is_none());
        assert_eq!(layout.widget_count(), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_add_widget_out_of_range() {
        let mut layout = ColumnLayout::new(vec![4], 0, false);
        layout.add_widget(3, Box::new(Button::new("x")));
    }

    #[test]
    fn test_focus_traversal_reaches_boundary() {
        let mut layout = two_column_layout();
        assert!(layout.focus_next());
        assert_eq!(layout.focused_name(), Some("file"));
        assert!(layout.focus_next());
        assert_eq!(layout.focused_name(), Some("edit"));
        assert!(!layout.focus_next());
        assert_eq!(layout.focused_name(), None);

        assert!(layout.focus_prev());
        assert_eq!(layout.focused_name(), Some("edit"));
    }

    #[test]
    fn test_clicked_key_bubbles_up() {
        let mut layout = two_column_layout();
        layout.layout(Rect::new(0, 0, 40, 10));
        let mut ctx = DispatchContext::new(Palette::default(), Rect::new(0, 0, 40, 10));

        let result = layout.handle_event(
            &Event::Mouse(crate::event::MouseEvent::left_click(7, 0)),
            &mut ctx,
        );
        assert_eq!(result, EventResult::Clicked("edit".to_string()));
        assert_eq!(layout.focused_name(), Some("edit"));
    }
}
