//! Shared helpers for the menu bar end-to-end tests

use ratatui::buffer::Buffer;
use ricecoder_menubar::{Event, MouseEvent, Window};

/// Render the window and return one string per screen row
pub fn render_rows(window: &Window) -> Vec<String> {
    let mut buf = Buffer::empty(window.area());
    window.render(&mut buf);
    (0..window.height())
        .map(|y| {
            (0..window.width())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}

/// Deliver a left click, returning whether anything consumed it
pub fn click(window: &mut Window, x: u16, y: u16) -> bool {
    window.handle_event(&Event::Mouse(MouseEvent::left_click(x, y)))
}
