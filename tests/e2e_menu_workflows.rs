//! End-to-End Test Suite: menu bar workflows
//!
//! Drives a window the way a user would: clicking labels, choosing items,
//! dismissing popups, and chaining a dialog off a menu entry.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ricecoder_menubar::{
    DispatchContext, Event, EventResult, Interactive, KeyCode, KeyEvent, Menu, MenuBar,
    MenuBarConfig, MenuItem, Overlay, Palette, Renderable, Window,
};
use ricecoder_menubar_integration_tests::{click, render_rows};

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, label: &str) -> MenuItem {
    let log = log.clone();
    let name = label.to_string();
    MenuItem::new(label, move || log.borrow_mut().push(name.clone()))
}

/// Two menus: file -> [open], edit -> [copy, paste]
fn file_edit_window(log: &Log) -> Window {
    let mut window = Window::new(40, 10);
    let menus = vec![
        Menu::new("file", vec![recorder(log, "open")]),
        Menu::new("edit", vec![recorder(log, "copy"), recorder(log, "paste")]),
    ];
    let bar = MenuBar::new(&window, menus, true).expect("menu bar should build");
    window.add_layout(Box::new(bar));
    window
}

/// Modal dialog that closes on Esc
struct AboutDialog;

impl Renderable for AboutDialog {
    fn render(&self, buf: &mut Buffer, palette: &Palette) {
        buf.set_string(10, 5, "RiceCoder", palette.popup_item);
    }
}

impl Interactive for AboutDialog {
    fn handle_event(&mut self, event: &Event, ctx: &mut DispatchContext) -> EventResult {
        if let Event::Key(KeyEvent { code: KeyCode::Esc, .. }) = event {
            ctx.close();
        }
        EventResult::Consumed
    }
}

impl Overlay for AboutDialog {
    fn id(&self) -> &str {
        "dialog:about"
    }
}

#[test]
fn test_file_then_edit_workflow() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut window = file_edit_window(&log);

    // file opens a one-row popup containing "open"
    assert!(click(&mut window, 1, 0));
    let rows = render_rows(&window);
    assert!(rows[1].starts_with("┌────┐"));
    assert!(rows[2].starts_with("│open│"));
    assert!(rows[3].starts_with("└────┘"));

    assert!(click(&mut window, 2, 2));
    assert_eq!(*log.borrow(), vec!["open".to_string()]);
    assert!(!window.has_overlays());

    // edit opens a two-row popup
    assert!(click(&mut window, 7, 0));
    let rows = render_rows(&window);
    assert_eq!(&rows[2][..], "      │copy │                           ");
    assert_eq!(&rows[3][..], "      │paste│                           ");

    assert!(click(&mut window, 8, 3));
    assert_eq!(*log.borrow(), vec!["open".to_string(), "paste".to_string()]);
    assert!(!window.has_overlays());
}

#[test]
fn test_outside_click_dismisses_either_popup() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut window = file_edit_window(&log);

    for label_x in [1, 7] {
        click(&mut window, label_x, 0);
        assert_eq!(window.overlay_count(), 1);
        click(&mut window, 30, 8);
        assert!(!window.has_overlays());
    }
    assert!(log.borrow().is_empty());
    assert!(render_rows(&window)[1].trim().is_empty());
}

#[test]
fn test_selection_opens_dialog_on_top() {
    let mut window = Window::new(40, 10);
    let menus = vec![Menu::new(
        "help",
        vec![MenuItem::with_context("about", |ctx| {
            ctx.push_overlay(Box::new(AboutDialog));
        })],
    )];
    let bar = MenuBar::new(&window, menus, true).unwrap();
    window.add_layout(Box::new(bar));

    click(&mut window, 1, 0);
    assert_eq!(window.overlay_ids(), vec!["popup:help".to_string()]);

    click(&mut window, 2, 2);
    assert_eq!(window.overlay_ids(), vec!["dialog:about".to_string()]);
    assert!(render_rows(&window)[5].contains("RiceCoder"));

    // the dialog now owns input; the bar only gets it back once it closes
    click(&mut window, 1, 0);
    assert_eq!(window.overlay_ids(), vec!["dialog:about".to_string()]);
    window.handle_event(&Event::Key(KeyEvent::new(KeyCode::Esc)));
    assert!(!window.has_overlays());

    click(&mut window, 1, 0);
    assert_eq!(window.overlay_ids(), vec!["popup:help".to_string()]);
}

#[test]
fn test_config_driven_bar() {
    let yaml = "theme: monochrome\nbordered: false\nmenus:\n  - label: file\n    items: [open, quit]\n";
    let config = MenuBarConfig::from_yaml(yaml).unwrap();

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let mut window = Window::new(40, 10).with_palette(config.palette());
    let menus = config.build_menus(move |menu, item| {
        sink.borrow_mut().push(format!("{}:{}", menu, item));
    });
    let bar = MenuBar::new(&window, menus, config.bordered).unwrap();
    window.add_layout(Box::new(bar));

    click(&mut window, 0, 0);
    let rows = render_rows(&window);
    assert!(rows[1].starts_with("open"));
    assert!(rows[2].starts_with("quit"));

    click(&mut window, 0, 2);
    assert_eq!(*log.borrow(), vec!["file:quit".to_string()]);
}
