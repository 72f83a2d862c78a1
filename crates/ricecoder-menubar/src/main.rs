//! RiceCoder menu bar demo
//!
//! Runs a full-screen window with a menu bar built from the configuration
//! and a status line showing the last chosen entry.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Paragraph, Widget},
    Terminal,
};
use ricecoder_menubar::{
    Event, KeyCode, KeyEvent, MenuBar, MenuBarConfig, MenuError, MenuResult, Window,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Parser)]
#[command(name = "ricecoder-menubar", about = "Terminal drop-down menu bar demo")]
struct Args {
    /// Path to a menubar.yaml file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw popups without border boxes
    #[arg(long)]
    no_border: bool,

    /// Log level used when `log_file` is configured
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MenuBarConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MenuBarConfig::load()?,
    };
    if args.no_border {
        config.bordered = false;
    }

    init_logging(&config, args.log_level)?;
    tracing::info!("Starting RiceCoder menu bar...");

    let mut terminal = setup_terminal(config.mouse)?;
    let result = run(&mut terminal, &config);
    let restored = restore_terminal(&mut terminal, config.mouse);
    let result = result.and(restored.map_err(anyhow::Error::from));

    match result {
        Ok(()) => {
            tracing::info!("Menu bar exited gracefully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Menu bar error: {}", e);
            Err(e)
        }
    }
}

/// Install a file logger when `log_file` is configured
fn init_logging(config: &MenuBarConfig, level: tracing::Level) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn setup_terminal(mouse: bool) -> MenuResult<Tui> {
    enable_raw_mode()
        .map_err(|e| MenuError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    enter_terminal(mouse).map_err(|e| {
        if let Err(restore) = leave_terminal_modes(&mut io::stdout(), mouse) {
            tracing::warn!("Failed to restore terminal: {}", restore);
        }
        MenuError::terminal(format!("Failed to set up terminal: {}", e))
    })
}

fn enter_terminal(mouse: bool) -> io::Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave raw mode, mouse capture and the alternate screen, trying every step
fn leave_terminal_modes<W: io::Write>(out: &mut W, mouse: bool) -> io::Result<()> {
    let raw = disable_raw_mode();
    let capture = if mouse {
        execute!(out, DisableMouseCapture)
    } else {
        Ok(())
    };
    let screen = execute!(out, LeaveAlternateScreen);
    raw.and(capture).and(screen)
}

fn restore_terminal(terminal: &mut Tui, mouse: bool) -> MenuResult<()> {
    let modes = leave_terminal_modes(terminal.backend_mut(), mouse);
    let cursor = terminal.show_cursor();
    modes
        .and(cursor)
        .map_err(|e| MenuError::terminal(format!("Failed to restore terminal: {}", e)))
}

fn run(terminal: &mut Tui, config: &MenuBarConfig) -> Result<()> {
    let size = terminal.size()?;
    let mut window = Window::new(size.width, size.height).with_palette(config.palette());

    let status = Rc::new(RefCell::new(String::from(
        "Click a menu or press Tab then Enter. q quits.",
    )));
    let quit = Rc::new(Cell::new(false));

    let menus = {
        let status = status.clone();
        let quit = quit.clone();
        config.build_menus(move |menu, item| {
            tracing::info!(menu, item, "Menu item chosen");
            if item.eq_ignore_ascii_case("quit") {
                quit.set(true);
            }
            *status.borrow_mut() = format!("{} > {}", menu, item);
        })
    };
    let bar = MenuBar::new(&window, menus, config.bordered)?;
    window.add_layout(Box::new(bar));

    let quit_key = Event::Key(KeyEvent::new(KeyCode::Char('q')));
    while !quit.get() {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            window.render_base(buf);
            let status_area = Rect::new(area.x, area.y.saturating_add(2), area.width, 1)
                .intersection(area);
            Paragraph::new(status.borrow().as_str()).render(status_area, buf);
            window.render_overlays(buf);
        })?;

        let Some(event) = Event::poll(Duration::from_millis(250))? else {
            continue;
        };
        if event.is_interrupt() || (event == quit_key && !window.has_overlays()) {
            break;
        }
        window.handle_event(&event);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that rejects every write and counts the attempts
    #[derive(Default)]
    struct BrokenWriter {
        attempts: usize,
    }

    impl io::Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_leave_terminal_modes_writes_every_sequence() {
        let mut out = Vec::new();
        leave_terminal_modes(&mut out, true).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1000l"));
        assert!(written.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_leave_terminal_modes_continues_after_failure() {
        let mut out = BrokenWriter::default();
        assert!(leave_terminal_modes(&mut out, true).is_err());
        // the alternate screen is still left after mouse capture fails
        assert!(out.attempts >= 2);
    }
}
