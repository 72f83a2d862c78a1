//! RiceCoder menu bar
//!
//! A terminal drop-down menu system: a horizontal bar of top-level labels
//! that opens a popup list of items under the clicked label. Popups live on
//! the owning [`Window`]'s overlay stack, take input before the widgets
//! beneath them, and remove themselves on selection or dismissal.

pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod style;
pub mod window;

// Re-export commonly used types
pub use components::{
    Button, Control, EventResult, Focusable, Interactive, Menu, MenuAction, MenuBar, MenuItem,
    Overlay, PopupMenu, PopupState, Renderable, WindowLayout,
};
pub use config::{MenuBarConfig, MenuConfig};
pub use error::{MenuError, MenuResult};
pub use event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
pub use layout::ColumnLayout;
pub use style::Palette;
pub use window::{DispatchContext, LayoutId, OverlayKey, OverlayStack, Window};
