//! Widgets: the generic labeled control, menu definitions, the menu bar and
//! the popup overlay it spawns

pub mod button;
pub mod menu;
pub mod menu_bar;
pub mod popup_menu;
pub mod traits;

pub use button::Button;
pub use menu::{Menu, MenuAction, MenuItem};
pub use menu_bar::{column_widths, MenuBar};
pub use popup_menu::{PopupMenu, PopupState};
pub use traits::{Control, EventResult, Focusable, Interactive, Overlay, Renderable, WindowLayout};
