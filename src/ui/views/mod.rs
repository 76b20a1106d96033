//! View rendering functions for the UI components.
//!
//! - `layout`: main window composition and overlay layers
//! - `bottom_panel`: now playing card and transport controls
//! - `popups`: modal dialogs and menus
//! - `helpers`: small widgets shared by pages
//! - `toast`: toast notifications

mod bottom_panel;
pub mod helpers;
mod layout;
mod popups;
pub mod toast;

pub use layout::main_view;
pub use toast::ToastQueue;
