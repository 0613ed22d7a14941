//! UI components for Code Share

pub mod dialogs;
pub mod editor;
pub mod header;
pub mod notification;
pub mod preview;
pub mod sidebar;
