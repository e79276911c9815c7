//! # callnav-editor: in-memory reference host
//!
//! A small editor model that implements the `callnav-core` host traits, so
//! every command can run without a real editor:
//!
//! - **[`buffer`]**: `Buffer` wrapping a rope, with char-offset spans
//! - **[`history`]**: transaction-based undo/redo
//! - **[`jumplist`]**: visit history recorded before navigation jumps
//! - **[`editor`]**: `Editor`, the host itself, with syntax-aware select-more

pub mod buffer;
pub mod editor;
pub mod history;
pub mod jumplist;

pub use editor::Editor;
