//! Runtime module - winit integration
//!
//! - `app` - ApplicationHandler and window management
//! - `commands` - editor commands the window dispatches to

pub mod app;
pub mod commands;

pub use app::App;
