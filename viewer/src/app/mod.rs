//! Controller: owns the UI state, talks to the capture worker and
//! dispatches view commands.

mod frame_handler;
mod handlers;
mod state;
mod ui_handler;

pub use state::App;
