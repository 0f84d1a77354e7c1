//! UI-side processing that does not touch egui state directly.

pub mod fps_meter;
pub mod utils;

pub use fps_meter::{FpsMeter, FpsReading};
