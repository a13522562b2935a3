//! Interactive edit widgets and the per-tick widget controller

pub mod controller;
pub mod handles;

pub use controller::WidgetController;
pub use handles::{PanelWidget, WidgetKind};
