//! chart-panel: interactive display panel for charts.
//!
//! The crate hosts a chart behind an off-screen render buffer, maps between
//! screen and logical coordinates when the panel is scaled into its draw
//! bounds, arbitrates mouse gestures between live and auxiliary handlers, and
//! turns selections, wheel steps and drags into axis zoom and pan requests.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{DisplayPanel, PanelConfig};
pub use error::{ChartError, ChartResult};
