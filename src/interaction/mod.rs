mod arbiter;
mod click_dispatch_handler;
mod event;
mod handler;
mod pan_handler;
mod tooltip;
mod wheel_zoom_handler;
mod zoom_rectangle_handler;

pub use arbiter::GestureArbiter;
pub use click_dispatch_handler::ClickDispatchHandler;
pub use event::{Modifiers, MouseButton, MouseEvent, WheelEvent};
pub use handler::GestureHandler;
pub use pan_handler::PanHandler;
pub use tooltip::{TooltipDelayScope, TooltipDelays};
pub use wheel_zoom_handler::WheelZoomHandler;
pub use zoom_rectangle_handler::{PendingZoomRectangle, ReverseDragPolicy, ZoomRectangleHandler};
