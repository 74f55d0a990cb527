use crate::api::{PanelConfig, PanelContext};

use super::{Modifiers, MouseEvent, WheelEvent};

/// One mouse-gesture protocol run against a display panel.
///
/// Live handlers compete for exclusive ownership of a gesture: the arbiter
/// makes one of them live on press and it stays live until it calls
/// [`PanelContext::release_live_handler`]. Auxiliary handlers
/// (`is_live_handler() == false`) observe every event whose modifiers match
/// their mask, alongside whichever handler is live.
///
/// All hooks default to no-ops.
pub trait GestureHandler {
    /// Registry key; unique per panel.
    fn id(&self) -> &str;

    fn is_live_handler(&self) -> bool;

    /// Modifiers that must be held for this handler to be selected.
    /// `Modifiers::NONE` marks a fallback live handler or an always-on
    /// auxiliary handler.
    fn modifier_mask(&self) -> Modifiers;

    fn is_enabled(&self) -> bool {
        true
    }

    /// Called on registration with a panel and whenever its configuration
    /// is replaced.
    fn config_changed(&mut self, _config: &PanelConfig) {}

    fn mouse_pressed(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_dragged(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_released(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_moved(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_entered(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_exited(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_clicked(&mut self, _event: &MouseEvent, _panel: &mut PanelContext<'_>) {}

    fn mouse_wheel_moved(&mut self, _event: &WheelEvent, _panel: &mut PanelContext<'_>) {}
}
