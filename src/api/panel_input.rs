use crate::interaction::{MouseEvent, WheelEvent};

use super::{DisplayPanel, PanelContext};

impl DisplayPanel {
    pub fn mouse_pressed(&mut self, event: &MouseEvent) {
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_pressed(event, &mut panel);
    }

    pub fn mouse_dragged(&mut self, event: &MouseEvent) {
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_dragged(event, &mut panel);
    }

    pub fn mouse_released(&mut self, event: &MouseEvent) {
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_released(event, &mut panel);
    }

    pub fn mouse_clicked(&mut self, event: &MouseEvent) {
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_clicked(event, &mut panel);
    }

    pub fn mouse_moved(&mut self, event: &MouseEvent) {
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_moved(event, &mut panel);
    }

    /// Applies the panel's tooltip delays until the pointer exits.
    pub fn mouse_entered(&mut self, event: &MouseEvent) {
        if self.core.config.display_tooltips {
            let delays = self.core.config.tooltip_delays;
            self.core
                .tooltip_scope
                .enter(&self.core.tooltip_manager, delays);
        }
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_entered(event, &mut panel);
    }

    pub fn mouse_exited(&mut self, event: &MouseEvent) {
        self.core.tooltip_scope.exit(&self.core.tooltip_manager);
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_exited(event, &mut panel);
    }

    pub fn mouse_wheel_moved(&mut self, event: &WheelEvent) {
        let mut panel = PanelContext::new(&mut self.core);
        self.arbiter.mouse_wheel_moved(event, &mut panel);
    }
}
