use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::api::{PanelConfig, PanelContext};
use crate::error::{ChartError, ChartResult};

use super::{GestureHandler, Modifiers, MouseEvent, WheelEvent};

/// One forwarded input event.
#[derive(Debug, Clone, Copy)]
enum Delivery<'e> {
    Pressed(&'e MouseEvent),
    Dragged(&'e MouseEvent),
    Released(&'e MouseEvent),
    Moved(&'e MouseEvent),
    Entered(&'e MouseEvent),
    Exited(&'e MouseEvent),
    Clicked(&'e MouseEvent),
    Wheel(&'e WheelEvent),
}

impl Delivery<'_> {
    fn modifiers(self) -> Modifiers {
        match self {
            Self::Pressed(event)
            | Self::Dragged(event)
            | Self::Released(event)
            | Self::Moved(event)
            | Self::Entered(event)
            | Self::Exited(event)
            | Self::Clicked(event) => event.modifiers,
            Self::Wheel(event) => event.modifiers,
        }
    }

    fn deliver(self, handler: &mut dyn GestureHandler, panel: &mut PanelContext<'_>) {
        match self {
            Self::Pressed(event) => handler.mouse_pressed(event, panel),
            Self::Dragged(event) => handler.mouse_dragged(event, panel),
            Self::Released(event) => handler.mouse_released(event, panel),
            Self::Moved(event) => handler.mouse_moved(event, panel),
            Self::Entered(event) => handler.mouse_entered(event, panel),
            Self::Exited(event) => handler.mouse_exited(event, panel),
            Self::Clicked(event) => handler.mouse_clicked(event, panel),
            Self::Wheel(event) => handler.mouse_wheel_moved(event, panel),
        }
    }
}

/// Registry of gesture handlers and owner of the live-handler slot.
///
/// Handlers are kept in registration order; selection scans live handlers in
/// that order and auxiliary handlers are notified in that order.
#[derive(Default)]
pub struct GestureArbiter {
    live_handlers: IndexMap<String, Box<dyn GestureHandler>>,
    auxiliary_handlers: IndexMap<String, Box<dyn GestureHandler>>,
    live: Option<String>,
}

impl std::fmt::Debug for GestureArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureArbiter")
            .field("live_handlers", &self.live_handlers.keys().collect::<Vec<_>>())
            .field(
                "auxiliary_handlers",
                &self.auxiliary_handlers.keys().collect::<Vec<_>>(),
            )
            .field("live", &self.live)
            .finish()
    }
}

impl GestureArbiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler as a live candidate or as an auxiliary observer,
    /// according to [`GestureHandler::is_live_handler`].
    pub fn add_handler(&mut self, handler: Box<dyn GestureHandler>) -> ChartResult<()> {
        let id = handler.id().to_owned();
        if id.is_empty() {
            return Err(ChartError::InvalidData(
                "gesture handler id must not be empty".to_owned(),
            ));
        }
        if self.contains(&id) {
            return Err(ChartError::DuplicateHandler(id));
        }
        debug!(handler = %id, live = handler.is_live_handler(), "registering gesture handler");
        if handler.is_live_handler() {
            self.live_handlers.insert(id, handler);
        } else {
            self.auxiliary_handlers.insert(id, handler);
        }
        Ok(())
    }

    /// Removes a handler by id, clearing the live slot if it was live.
    /// Hands `config` to every registered handler.
    pub fn config_changed(&mut self, config: &PanelConfig) {
        for handler in self
            .live_handlers
            .values_mut()
            .chain(self.auxiliary_handlers.values_mut())
        {
            handler.config_changed(config);
        }
    }

    pub fn remove_handler(&mut self, id: &str) -> Option<Box<dyn GestureHandler>> {
        if self.live.as_deref() == Some(id) {
            self.live = None;
        }
        self.live_handlers
            .shift_remove(id)
            .or_else(|| self.auxiliary_handlers.shift_remove(id))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.live_handlers.contains_key(id) || self.auxiliary_handlers.contains_key(id)
    }

    #[must_use]
    pub fn handler(&self, id: &str) -> Option<&dyn GestureHandler> {
        self.live_handlers
            .get(id)
            .or_else(|| self.auxiliary_handlers.get(id))
            .map(|handler| handler.as_ref())
    }

    pub fn live_handler_ids(&self) -> impl Iterator<Item = &str> {
        self.live_handlers.keys().map(String::as_str)
    }

    pub fn auxiliary_handler_ids(&self) -> impl Iterator<Item = &str> {
        self.auxiliary_handlers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn live_handler_id(&self) -> Option<&str> {
        self.live.as_deref()
    }

    /// Drops live ownership without notifying the handler.
    pub fn clear_live_handler(&mut self) {
        if let Some(id) = self.live.take() {
            debug!(handler = %id, "live gesture handler cleared");
        }
    }

    /// First enabled live handler whose non-empty mask is held, otherwise the
    /// first enabled handler with an empty mask.
    fn select_live_handler(&self, modifiers: Modifiers) -> Option<String> {
        let mut fallback = None;
        for (id, handler) in &self.live_handlers {
            if !handler.is_enabled() {
                continue;
            }
            let mask = handler.modifier_mask();
            if mask.is_empty() {
                if fallback.is_none() {
                    fallback = Some(id.clone());
                }
            } else if modifiers.contains(mask) {
                return Some(id.clone());
            }
        }
        fallback
    }

    pub fn mouse_pressed(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        if self.live.is_none() {
            self.live = self.select_live_handler(event.modifiers);
            match self.live.as_deref() {
                Some(id) => debug!(handler = %id, modifiers = event.modifiers.bits(), "live gesture handler selected"),
                None => trace!(modifiers = event.modifiers.bits(), "no live gesture handler matched"),
            }
        }
        self.dispatch(Delivery::Pressed(event), panel);
    }

    pub fn mouse_dragged(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        if panel.context_menu_showing() {
            trace!("drag suppressed while context menu is showing");
            return;
        }
        self.dispatch(Delivery::Dragged(event), panel);
    }

    pub fn mouse_released(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        self.dispatch(Delivery::Released(event), panel);
    }

    pub fn mouse_moved(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        self.dispatch(Delivery::Moved(event), panel);
    }

    pub fn mouse_entered(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        self.dispatch(Delivery::Entered(event), panel);
    }

    pub fn mouse_exited(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        self.dispatch(Delivery::Exited(event), panel);
    }

    pub fn mouse_clicked(&mut self, event: &MouseEvent, panel: &mut PanelContext<'_>) {
        self.dispatch(Delivery::Clicked(event), panel);
    }

    pub fn mouse_wheel_moved(&mut self, event: &WheelEvent, panel: &mut PanelContext<'_>) {
        self.dispatch(Delivery::Wheel(event), panel);
    }

    /// Live handler first, then every matching auxiliary handler.
    ///
    /// Only the live handler can give up live ownership; release requests
    /// raised by auxiliary handlers are discarded.
    fn dispatch(&mut self, delivery: Delivery<'_>, panel: &mut PanelContext<'_>) {
        panel.clear_release_request();

        if let Some(live_id) = self.live.clone()
            && let Some(handler) = self.live_handlers.get_mut(&live_id)
        {
            delivery.deliver(handler.as_mut(), panel);
            if panel.take_release_request() {
                debug!(handler = %live_id, "live gesture handler released");
                self.live = None;
            }
        }

        let modifiers = delivery.modifiers();
        for (id, handler) in &mut self.auxiliary_handlers {
            if !handler.is_enabled() {
                continue;
            }
            let mask = handler.modifier_mask();
            if mask.is_empty() || modifiers.contains(mask) {
                delivery.deliver(handler.as_mut(), panel);
                if panel.take_release_request() {
                    trace!(handler = %id, "ignoring release request from auxiliary handler");
                }
            }
        }
    }
}
