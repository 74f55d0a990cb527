use crate::core::{Point, ScreenPoint};
use crate::interaction::Modifiers;

use super::ChartEntity;

/// Mouse event resolved against the chart under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMouseEvent {
    pub screen: ScreenPoint,
    pub logical: Point,
    pub entity: Option<ChartEntity>,
    pub modifiers: Modifiers,
    pub click_count: u32,
}

/// Observer of clicks and moves over the chart.
pub trait ChartMouseListener {
    fn chart_mouse_clicked(&self, _event: &ChartMouseEvent) {}

    fn chart_mouse_moved(&self, _event: &ChartMouseEvent) {}
}
