use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect};

/// Hit-testable region drawn by a chart, in logical coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntity {
    pub area: Rect,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ChartEntity {
    #[must_use]
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            tooltip: None,
            url: None,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityCollection {
    entities: Vec<ChartEntity>,
}

impl EntityCollection {
    pub fn add(&mut self, entity: ChartEntity) {
        self.entities.push(entity);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartEntity> {
        self.entities.iter()
    }

    /// Topmost entity containing the point; later entities are drawn on top.
    #[must_use]
    pub fn entity_at(&self, x: f64, y: f64) -> Option<&ChartEntity> {
        let point = Point::new(x, y);
        self.entities
            .iter()
            .rev()
            .find(|entity| entity.area.contains(point))
    }
}

/// Plot areas recorded by the last draw, in logical coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotRenderingInfo {
    pub plot_area: Rect,
    pub data_area: Rect,
    #[serde(default)]
    pub subplots: Vec<PlotRenderingInfo>,
}

impl PlotRenderingInfo {
    #[must_use]
    pub fn new(plot_area: Rect, data_area: Rect) -> Self {
        Self {
            plot_area,
            data_area,
            subplots: Vec::new(),
        }
    }

    /// Index of the subplot whose data area contains `point`.
    #[must_use]
    pub fn subplot_index(&self, point: Point) -> Option<usize> {
        self.subplots
            .iter()
            .position(|subplot| subplot.data_area.contains(point))
    }

    /// Data area of the subplot under `point`, or the whole data area.
    #[must_use]
    pub fn data_area_at(&self, point: Point) -> Rect {
        self.subplot_index(point)
            .map_or(self.data_area, |index| self.subplots[index].data_area)
    }

    pub fn clear(&mut self) {
        self.plot_area = Rect::default();
        self.data_area = Rect::default();
        self.subplots.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartRenderingInfo {
    pub chart_area: Rect,
    pub plot_info: PlotRenderingInfo,
    pub entities: EntityCollection,
}

impl ChartRenderingInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.chart_area = Rect::default();
        self.plot_info.clear();
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartEntity, EntityCollection, PlotRenderingInfo};
    use crate::core::{Point, Rect};

    #[test]
    fn entity_lookup_prefers_last_added() {
        let mut entities = EntityCollection::default();
        entities.add(ChartEntity::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_tooltip("back"));
        entities.add(ChartEntity::new(Rect::new(10.0, 10.0, 20.0, 20.0)).with_tooltip("front"));

        let hit = entities.entity_at(15.0, 15.0).expect("entity");
        assert_eq!(hit.tooltip.as_deref(), Some("front"));
        let hit = entities.entity_at(50.0, 50.0).expect("entity");
        assert_eq!(hit.tooltip.as_deref(), Some("back"));
        assert!(entities.entity_at(150.0, 50.0).is_none());
    }

    #[test]
    fn data_area_at_falls_back_to_whole_plot() {
        let mut info = PlotRenderingInfo::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(10.0, 10.0, 80.0, 80.0),
        );
        info.subplots.push(PlotRenderingInfo::new(
            Rect::new(10.0, 10.0, 80.0, 40.0),
            Rect::new(10.0, 10.0, 80.0, 40.0),
        ));
        info.subplots.push(PlotRenderingInfo::new(
            Rect::new(10.0, 50.0, 80.0, 40.0),
            Rect::new(10.0, 50.0, 80.0, 40.0),
        ));

        assert_eq!(info.subplot_index(Point::new(20.0, 60.0)), Some(1));
        assert_eq!(info.data_area_at(Point::new(20.0, 20.0)), info.subplots[0].data_area);
        assert_eq!(info.data_area_at(Point::new(5.0, 5.0)), info.data_area);
    }
}
