use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{ChartChangeEvent, ChartChangeListener};

/// Ordered repaint classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    /// Re-blit the buffer and redraw overlays only.
    Overlay,
    /// Redraw the chart into the buffer.
    Full,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}

/// Reason a repaint was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    ChartChanged,
    Resize,
    Explicit,
    Config,
    Anchor,
    ZoomRectangle,
    ChartReplaced,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::ChartChanged => 1 << 0,
            Self::Resize => 1 << 1,
            Self::Explicit => 1 << 2,
            Self::Config => 1 << 3,
            Self::Anchor => 1 << 4,
            Self::ZoomRectangle => 1 << 5,
            Self::ChartReplaced => 1 << 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

/// Coalesced repaint request; repeated requests merge rather than queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationMask {
    level: InvalidationLevel,
    #[serde(default)]
    topics: InvalidationTopics,
}

impl InvalidationMask {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            level: InvalidationLevel::None,
            topics: InvalidationTopics::none(),
        }
    }

    #[must_use]
    pub const fn new(level: InvalidationLevel, topic: InvalidationTopic) -> Self {
        Self {
            level,
            topics: InvalidationTopics::from_topic(topic),
        }
    }

    #[must_use]
    pub const fn overlay(topic: InvalidationTopic) -> Self {
        Self::new(InvalidationLevel::Overlay, topic)
    }

    #[must_use]
    pub const fn full(topic: InvalidationTopic) -> Self {
        Self::new(InvalidationLevel::Full, topic)
    }

    #[must_use]
    pub const fn level(self) -> InvalidationLevel {
        self.level
    }

    #[must_use]
    pub const fn topics(self) -> InvalidationTopics {
        self.topics
    }

    #[must_use]
    pub const fn has_topic(self, topic: InvalidationTopic) -> bool {
        self.topics.contains_topic(topic)
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.level, InvalidationLevel::None)
    }

    pub fn merge(&mut self, other: Self) {
        self.level = self.level.max(other.level);
        self.topics = self.topics.union(other.topics);
    }
}

/// Pending repaint state shared between a panel and the chart it listens to.
#[derive(Debug, Default)]
pub struct PanelInvalidation {
    pending: Cell<InvalidationMask>,
    chart_events: Cell<u64>,
}

impl PanelInvalidation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self, mask: InvalidationMask) {
        let mut pending = self.pending.get();
        pending.merge(mask);
        self.pending.set(pending);
    }

    #[must_use]
    pub fn pending(&self) -> InvalidationMask {
        self.pending.get()
    }

    /// Returns and clears the pending mask.
    pub fn take(&self) -> InvalidationMask {
        self.pending.replace(InvalidationMask::none())
    }

    /// Change events received from the chart since creation.
    #[must_use]
    pub fn chart_events(&self) -> u64 {
        self.chart_events.get()
    }
}

impl ChartChangeListener for PanelInvalidation {
    fn chart_changed(&self, event: &ChartChangeEvent) {
        trace!(kind = ?event.kind, "chart changed, buffer invalidated");
        self.chart_events.set(self.chart_events.get() + 1);
        self.invalidate(InvalidationMask::full(InvalidationTopic::ChartChanged));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        InvalidationLevel, InvalidationMask, InvalidationTopic, PanelInvalidation,
    };
    use crate::api::{ChartChangeEvent, ChartChangeKind, ChartChangeListener};

    #[test]
    fn merge_keeps_highest_level_and_all_topics() {
        let mut mask = InvalidationMask::overlay(InvalidationTopic::ZoomRectangle);
        mask.merge(InvalidationMask::full(InvalidationTopic::Anchor));
        mask.merge(InvalidationMask::overlay(InvalidationTopic::Explicit));

        assert_eq!(mask.level(), InvalidationLevel::Full);
        assert!(mask.has_topic(InvalidationTopic::ZoomRectangle));
        assert!(mask.has_topic(InvalidationTopic::Anchor));
        assert!(mask.has_topic(InvalidationTopic::Explicit));
        assert!(!mask.has_topic(InvalidationTopic::Resize));
    }

    #[test]
    fn repeated_requests_coalesce_until_taken() {
        let invalidation = PanelInvalidation::new();
        for _ in 0..5 {
            invalidation.invalidate(InvalidationMask::overlay(InvalidationTopic::ZoomRectangle));
        }
        let taken = invalidation.take();
        assert_eq!(taken.level(), InvalidationLevel::Overlay);
        assert!(invalidation.pending().is_none());
    }

    #[test]
    fn chart_change_marks_full_and_counts() {
        let invalidation = PanelInvalidation::new();
        invalidation.chart_changed(&ChartChangeEvent::new(ChartChangeKind::AxisRange));
        assert_eq!(invalidation.chart_events(), 1);
        let pending = invalidation.pending();
        assert_eq!(pending.level(), InvalidationLevel::Full);
        assert!(pending.has_topic(InvalidationTopic::ChartChanged));
    }
}
