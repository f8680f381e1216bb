//! Display groups over the fitted feature order.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A titled, contiguous slice of the feature order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGroup {
    title: String,
    start: usize,
    end: usize,
}

impl FeatureGroup {
    /// Creates a group covering `range`.
    pub fn new(title: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            title: title.into(),
            start: range.start,
            end: range.end,
        }
    }

    /// The five groups used for the 95 financial ratios.
    pub fn standard() -> Vec<FeatureGroup> {
        vec![
            FeatureGroup::new("Profitability", 0..15),
            FeatureGroup::new("Liquidity", 15..30),
            FeatureGroup::new("Debt structure", 30..50),
            FeatureGroup::new("Operational efficiency", 50..70),
            FeatureGroup::new("Cash flow & stability", 70..95),
        ]
    }

    /// Group title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Index range into the schema.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of features covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the group covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Truncates the group to `total` features; `None` if nothing is left.
    pub fn clamp(self, total: usize) -> Option<Self> {
        let end = self.end.min(total);
        if self.start >= end {
            return None;
        }
        Some(Self { end, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_groups_cover_95_features() {
        let groups = FeatureGroup::standard();
        assert_eq!(groups.len(), 5);
        assert_eq!(groups.iter().map(FeatureGroup::len).sum::<usize>(), 95);
        for pair in groups.windows(2) {
            assert_eq!(pair[0].range().end, pair[1].range().start);
        }
    }

    #[test]
    fn test_clamp() {
        let g = FeatureGroup::new("g", 10..20);
        assert_eq!(g.clone().clamp(15).unwrap().range(), 10..15);
        assert!(g.clone().clamp(10).is_none());
        assert_eq!(g.clamp(100).unwrap().len(), 10);
    }
}
