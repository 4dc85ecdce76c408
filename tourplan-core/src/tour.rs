//! Closed tours starting and ending at the depot.

use std::fmt;

use crate::{Cost, NodeIndex};

/// Why a tour may be worse than optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ApproximationReason {
    /// The node set was above the exact solver's size threshold.
    SizeThreshold,
    /// The exact search was stopped by a deadline or cancellation.
    Interrupted,
}

impl fmt::Display for ApproximationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeThreshold => f.write_str("node set above exact threshold"),
            Self::Interrupted => f.write_str("exact search interrupted"),
        }
    }
}

/// Whether a tour is provably optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind", content = "reason"))]
pub enum TourQuality {
    /// Minimum cost, with ties broken by the lexicographically smallest order.
    Optimal,
    /// Produced by a heuristic.
    Approximate(ApproximationReason),
}

impl TourQuality {
    /// `true` for [`TourQuality::Optimal`].
    #[must_use]
    pub const fn is_optimal(self) -> bool {
        matches!(self, Self::Optimal)
    }
}

/// An ordered closed walk from the depot through a node set and back.
///
/// # Examples
/// ```
/// use tourplan_core::{Tour, TourQuality};
///
/// let tour = Tour::new(vec![0, 2, 1, 0], 42, TourQuality::Optimal);
/// assert_eq!(tour.depot(), Some(0));
/// assert_eq!(tour.stops(), &[2, 1]);
/// assert_eq!(tour.cost(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    nodes: Vec<NodeIndex>,
    cost: Cost,
    quality: TourQuality,
}

impl Tour {
    /// Construct a tour from its full node sequence, depot included at both
    /// ends.
    #[must_use]
    pub const fn new(nodes: Vec<NodeIndex>, cost: Cost, quality: TourQuality) -> Self {
        Self {
            nodes,
            cost,
            quality,
        }
    }

    /// Build a closed tour from the depot and the ordered stops in between.
    #[must_use]
    pub fn closed(depot: NodeIndex, stops: &[NodeIndex], cost: Cost, quality: TourQuality) -> Self {
        let mut nodes = Vec::with_capacity(stops.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(stops);
        nodes.push(depot);
        Self::new(nodes, cost, quality)
    }

    /// Full node sequence, depot first and last.
    #[must_use]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Nodes visited between leaving and re-entering the depot.
    #[must_use]
    pub fn stops(&self) -> &[NodeIndex] {
        match self.nodes.as_slice() {
            [_, inner @ .., _] => inner,
            _ => &[],
        }
    }

    /// Start and end node.
    #[must_use]
    pub fn depot(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    /// Sum of consecutive edge costs.
    #[must_use]
    pub const fn cost(&self) -> Cost {
        self.cost
    }

    /// Whether the tour is optimal or approximate.
    #[must_use]
    pub const fn quality(&self) -> TourQuality {
        self.quality
    }

    /// Replace the quality flag, e.g. after a fallback.
    #[must_use]
    pub fn with_quality(self, quality: TourQuality) -> Self {
        Self { quality, ..self }
    }
}
