use fragnet_core::Connectivity;

use crate::metric::{MetricKind, PerimeterMode};
use crate::nearest::ShortfallPolicy;
use crate::stats::Statistic;

/// Parameters of one nearest-neighbour analysis run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FnnConfig {
    /// Category value whose patches are analysed.
    pub keyval: i32,
    /// Neighbourhood for patch labelling and path search.
    pub connectivity: Connectivity,
    /// What is measured between (or on) patches.
    pub metric: MetricKind,
    /// Neighbour counts to report, ascending and without duplicates.
    pub numbers: Vec<usize>,
    /// How neighbour values are summarised.
    pub statistic: Statistic,
    /// How patch perimeters are counted.
    pub perimeter: PerimeterMode,
    /// What happens when a patch has fewer reachable neighbours than asked.
    pub shortfall: ShortfallPolicy,
    /// Evaluate matrix pairs on the rayon thread pool.
    pub parallel: bool,
    /// Cap on node expansions per path search.
    pub max_search_iterations: Option<usize>,
    /// Treat a grid without patches as an empty result instead of an error.
    pub allow_empty: bool,
}

impl Default for FnnConfig {
    fn default() -> Self {
        Self {
            keyval: 1,
            connectivity: Connectivity::Four,
            metric: MetricKind::Distance,
            numbers: vec![1],
            statistic: Statistic::Average,
            perimeter: PerimeterMode::ExposedEdges,
            shortfall: ShortfallPolicy::Truncate,
            parallel: true,
            max_search_iterations: None,
            allow_empty: true,
        }
    }
}

impl FnnConfig {
    /// Largest neighbour count requested (0 when none are).
    pub fn max_number(&self) -> usize {
        self.numbers.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reports_nearest_neighbor_distance() {
        let c = FnnConfig::default();
        assert_eq!(c.metric, MetricKind::Distance);
        assert_eq!(c.numbers, vec![1]);
        assert_eq!(c.max_number(), 1);
        assert!(c.allow_empty);
    }

    #[test]
    fn max_number_of_empty_list() {
        let c = FnnConfig {
            numbers: Vec::new(),
            ..FnnConfig::default()
        };
        assert_eq!(c.max_number(), 0);
    }
}
