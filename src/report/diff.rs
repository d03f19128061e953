//! Set difference between a branch report and its baseline

use crate::size::{ComponentReport, SizeEntry};
use std::cmp::Ordering;

/// How a present component relates to the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Not in the baseline
    Added,
    /// In the baseline with a different breakdown
    Changed {
        /// Baseline entry
        previous: SizeEntry,
    },
}

/// Change of a component's total against the baseline, in KB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalDelta {
    /// Total grew by this many KB
    Increase(u64),
    /// Total shrank by this many KB
    Decrease(u64),
}

/// A component that is new or differs from the baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentChange<'a> {
    /// Component name
    pub name: &'a str,
    /// Size on the current branch
    pub current: SizeEntry,
    /// Relation to the baseline
    pub kind: ChangeKind,
}

impl ComponentChange<'_> {
    /// Change of the total, `None` for added components and for changes
    /// that leave the total untouched
    pub fn total_delta(&self) -> Option<TotalDelta> {
        let ChangeKind::Changed { previous } = self.kind else {
            return None;
        };
        let amount = self.current.total.abs_diff(previous.total);
        match self.current.total.cmp(&previous.total) {
            Ordering::Greater => Some(TotalDelta::Increase(amount)),
            Ordering::Less => Some(TotalDelta::Decrease(amount)),
            Ordering::Equal => None,
        }
    }
}

/// A baseline component missing from the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedComponent<'a> {
    /// Component name
    pub name: &'a str,
    /// Size in the baseline
    pub baseline: SizeEntry,
}

/// Differences between two reports
///
/// `changed` follows the current report's order, `removed` the baseline's.
/// Components identical in both are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDiff<'a> {
    /// New and modified components
    pub changed: Vec<ComponentChange<'a>>,
    /// Components only in the baseline
    pub removed: Vec<RemovedComponent<'a>>,
}

impl<'a> ReportDiff<'a> {
    /// Compare `current` against `baseline`
    pub fn compute(current: &'a ComponentReport, baseline: &'a ComponentReport) -> Self {
        let changed = current
            .iter()
            .filter_map(|(name, &size)| match baseline.get(name) {
                None => Some(ComponentChange {
                    name,
                    current: size,
                    kind: ChangeKind::Added,
                }),
                Some(&previous) if previous != size => Some(ComponentChange {
                    name,
                    current: size,
                    kind: ChangeKind::Changed { previous },
                }),
                Some(_) => None,
            })
            .collect();

        let removed = baseline
            .iter()
            .filter(|(name, _)| !current.contains(name))
            .map(|(name, &size)| RemovedComponent {
                name,
                baseline: size,
            })
            .collect();

        Self { changed, removed }
    }

    /// Whether the reports are equivalent
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}
