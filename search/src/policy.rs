//! Search policy types.

use crate::error::SearchError;

/// Default cap on forked branches during optimal-state enumeration.
pub const DEFAULT_MAX_BRANCHES: u64 = 100_000;

/// Search configuration and budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Which direction of cost counts as "better" when relaxing edges.
    pub objective: Objective,
    /// Require the world's consumption predicate in addition to the goal.
    pub exhaustive: bool,
    /// Hard cap on node expansions. `None` is unbounded.
    pub max_expansions: Option<u64>,
    /// Hard cap on branches forked by optimal-state enumeration.
    pub max_branches: u64,
}

impl SearchPolicy {
    /// Policy for domains that must use every available resource.
    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            exhaustive: true,
            ..Self::default()
        }
    }

    /// Same policy with a different objective.
    #[must_use]
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Validate budgets before any search step is taken.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is
    /// `Some(0)` or `max_branches` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be positive when set".into(),
            });
        }
        if self.max_branches == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_branches must be positive".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            objective: Objective::Minimize,
            exhaustive: false,
            max_expansions: None,
            max_branches: DEFAULT_MAX_BRANCHES,
        }
    }
}

/// Optimization direction of the accumulated cost.
///
/// `Minimize` is the classic shortest-path formulation. `Maximize` serves
/// domains where a larger accumulated value is preferred while a validity
/// predicate keeps it under a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    /// Re-open only on a strictly smaller cost; `rank = cost + h`.
    Minimize,
    /// Re-open only on a strictly larger cost; `rank = h - cost`.
    Maximize,
}

impl Objective {
    /// Whether `candidate` is strictly better than `recorded`.
    #[must_use]
    pub fn improves(self, candidate: i64, recorded: i64) -> bool {
        match self {
            Self::Minimize => candidate < recorded,
            Self::Maximize => candidate > recorded,
        }
    }

    /// Queue rank for a node with accumulated `cost` and estimate `heuristic`.
    #[must_use]
    pub fn rank(self, cost: i64, heuristic: i64) -> i64 {
        match self {
            Self::Minimize => cost.saturating_add(heuristic),
            Self::Maximize => heuristic.saturating_sub(cost),
        }
    }

    /// Stable lowercase name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }
}
