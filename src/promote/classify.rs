//! Commit maturity classification

use crate::types::CommitInfo;
use chrono::{DateTime, Utc};

/// Default number of commits that must follow a commit for it to mature
pub const DEFAULT_MATURE_COUNT: usize = 20;

/// Default age in days for the age-based policy
pub const DEFAULT_MATURE_AGE_DAYS: u32 = 1;

/// Rule deciding whether a commit is mature enough to promote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaturityPolicy {
    /// Stable iff at least `min_trailing` commits follow it
    Count {
        /// Required number of later commits
        min_trailing: usize,
    },
    /// Stable iff committed at least `min_days` whole days before now
    Age {
        /// Required age in days
        min_days: u32,
    },
    /// Stable iff both the count and the age rule hold
    CountAndAge {
        /// Required number of later commits
        min_trailing: usize,
        /// Required age in days
        min_days: u32,
    },
}

impl Default for MaturityPolicy {
    fn default() -> Self {
        Self::Count {
            min_trailing: DEFAULT_MATURE_COUNT,
        }
    }
}

impl MaturityPolicy {
    /// Select a policy from the optional CLI thresholds
    ///
    /// Count alone (or nothing) selects `Count`, age alone selects `Age`,
    /// both select `CountAndAge`.
    pub fn from_options(count: Option<usize>, age_days: Option<u32>) -> Self {
        match (count, age_days) {
            (None, None) => Self::default(),
            (Some(min_trailing), None) => Self::Count { min_trailing },
            (None, Some(min_days)) => Self::Age { min_days },
            (Some(min_trailing), Some(min_days)) => Self::CountAndAge {
                min_trailing,
                min_days,
            },
        }
    }

    /// Whether the commit at `index` of a `total`-long sequence is stable
    fn is_stable(self, index: usize, total: usize, commit: &CommitInfo, now: DateTime<Utc>) -> bool {
        let trailing = total - 1 - index;
        let age_days = now.signed_duration_since(commit.committed_at).num_days();

        match self {
            Self::Count { min_trailing } => trailing >= min_trailing,
            Self::Age { min_days } => age_days >= i64::from(min_days),
            Self::CountAndAge {
                min_trailing,
                min_days,
            } => trailing >= min_trailing && age_days >= i64::from(min_days),
        }
    }
}

/// Commits partitioned by maturity, each side in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Mature commits
    pub stable: Vec<CommitInfo>,
    /// Commits that are still too recent
    pub unstable: Vec<CommitInfo>,
}

impl Classification {
    /// Total number of classified commits
    pub fn len(&self) -> usize {
        self.stable.len() + self.unstable.len()
    }

    /// Whether no commits were classified
    pub fn is_empty(&self) -> bool {
        self.stable.is_empty() && self.unstable.is_empty()
    }
}

/// Partition `commits` (oldest first) into stable and unstable
pub fn classify_commits(
    commits: Vec<CommitInfo>,
    policy: MaturityPolicy,
    now: DateTime<Utc>,
) -> Classification {
    let total = commits.len();
    let (stable, unstable): (Vec<_>, Vec<_>) = commits
        .into_iter()
        .enumerate()
        .partition(|(index, commit)| policy.is_stable(*index, total, commit, now));

    Classification {
        stable: stable.into_iter().map(|(_, c)| c).collect(),
        unstable: unstable.into_iter().map(|(_, c)| c).collect(),
    }
}
