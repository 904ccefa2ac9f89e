//! Error budget shared by the rules of one check run.

use serde::{Deserialize, Serialize};

/// Default maximum number of findings per run.
pub const DEFAULT_MAX_ERRORS: usize = 1000;

/// When the error budget is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetScope {
    /// Every file starts with a fresh budget; files may be checked in parallel.
    #[default]
    File,
    /// One budget spans all files of the run; files are checked in order.
    Batch,
}

/// Counts emitted findings against a maximum.
///
/// Once exhausted the budget stays exhausted until [`ErrorBudget::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorBudget {
    max: usize,
    spent: usize,
}

impl ErrorBudget {
    /// Creates a budget allowing `max` findings.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self { max, spent: 0 }
    }

    /// Maximum number of findings.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Number of findings counted so far.
    #[must_use]
    pub fn spent(&self) -> usize {
        self.spent
    }

    /// Findings that may still be emitted.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.spent)
    }

    /// Returns true once the maximum has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.spent >= self.max
    }

    /// Counts one emitted finding.
    pub fn spend(&mut self) {
        self.spent = self.spent.saturating_add(1);
    }

    /// Starts counting from zero again.
    pub fn reset(&mut self) {
        self.spent = 0;
    }
}

impl Default for ErrorBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ERRORS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_starts_exhausted() {
        assert!(ErrorBudget::new(0).is_exhausted());
    }

    #[test]
    fn exhausts_after_max_spends() {
        let mut budget = ErrorBudget::new(2);
        budget.spend();
        assert!(!budget.is_exhausted());
        assert_eq!(budget.remaining(), 1);
        budget.spend();
        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining(), 0);

        budget.reset();
        assert_eq!(budget.spent(), 0);
        assert!(!budget.is_exhausted());
    }
}
