//! Rule traits for defining lint rules.

use thiserror::Error;

use crate::budget::ErrorBudget;
use crate::config::RuleConfig;
use crate::context::FileContext;
use crate::suppression::Suppressions;
use crate::syntax::Position;
use crate::types::Finding;

/// Shape of the setting a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Any truthy value enables the rule; tables carry extra options.
    Flag,
    /// A positive number is required; other values leave the rule off.
    Threshold,
}

/// Why a checker stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The error budget ran out. Not a failure.
    #[error("error budget exhausted")]
    BudgetExhausted,

    /// The checker could not complete.
    #[error("{message}")]
    Fault {
        /// What went wrong.
        message: String,
    },
}

impl RuleError {
    /// Creates a fault with the given message.
    #[must_use]
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault {
            message: message.into(),
        }
    }
}

/// A per-file lint rule over a parsed stylesheet.
///
/// Implement this trait to create rules that inspect one stylesheet at a
/// time. Rules report findings through the [`FindingSink`] and propagate
/// its error with `?` so they stop as soon as the budget runs out.
///
/// # Example
///
/// ```
/// use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};
///
/// pub struct NoImportant;
///
/// impl Rule for NoImportant {
///     fn name(&self) -> &'static str { "no-important" }
///
///     fn check(
///         &self,
///         ctx: &FileContext,
///         _config: &RuleConfig,
///         sink: &mut FindingSink,
///     ) -> Result<(), RuleError> {
///         for declaration in ctx.sheet.declarations().filter(|d| d.important) {
///             sink.at(declaration.position, "Avoid `!important`")?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "zero-unit").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the kind of setting that enables this rule.
    fn setting_kind(&self) -> SettingKind {
        SettingKind::Flag
    }

    /// Checks one stylesheet, reporting findings to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::BudgetExhausted`] when the sink refuses further
    /// findings, or [`RuleError::Fault`] when the check cannot complete.
    fn check(
        &self,
        ctx: &FileContext,
        config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Collects findings for one rule, enforcing suppressions and the error budget.
pub struct FindingSink<'a> {
    rule: &'static str,
    ctx: FileContext<'a>,
    suppressions: &'a Suppressions,
    budget: &'a mut ErrorBudget,
    findings: Vec<Finding>,
}

impl<'a> FindingSink<'a> {
    /// Creates a sink for `rule`.
    #[must_use]
    pub fn new(
        rule: &'static str,
        ctx: FileContext<'a>,
        suppressions: &'a Suppressions,
        budget: &'a mut ErrorBudget,
    ) -> Self {
        Self {
            rule,
            ctx,
            suppressions,
            budget,
            findings: Vec::new(),
        }
    }

    /// Name of the rule this sink collects for.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// Findings that may still be recorded.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.budget.remaining()
    }

    /// Records a finding.
    ///
    /// Suppressed findings are dropped without consuming budget.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::BudgetExhausted`] if the budget was already
    /// exhausted, or became exhausted by this finding.
    pub fn report(&mut self, mut finding: Finding) -> Result<(), RuleError> {
        if self.budget.is_exhausted() {
            return Err(RuleError::BudgetExhausted);
        }
        if self.suppressions.is_suppressed(&finding.rule, finding.line) {
            tracing::debug!(rule = %finding.rule, line = ?finding.line, "Finding suppressed");
            return Ok(());
        }

        if finding.excerpt.is_none() {
            if let Some(text) = finding.line.and_then(|line| self.ctx.line_text(line)) {
                finding.excerpt = Some(text.to_string());
            }
        }
        self.findings.push(finding);
        self.budget.spend();

        if self.budget.is_exhausted() {
            Err(RuleError::BudgetExhausted)
        } else {
            Ok(())
        }
    }

    /// Records a finding for this rule at a source position.
    ///
    /// # Errors
    ///
    /// See [`FindingSink::report`].
    pub fn at(&mut self, position: Position, message: impl Into<String>) -> Result<(), RuleError> {
        self.report(Finding::at(self.rule, position, message))
    }

    /// Records a file-scoped finding for this rule.
    ///
    /// # Errors
    ///
    /// See [`FindingSink::report`].
    pub fn file(&mut self, message: impl Into<String>) -> Result<(), RuleError> {
        self.report(Finding::file_scoped(self.rule, message))
    }

    /// Consumes the sink, returning findings in report order.
    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
