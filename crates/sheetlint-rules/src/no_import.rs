//! Rule to forbid `@import`.
//!
//! Imported stylesheets load serially; bundling or `<link>` elements avoid
//! the extra round trips.

use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

/// Rule name for no-import.
pub const NAME: &str = "no-import";

/// Flags `@import` at-rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImport;

impl NoImport {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids @import"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        for import in ctx.sheet.at_rules_named("import") {
            sink.at(
                import.position,
                format!("Avoid `@import {}`", import.prelude),
            )?;
        }
        Ok(())
    }
}
