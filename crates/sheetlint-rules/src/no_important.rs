//! Rule to forbid `!important`.

use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

/// Rule name for no-important.
pub const NAME: &str = "no-important";

/// Flags declarations marked `!important`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImportant;

impl NoImportant {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoImportant {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids !important declarations"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        for declaration in ctx.sheet.declarations().filter(|d| d.important) {
            sink.at(
                declaration.position,
                format!("Avoid `!important` on `{}`", declaration.property),
            )?;
        }
        Ok(())
    }
}
