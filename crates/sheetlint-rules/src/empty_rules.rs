//! Rule to flag blocks without declarations.

use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

/// Rule name for empty-rules.
pub const NAME: &str = "empty-rules";

/// Flags rule blocks that contain no declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRules;

impl EmptyRules {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmptyRules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags rules with an empty declaration block"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        for block in ctx.sheet.blocks.iter().filter(|b| b.declarations.is_empty()) {
            sink.at(block.position, format!("Rule `{}` is empty", block.selector))?;
        }
        Ok(())
    }
}
