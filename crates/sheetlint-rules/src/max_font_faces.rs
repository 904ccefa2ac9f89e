//! Rule to limit the number of `@font-face` rules in a file.

use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError, SettingKind};

/// Rule name for max-font-faces.
pub const NAME: &str = "max-font-faces";

/// Reports a file-scoped finding when too many web fonts are declared.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFontFaces;

impl MaxFontFaces {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MaxFontFaces {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of @font-face rules per file"
    }

    fn setting_kind(&self) -> SettingKind {
        SettingKind::Threshold
    }

    fn check(
        &self,
        ctx: &FileContext,
        config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        let Some(max) = config.threshold() else {
            return Ok(());
        };
        let count = ctx.sheet.at_rules_named("font-face").count() as u64;

        if count > max {
            sink.file(format!("Too many `@font-face` rules ({count}, max {max})"))?;
        }
        Ok(())
    }
}
