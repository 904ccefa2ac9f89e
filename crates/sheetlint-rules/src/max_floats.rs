//! Rule to limit the number of `float` declarations in a file.
//!
//! Heavy use of floats usually means a layout system is being rebuilt by
//! hand. The setting is the maximum count:
//!
//! ```toml
//! [rules]
//! max-floats = 10
//! ```
//!
//! `float: none` does not count.

use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError, SettingKind};

/// Rule name for max-floats.
pub const NAME: &str = "max-floats";

/// Reports a file-scoped finding when `float` is used too often.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFloats;

impl MaxFloats {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MaxFloats {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits the number of float declarations per file"
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
        let count = ctx
            .sheet
            .declarations()
            .filter(|d| d.is("float") && !d.value.eq_ignore_ascii_case("none"))
            .count() as u64;

        if count > max {
            sink.file(format!(
                "Too many `float` declarations ({count}, max {max})"
            ))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::check;

    const SOURCE: &str = "a { float: left }\nb { float: right }\nc { float: none }\nd { FLOAT: left }";

    #[test]
    fn test_over_threshold() {
        let findings = check(&MaxFloats, SOURCE, &RuleConfig::from(2));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_file_scoped());
        assert_eq!(findings[0].message, "Too many `float` declarations (3, max 2)");
    }

    #[test]
    fn test_at_threshold() {
        assert!(check(&MaxFloats, SOURCE, &RuleConfig::from(3)).is_empty());
    }

    #[test]
    fn test_threshold_kind() {
        assert_eq!(MaxFloats.setting_kind(), SettingKind::Threshold);
    }
}
