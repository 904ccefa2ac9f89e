//! Rule to forbid vendor-prefixed properties.
//!
//! # Configuration
//!
//! ```toml
//! [rules]
//! no-vendor-prefix = { allow = ["-webkit-appearance"] }
//! ```

use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

/// Rule name for no-vendor-prefix.
pub const NAME: &str = "no-vendor-prefix";

const PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Flags properties carrying a vendor prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVendorPrefix;

impl NoVendorPrefix {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoVendorPrefix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids -webkit-, -moz-, -ms- and -o- properties"
    }

    fn check(
        &self,
        ctx: &FileContext,
        config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        let allowed = config.get_str_array("allow");

        for declaration in ctx.sheet.declarations() {
            let property = declaration.property.to_ascii_lowercase();
            let Some(prefix) = PREFIXES.iter().find(|p| property.starts_with(*p)) else {
                continue;
            };
            if allowed.iter().any(|a| a.eq_ignore_ascii_case(&property)) {
                continue;
            }
            let standard = &property[prefix.len()..];
            sink.at(
                declaration.position,
                format!(
                    "Vendor-prefixed property `{}`; use `{standard}`",
                    declaration.property
                ),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{check, check_flag};

    #[test]
    fn test_detects_prefixes() {
        let source = "a { -webkit-transition: none; -moz-box-sizing: border-box; transition: none }";
        let findings = check_flag(&NoVendorPrefix, source);
        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings[0].message,
            "Vendor-prefixed property `-webkit-transition`; use `transition`"
        );
    }

    #[test]
    fn test_allow_list() {
        let mut options = toml::Table::new();
        options.insert(
            "allow".into(),
            toml::Value::Array(vec![toml::Value::String("-webkit-appearance".into())]),
        );
        let source = "a { -webkit-appearance: none; -ms-filter: none }";
        let findings = check(&NoVendorPrefix, source, &RuleConfig::from(options));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("`-ms-filter`"));
    }
}
