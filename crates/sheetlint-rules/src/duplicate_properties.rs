//! Rule to flag properties declared twice in the same block.
//!
//! # Configuration
//!
//! ```toml
//! [rules]
//! duplicate-properties = { allow_fallbacks = true }
//! ```
//!
//! With `allow_fallbacks`, consecutive repeats with different values are
//! permitted, which is the usual progressive-enhancement idiom:
//!
//! ```css
//! a { width: 100px; width: calc(100% - 1em); }
//! ```

use std::collections::HashMap;

use sheetlint_core::{Declaration, FileContext, FindingSink, Rule, RuleConfig, RuleError};

/// Rule name for duplicate-properties.
pub const NAME: &str = "duplicate-properties";

/// Flags repeated properties within one declaration block.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateProperties;

impl DuplicateProperties {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DuplicateProperties {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags properties declared more than once in a block"
    }

    fn check(
        &self,
        ctx: &FileContext,
        config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        let allow_fallbacks = config.get_bool("allow_fallbacks", false);

        for block in &ctx.sheet.blocks {
            let mut seen: HashMap<String, &Declaration> = HashMap::new();
            let mut previous: Option<&Declaration> = None;

            for declaration in &block.declarations {
                let key = declaration.property.to_ascii_lowercase();
                let is_fallback = previous.is_some_and(|prev| {
                    prev.is(&declaration.property) && prev.value != declaration.value
                });

                if let Some(first) = seen.get(&key) {
                    if !(allow_fallbacks && is_fallback) {
                        sink.at(
                            declaration.position,
                            format!(
                                "Property `{}` is already declared on line {}",
                                declaration.property, first.position.line
                            ),
                        )?;
                    }
                } else {
                    seen.insert(key, declaration);
                }
                previous = Some(declaration);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{check, check_flag};

    #[test]
    fn test_detects_duplicates() {
        let source = "a {\n  color: red;\n  margin: 0;\n  COLOR: blue;\n}";
        let findings = check_flag(&DuplicateProperties, source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(4));
        assert_eq!(
            findings[0].message,
            "Property `COLOR` is already declared on line 2"
        );
    }

    #[test]
    fn test_blocks_are_independent() {
        let source = "a { color: red } b { color: red }";
        assert!(check_flag(&DuplicateProperties, source).is_empty());
    }

    #[test]
    fn test_allow_fallbacks() {
        let source = "a { width: 100px; width: calc(100% - 1em); color: red; margin: 0; color: red }";
        let mut options = toml::Table::new();
        options.insert("allow_fallbacks".into(), toml::Value::Boolean(true));
        let findings = check(&DuplicateProperties, source, &RuleConfig::from(options));

        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("`color`"));
        assert_eq!(check_flag(&DuplicateProperties, source).len(), 2);
    }
}
