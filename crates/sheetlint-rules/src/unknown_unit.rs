//! Rule to flag dimensions with an unrecognized unit, such as `123dd`.

use sheetlint_core::values::{TokenKind, LENGTH_UNITS};
use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

use crate::value_tokens;

/// Rule name for unknown-unit.
pub const NAME: &str = "unknown-unit";

/// Flags dimension tokens whose unit is not a known length unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownUnit;

impl UnknownUnit {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UnknownUnit {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags numbers followed by an unrecognized unit"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        for declaration in ctx.sheet.declarations() {
            for token in value_tokens(&declaration.value) {
                if token.kind() != TokenKind::Dimension {
                    continue;
                }
                if let Some(unit) = token.unit().filter(|unit| !LENGTH_UNITS.contains(unit)) {
                    sink.at(
                        declaration.position,
                        format!("Unknown unit `{unit}` in `{}`", token.text),
                    )?;
                }
            }
        }
        Ok(())
    }
}
