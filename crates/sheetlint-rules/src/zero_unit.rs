//! Rule to flag zero lengths written with a unit.
//!
//! # Rationale
//!
//! A zero length is the same in every unit, so the unit only adds noise.
//!
//! # Detected Patterns
//!
//! ```css
//! p { height: 0px; margin: 0 0em; }
//! ```
//!
//! # Good Patterns
//!
//! ```css
//! p { height: 0; transition-duration: 0s; }
//! ```
//!
//! Angles, times and percentages are left alone; only length dimensions
//! are checked.

use sheetlint_core::values::{TokenKind, LENGTH_UNITS};
use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

use crate::value_tokens;

/// Rule name for zero-unit.
pub const NAME: &str = "zero-unit";

/// Flags zero-valued lengths that carry a unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroUnit;

impl ZeroUnit {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ZeroUnit {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags zero lengths that carry a redundant unit"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        for declaration in ctx.sheet.declarations() {
            for token in value_tokens(&declaration.value) {
                if token.kind() != TokenKind::Dimension || token.number() != Some(0.0) {
                    continue;
                }
                let Some(unit) = token.unit().filter(|unit| LENGTH_UNITS.contains(unit)) else {
                    continue;
                };
                sink.at(
                    declaration.position,
                    format!(
                        "Unit `{unit}` is redundant on zero value `{}` in `{}`",
                        token.text, declaration.property
                    ),
                )?;
            }
        }
        Ok(())
    }
}
