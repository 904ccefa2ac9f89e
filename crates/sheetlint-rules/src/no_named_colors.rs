//! Rule to forbid named color keywords.
//!
//! # Configuration
//!
//! ```toml
//! [rules]
//! no-named-colors = true
//! # or, permitting some names:
//! no-named-colors = { allow = ["white", "black"] }
//! ```
//!
//! Only properties that take a color are inspected, so `font-family: Tomato`
//! is not a finding. `transparent` is always allowed.

use sheetlint_core::values::TokenKind;
use sheetlint_core::{Declaration, FileContext, FindingSink, Rule, RuleConfig, RuleError};

use crate::value_tokens;

/// Rule name for no-named-colors.
pub const NAME: &str = "no-named-colors";

/// Shorthands whose value may contain a color.
const COLOR_SHORTHANDS: &[&str] = &[
    "background",
    "border",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-block",
    "border-inline",
    "outline",
    "column-rule",
    "text-decoration",
    "box-shadow",
    "text-shadow",
    "fill",
    "stroke",
];

/// Flags color keywords such as `red` in favor of explicit values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNamedColors;

impl NoNamedColors {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoNamedColors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids named color keywords"
    }

    fn check(
        &self,
        ctx: &FileContext,
        config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        let allowed = config.get_str_array("allow");

        for declaration in ctx.sheet.declarations().filter(|d| takes_color(d)) {
            for token in value_tokens(&declaration.value) {
                let name = token.text.as_str();
                if token.kind() != TokenKind::Color
                    || !name.chars().all(|c| c.is_ascii_alphabetic())
                    || name.eq_ignore_ascii_case("transparent")
                    || allowed.iter().any(|a| a.eq_ignore_ascii_case(name))
                {
                    continue;
                }
                sink.at(
                    declaration.position,
                    format!("Named color `{name}` in `{}`", declaration.property),
                )?;
            }
        }
        Ok(())
    }
}

fn takes_color(declaration: &Declaration) -> bool {
    let property = declaration.property.to_ascii_lowercase();
    property == "color"
        || property.ends_with("-color")
        || COLOR_SHORTHANDS.contains(&property.as_str())
}
