//! Rule to prefer three-digit hex colors.
//!
//! `#aabbcc` and `#abc` denote the same color; the shorter form is flagged
//! whenever every channel repeats its digit.

use sheetlint_core::values::TokenKind;
use sheetlint_core::{FileContext, FindingSink, Rule, RuleConfig, RuleError};

use crate::value_tokens;

/// Rule name for hex-shorthand.
pub const NAME: &str = "hex-shorthand";

/// Flags six-digit hex colors expressible with three digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexShorthand;

impl HexShorthand {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for HexShorthand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Prefers #abc over #aabbcc"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _config: &RuleConfig,
        sink: &mut FindingSink,
    ) -> Result<(), RuleError> {
        for declaration in ctx.sheet.declarations() {
            for token in value_tokens(&declaration.value) {
                if token.kind() != TokenKind::Color {
                    continue;
                }
                if let Some(short) = shorthand(&token.text) {
                    sink.at(
                        declaration.position,
                        format!("Color `{}` can be written as `{short}`", token.text),
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Returns the three-digit form of a six-digit hex color, if one exists.
fn shorthand(text: &str) -> Option<String> {
    let digits = text.strip_prefix('#').filter(|digits| digits.len() == 6)?;
    let bytes = digits.as_bytes();
    bytes
        .chunks(2)
        .all(|pair| pair[0].eq_ignore_ascii_case(&pair[1]))
        .then(|| {
            let short: String = bytes.chunks(2).map(|pair| char::from(pair[0])).collect();
            format!("#{short}")
        })
}
