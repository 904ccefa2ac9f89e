//! # sheetlint-rules
//!
//! Built-in lint rules for sheetlint.
//!
//! ## Available Rules
//!
//! Rules are listed in evaluation order, which is also the order of their
//! findings in a report.
//!
//! | Name | Setting | Description |
//! |------|---------|-------------|
//! | `zero-unit` | flag | Zero lengths with a redundant unit (`0px`) |
//! | `unknown-unit` | flag | Numbers followed by an unrecognized unit (`123dd`) |
//! | `hex-shorthand` | flag | `#aabbcc` where `#abc` would do |
//! | `no-named-colors` | flag / `{ allow = [..] }` | Color keywords such as `red` |
//! | `no-important` | flag | `!important` declarations |
//! | `duplicate-properties` | flag / `{ allow_fallbacks = true }` | A property declared twice in one block |
//! | `empty-rules` | flag | Blocks without declarations |
//! | `no-import` | flag | `@import` |
//! | `no-vendor-prefix` | flag / `{ allow = [..] }` | `-webkit-`, `-moz-`, `-ms-`, `-o-` properties |
//! | `max-floats` | threshold | More `float` declarations than allowed |
//! | `max-font-faces` | threshold | More `@font-face` rules than allowed |
//!
//! ## Usage
//!
//! ```
//! use sheetlint_core::{Engine, ErrorBudget, RuleConfig, RuleSettings, Stylesheet};
//!
//! let source = "p { height: 0px }";
//! let mut settings = RuleSettings::new();
//! settings.insert("zero-unit".into(), RuleConfig::from(true));
//!
//! let engine = Engine::new(sheetlint_rules::catalog());
//! let sheet = Stylesheet::parse(source);
//! let evaluation = engine.evaluate(&sheet, source, &settings, &mut ErrorBudget::default());
//! assert_eq!(evaluation.findings.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod duplicate_properties;
pub mod empty_rules;
pub mod hex_shorthand;
pub mod max_floats;
pub mod max_font_faces;
pub mod no_import;
pub mod no_important;
pub mod no_named_colors;
pub mod no_vendor_prefix;
pub mod unknown_unit;
pub mod zero_unit;

mod presets;
mod registry;

pub use duplicate_properties::DuplicateProperties;
pub use empty_rules::EmptyRules;
pub use hex_shorthand::HexShorthand;
pub use max_floats::MaxFloats;
pub use max_font_faces::MaxFontFaces;
pub use no_import::NoImport;
pub use no_important::NoImportant;
pub use no_named_colors::NoNamedColors;
pub use no_vendor_prefix::NoVendorPrefix;
pub use presets::{
    apply_preset, minimal_settings, recommended_settings, strict_settings, Preset, UnknownPreset,
};
pub use registry::{catalog, rule_names, select, RuleId};
pub use unknown_unit::UnknownUnit;
pub use zero_unit::ZeroUnit;

/// Re-export core types for convenience.
pub use sheetlint_core::{Finding, Rule};

use sheetlint_core::values::{classify, components, Token};

/// Classifies every whitespace-separated component of a declaration value.
pub(crate) fn value_tokens(value: &str) -> impl Iterator<Item = Token> + '_ {
    components(value)
        .into_iter()
        .flat_map(|component| classify(component))
}
