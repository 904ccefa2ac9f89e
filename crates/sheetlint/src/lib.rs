//! # sheetlint
//!
//! Stylesheet linter built on a typed value tokenizer.
//!
//! This is the main facade crate that re-exports core functionality and the
//! built-in rules.
//!
//! ## Linting a string
//!
//! ```
//! use sheetlint::{RuleConfig, RuleSettings};
//!
//! let mut settings = RuleSettings::new();
//! settings.insert("zero-unit".into(), RuleConfig::from(true));
//!
//! let evaluation = sheetlint::lint_str("p { height: 0px }", &settings, 100);
//! assert_eq!(evaluation.findings[0].line, Some(1));
//! ```
//!
//! ## Classifying values
//!
//! ```
//! use sheetlint::values::TokenKind;
//!
//! let tokens = sheetlint::classify("rgb(5%, 5%, 5%)");
//! assert_eq!(tokens[0].kind(), TokenKind::Color);
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use sheetlint::Config;
//!
//! let config = Config::from_file("sheetlint.toml".as_ref())?;
//! let result = sheetlint::analyzer(config)?.root("./styles").build()?.analyze()?;
//! println!("{} findings", result.finding_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

use std::sync::LazyLock;

// Re-export core types and traits
pub use sheetlint_core::*;

pub use sheetlint_core::values::classify;

/// Built-in rules and presets.
pub mod rules {
    pub use sheetlint_rules::*;
}

static ENGINE: LazyLock<Engine> = LazyLock::new(|| Engine::new(sheetlint_rules::catalog()));

/// Errors from the facade entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured preset does not exist.
    #[error(transparent)]
    Preset(#[from] sheetlint_rules::UnknownPreset),

    /// Analysis failed.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

/// Returns the shared engine over every built-in rule.
#[must_use]
pub fn engine() -> &'static Engine {
    &ENGINE
}

/// Evaluates one parsed stylesheet against the built-in rules.
///
/// `max_errors` bounds the findings for this call.
#[must_use]
pub fn evaluate(
    sheet: &Stylesheet,
    source: &str,
    settings: &RuleSettings,
    max_errors: usize,
) -> Evaluation {
    let mut budget = ErrorBudget::new(max_errors);
    engine().evaluate(sheet, source, settings, &mut budget)
}

/// Parses and evaluates stylesheet source.
#[must_use]
pub fn lint_str(source: &str, settings: &RuleSettings, max_errors: usize) -> Evaluation {
    let sheet = Stylesheet::parse(source);
    evaluate(&sheet, source, settings, max_errors)
}

/// Creates an analyzer builder with every built-in rule and the preset
/// defaults of `config` applied.
///
/// # Errors
///
/// Returns an error if the configured preset is unknown.
pub fn analyzer(mut config: Config) -> Result<AnalyzerBuilder, Error> {
    sheetlint_rules::apply_preset(&mut config)?;
    Ok(Analyzer::builder()
        .config(config)
        .rules(sheetlint_rules::catalog()))
}
