//! # sheetlint-core
//!
//! Core framework for linting stylesheets.
//!
//! This crate provides the foundational traits and types for building
//! stylesheet linters. It includes:
//!
//! - [`values::classify`] for turning property values into typed tokens
//! - [`Rule`] trait for per-file rules reporting through a [`FindingSink`]
//! - [`Engine`] for evaluating rules with suppressions and an [`ErrorBudget`]
//! - [`Analyzer`] for running an engine over a directory tree
//! - [`Finding`] for representing lint findings
//!
//! ## Example
//!
//! ```
//! use sheetlint_core::{Engine, ErrorBudget, RuleSettings, Stylesheet};
//!
//! let source = "p { color: red }";
//! let sheet = Stylesheet::parse(source);
//! let engine = Engine::new(Vec::new());
//!
//! let evaluation = engine.evaluate(&sheet, source, &RuleSettings::new(), &mut ErrorBudget::default());
//! assert!(evaluation.findings.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod budget;
mod config;
mod context;
mod engine;
mod rule;
mod suppression;
mod types;

pub mod syntax;
pub mod values;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use budget::{BudgetScope, ErrorBudget, DEFAULT_MAX_ERRORS};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, RuleSettings};
pub use context::FileContext;
pub use engine::Engine;
pub use rule::{FindingSink, Rule, RuleBox, RuleError, SettingKind};
pub use suppression::{SuppressedRules, SuppressionRegion, SuppressionScope, Suppressions};
pub use syntax::{AtRule, Declaration, Position, RuleBlock, Stylesheet};
pub use types::{EvalWarning, Evaluation, FileReport, Finding, FindingDiagnostic, LintResult};
