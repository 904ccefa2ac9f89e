//! Core analyzer for orchestrating lint execution over a directory tree.

use crate::budget::{BudgetScope, ErrorBudget};
use crate::config::Config;
use crate::context::FileContext;
use crate::engine::Engine;
use crate::rule::{Rule, RuleBox};
use crate::syntax::Stylesheet;
use crate::types::{FileReport, LintResult};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error outside of any particular file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stylesheet could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The root path does not exist.
    #[error("Path not found: {0}")]
    RootNotFound(PathBuf),

    /// Directory traversal failed.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds boxed rules in evaluation order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist or an exclude pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        if !root.exists() {
            return Err(AnalyzerError::RootNotFound(root));
        }

        let exclude_patterns = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|pattern| glob::Pattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            engine: Engine::new(self.rules),
            exclude_patterns,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    engine: Engine,
    exclude_patterns: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root path being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.engine.rules().len()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all stylesheets and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails or a file cannot be read.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let files = match self.config.budget {
            BudgetScope::File => self.analyze_parallel(&files)?,
            BudgetScope::Batch => self.analyze_batch(&files)?,
        };

        let result = LintResult {
            files_checked: files.len(),
            files,
        };
        info!(
            "Analysis complete: {} findings in {} files",
            result.finding_count(),
            result.files_checked
        );
        Ok(result)
    }

    /// Each file gets a fresh budget, so files are independent.
    fn analyze_parallel(&self, files: &[PathBuf]) -> Result<Vec<FileReport>, AnalyzerError> {
        let run = || {
            files
                .par_iter()
                .map(|path| {
                    let mut budget = ErrorBudget::new(self.config.max_errors);
                    self.analyze_file(path, &mut budget)
                })
                .collect::<Result<Vec<_>, _>>()
        };

        match self.config.analyzer.parallelism {
            Some(threads) if threads > 0 => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(run),
            _ => run(),
        }
    }

    /// One budget spans all files, consumed in path order.
    fn analyze_batch(&self, files: &[PathBuf]) -> Result<Vec<FileReport>, AnalyzerError> {
        let mut budget = ErrorBudget::new(self.config.max_errors);
        let mut reports = Vec::with_capacity(files.len());

        for path in files {
            if budget.is_exhausted() {
                debug!(
                    skipped = files.len() - reports.len(),
                    "Error budget exhausted, stopping"
                );
                break;
            }
            reports.push(self.analyze_file(path, &mut budget)?);
        }
        Ok(reports)
    }

    /// Analyzes a single file.
    fn analyze_file(
        &self,
        path: &Path,
        budget: &mut ErrorBudget,
    ) -> Result<FileReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let source = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet = Stylesheet::parse(&source);
        let ctx = FileContext::new(&source, &sheet).with_path(path);
        let evaluation = self
            .engine
            .evaluate_context(ctx, &self.config.rules, budget);

        Ok(FileReport {
            path: self.relative_path(path),
            findings: evaluation.findings,
            warnings: evaluation.warnings,
            source,
        })
    }

    /// Discovers stylesheets under the root, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore)
            .parents(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|kind| kind.is_file()) || !self.has_extension(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.config
                    .analyzer
                    .extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }

    /// Checks if a path should be excluded.
    ///
    /// Patterns match against the path relative to the root or the full path.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        let base = if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        };
        path.strip_prefix(base).unwrap_or(path).to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/target/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_missing_root() {
        let result = Analyzer::builder().root("./does/not/exist").build();
        assert!(matches!(result, Err(AnalyzerError::RootNotFound(_))));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Analyzer::builder().root(".").exclude("[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/dist/**")
            .exclude("**/vendor/**")
            .build()
            .expect("Failed to build analyzer");

        let root = analyzer.root().to_path_buf();
        assert!(analyzer.should_exclude(&root.join("dist/site.css")));
        assert!(analyzer.should_exclude(&root.join("a/vendor/reset.css")));
        assert!(!analyzer.should_exclude(&root.join("styles/site.css")));
    }
}
