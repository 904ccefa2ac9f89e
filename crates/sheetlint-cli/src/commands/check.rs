//! Check command implementation.

use anyhow::{bail, Context, Result};
use sheetlint_core::{Analyzer, Config, RuleBox, RuleConfig, SettingKind};
use sheetlint_rules::{apply_preset, catalog, select, Preset, RuleId};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line overrides for the check command.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Comma-separated rule names to run instead of the whole catalog.
    pub rules: Option<String>,
    /// Overrides `max_errors` from the configuration.
    pub max_errors: Option<usize>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the check command. Returns true if any finding was reported.
pub fn run(
    path: &Path,
    format: OutputFormat,
    options: CheckOptions,
    source: &ConfigSource,
) -> Result<bool> {
    let mut config = load_config(source)?;
    let rules = prepare(&mut config, &options)?;

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .rules(rules)
        .excludes(options.exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    Ok(result.has_findings())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Applies presets and command-line overrides, returning the rules to run.
///
/// A configuration without a preset or any rule settings gets the
/// recommended preset.
fn prepare(config: &mut Config, options: &CheckOptions) -> Result<Vec<RuleBox>> {
    if let Some(max_errors) = options.max_errors {
        config.max_errors = max_errors;
    }
    if config.preset.is_none() && config.rules.is_empty() {
        config.preset = Some(Preset::Recommended.name().to_string());
    }
    apply_preset(config)?;

    let Some(filter) = options.rules.as_deref() else {
        return Ok(catalog());
    };

    let ids = parse_rule_filter(filter)?;
    for id in &ids {
        let enabled = config.rule(id.name()).is_some_and(RuleConfig::is_enabled);
        if enabled {
            continue;
        }
        if id.rule().setting_kind() == SettingKind::Threshold {
            tracing::warn!("Rule {id} needs a threshold in the configuration; skipping");
        } else {
            config.rules.insert(id.name().to_string(), RuleConfig::from(true));
        }
    }
    Ok(select(&ids))
}

fn parse_rule_filter(filter: &str) -> Result<Vec<RuleId>> {
    let mut ids = Vec::new();
    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match RuleId::from_name(name) {
            Some(id) => ids.push(id),
            None => bail!("Unknown rule: {name} (see `sheetlint list-rules`)"),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.name()).collect()
    }

    #[test]
    fn empty_config_uses_recommended_preset() {
        let mut config = Config::default();
        let rules = prepare(&mut config, &CheckOptions::default()).unwrap();

        assert_eq!(rules.len(), RuleId::ALL.len());
        assert!(config.is_rule_enabled("zero-unit"));
        assert!(!config.is_rule_enabled("no-named-colors"));
    }

    #[test]
    fn explicit_rules_disable_preset_fallback() {
        let mut config = Config::default().with_rule("no-import", true);
        prepare(&mut config, &CheckOptions::default()).unwrap();

        assert!(config.is_rule_enabled("no-import"));
        assert!(!config.is_rule_enabled("zero-unit"));
    }

    #[test]
    fn rule_filter_selects_and_enables() {
        let mut config = Config::default().with_rule("no-import", false);
        let options = CheckOptions {
            rules: Some("no-import, zero-unit".into()),
            max_errors: Some(7),
            ..CheckOptions::default()
        };
        let rules = prepare(&mut config, &options).unwrap();

        assert_eq!(names(&rules), vec!["zero-unit", "no-import"]);
        assert!(config.is_rule_enabled("no-import"));
        assert_eq!(config.max_errors, 7);
    }

    #[test]
    fn rule_filter_rejects_unknown_names() {
        let mut config = Config::default();
        let options = CheckOptions {
            rules: Some("zero-unit,bogus".into()),
            ..CheckOptions::default()
        };
        let error = prepare(&mut config, &options).err().unwrap();
        assert!(error.to_string().contains("bogus"));
    }
}
