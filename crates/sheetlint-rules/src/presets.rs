//! Rule presets for common configurations.

use sheetlint_core::{Config, RuleConfig, RuleSettings};
use tracing::debug;

use crate::RuleId;

/// Preset configurations for sheetlint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Every rule, with tight thresholds.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Minimal];

    /// Returns the preset name used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Looks up a preset by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    /// Returns the default rule settings for this preset.
    #[must_use]
    pub fn settings(self) -> RuleSettings {
        match self {
            Self::Recommended => recommended_settings(),
            Self::Strict => strict_settings(),
            Self::Minimal => minimal_settings(),
        }
    }
}

/// Returns the recommended settings.
///
/// Includes:
/// - `zero-unit`, `unknown-unit`, `hex-shorthand`
/// - `no-important`, `duplicate-properties`, `empty-rules`, `no-import`
/// - `max-font-faces = 5`
#[must_use]
pub fn recommended_settings() -> RuleSettings {
    let mut settings = flags(&[
        RuleId::ZeroUnit,
        RuleId::UnknownUnit,
        RuleId::HexShorthand,
        RuleId::NoImportant,
        RuleId::DuplicateProperties,
        RuleId::EmptyRules,
        RuleId::NoImport,
    ]);
    settings.insert(RuleId::MaxFontFaces.name().to_string(), RuleConfig::from(5));
    settings
}

/// Returns the strict settings.
///
/// Enables every flag rule, plus `max-floats = 10` and `max-font-faces = 3`.
#[must_use]
pub fn strict_settings() -> RuleSettings {
    let mut settings = flags(&[
        RuleId::ZeroUnit,
        RuleId::UnknownUnit,
        RuleId::HexShorthand,
        RuleId::NoNamedColors,
        RuleId::NoImportant,
        RuleId::DuplicateProperties,
        RuleId::EmptyRules,
        RuleId::NoImport,
        RuleId::NoVendorPrefix,
    ]);
    settings.insert(RuleId::MaxFloats.name().to_string(), RuleConfig::from(10));
    settings.insert(RuleId::MaxFontFaces.name().to_string(), RuleConfig::from(3));
    settings
}

/// Returns the minimal settings: `unknown-unit` and `duplicate-properties`.
#[must_use]
pub fn minimal_settings() -> RuleSettings {
    flags(&[RuleId::UnknownUnit, RuleId::DuplicateProperties])
}

fn flags(ids: &[RuleId]) -> RuleSettings {
    ids.iter()
        .map(|id| (id.name().to_string(), RuleConfig::from(true)))
        .collect()
}

/// A configured preset name that matches no preset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset '{0}' (expected recommended, strict or minimal)")]
pub struct UnknownPreset(pub String);

/// Fills rule settings from the configured preset.
///
/// User entries in `[rules]` win over preset defaults. Without a preset the
/// configuration is left untouched.
///
/// # Errors
///
/// Returns the unrecognized name if `config.preset` names no preset.
pub fn apply_preset(config: &mut Config) -> Result<(), UnknownPreset> {
    let Some(name) = config.preset.as_deref() else {
        return Ok(());
    };
    let preset = Preset::from_name(name).ok_or_else(|| UnknownPreset(name.to_string()))?;
    debug!(preset = preset.name(), "Applying preset defaults");
    config.apply_defaults(preset.settings());
    Ok(())
}
