//! Closed registry of built-in rules.

use std::fmt;

use sheetlint_core::{Rule, RuleBox};

use crate::{
    duplicate_properties, empty_rules, hex_shorthand, max_floats, max_font_faces, no_import,
    no_important, no_named_colors, no_vendor_prefix, unknown_unit, zero_unit,
};
use crate::{
    DuplicateProperties, EmptyRules, HexShorthand, MaxFloats, MaxFontFaces, NoImport,
    NoImportant, NoNamedColors, NoVendorPrefix, UnknownUnit, ZeroUnit,
};

/// Identifier of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    /// `zero-unit`
    ZeroUnit,
    /// `unknown-unit`
    UnknownUnit,
    /// `hex-shorthand`
    HexShorthand,
    /// `no-named-colors`
    NoNamedColors,
    /// `no-important`
    NoImportant,
    /// `duplicate-properties`
    DuplicateProperties,
    /// `empty-rules`
    EmptyRules,
    /// `no-import`
    NoImport,
    /// `no-vendor-prefix`
    NoVendorPrefix,
    /// `max-floats`
    MaxFloats,
    /// `max-font-faces`
    MaxFontFaces,
}

impl RuleId {
    /// Every rule in evaluation order.
    pub const ALL: [Self; 11] = [
        Self::ZeroUnit,
        Self::UnknownUnit,
        Self::HexShorthand,
        Self::NoNamedColors,
        Self::NoImportant,
        Self::DuplicateProperties,
        Self::EmptyRules,
        Self::NoImport,
        Self::NoVendorPrefix,
        Self::MaxFloats,
        Self::MaxFontFaces,
    ];

    /// Returns the configuration name of the rule.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZeroUnit => zero_unit::NAME,
            Self::UnknownUnit => unknown_unit::NAME,
            Self::HexShorthand => hex_shorthand::NAME,
            Self::NoNamedColors => no_named_colors::NAME,
            Self::NoImportant => no_important::NAME,
            Self::DuplicateProperties => duplicate_properties::NAME,
            Self::EmptyRules => empty_rules::NAME,
            Self::NoImport => no_import::NAME,
            Self::NoVendorPrefix => no_vendor_prefix::NAME,
            Self::MaxFloats => max_floats::NAME,
            Self::MaxFontFaces => max_font_faces::NAME,
        }
    }

    /// Looks up a rule by configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Creates the checker for this rule.
    #[must_use]
    pub fn rule(self) -> RuleBox {
        match self {
            Self::ZeroUnit => Box::new(ZeroUnit::new()),
            Self::UnknownUnit => Box::new(UnknownUnit::new()),
            Self::HexShorthand => Box::new(HexShorthand::new()),
            Self::NoNamedColors => Box::new(NoNamedColors::new()),
            Self::NoImportant => Box::new(NoImportant::new()),
            Self::DuplicateProperties => Box::new(DuplicateProperties::new()),
            Self::EmptyRules => Box::new(EmptyRules::new()),
            Self::NoImport => Box::new(NoImport::new()),
            Self::NoVendorPrefix => Box::new(NoVendorPrefix::new()),
            Self::MaxFloats => Box::new(MaxFloats::new()),
            Self::MaxFontFaces => Box::new(MaxFontFaces::new()),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown rule: {s}"))
    }
}

/// Returns every built-in checker in evaluation order.
#[must_use]
pub fn catalog() -> Vec<RuleBox> {
    RuleId::ALL.into_iter().map(RuleId::rule).collect()
}

/// Returns checkers for the given rules, kept in evaluation order.
#[must_use]
pub fn select(ids: &[RuleId]) -> Vec<RuleBox> {
    RuleId::ALL
        .into_iter()
        .filter(|id| ids.contains(id))
        .map(RuleId::rule)
        .collect()
}

/// Returns every rule name in evaluation order.
#[must_use]
pub fn rule_names() -> Vec<&'static str> {
    RuleId::ALL.into_iter().map(RuleId::name).collect()
}
