//! List rules command implementation.

use sheetlint_core::SettingKind;
use sheetlint_rules::{Preset, RuleId};

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "Available rules:\n");
    let _ = writeln!(out, "{:<22} {:<10} Description", "Name", "Setting");
    let _ = writeln!(out, "{}", "-".repeat(80));

    for id in RuleId::ALL {
        let rule = id.rule();
        let kind = match rule.setting_kind() {
            SettingKind::Flag => "flag",
            SettingKind::Threshold => "threshold",
        };
        let _ = writeln!(out, "{:<22} {kind:<10} {}", id.name(), rule.description());
    }

    let _ = writeln!(out, "\nPresets:");
    for preset in Preset::ALL {
        let settings = preset.settings();
        let names: Vec<String> = settings
            .iter()
            .map(|(name, config)| match config.threshold() {
                Some(max) if config.value().is_integer() => format!("{name}={max}"),
                _ => name.clone(),
            })
            .collect();
        let _ = writeln!(out, "  {:<12} {}", preset.name(), names.join(", "));
    }

    let _ = writeln!(out, "\nUse --rules to run specific rules, e.g.:");
    let _ = writeln!(out, "  sheetlint check --rules zero-unit,no-important");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule_and_preset() {
        let text = render();
        for id in RuleId::ALL {
            assert!(text.contains(id.name()), "missing {id}");
        }
        for preset in Preset::ALL {
            assert!(text.contains(preset.name()));
        }
        assert!(text.contains("max-floats             threshold"));
        assert!(text.contains("max-font-faces=5"));
    }
}
