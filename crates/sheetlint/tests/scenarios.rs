//! End-to-end behavior of the built-in catalog through the facade.

use sheetlint::rules::{strict_settings, RuleId};
use sheetlint::values::{classify, TokenKind};
use sheetlint::{lint_str, Config, RuleConfig, RuleSettings};

fn only(rules: &[&str]) -> RuleSettings {
    rules
        .iter()
        .map(|name| ((*name).to_string(), RuleConfig::from(true)))
        .collect()
}

const FLAGGABLE: &str = "\
@import 'base.css';
a {
  margin: 0px;
  color: #ffffff !important;
  color: red;
}
b {}
";

#[test]
fn zero_unit_scenario() {
    let evaluation = lint_str("p { height: 0px }", &only(&["zero-unit"]), 1000);

    assert_eq!(evaluation.findings.len(), 1);
    let finding = &evaluation.findings[0];
    assert_eq!(finding.rule, "zero-unit");
    assert_eq!(finding.line, Some(1));
    assert!(finding.message.contains("height"));
}

#[test]
fn disable_all_directive_silences_everything() {
    let source = format!("/* sheetlint-disable */\n{FLAGGABLE}");
    let evaluation = lint_str(&source, &strict_settings(), 1000);
    assert!(evaluation.findings.is_empty());
    assert!(evaluation.warnings.is_empty());
}

#[test]
fn named_directive_silences_only_that_rule() {
    let source = format!("{FLAGGABLE}/* sheetlint-disable: no-important, empty-rules */\n");
    let evaluation = lint_str(&source, &strict_settings(), 1000);

    assert!(!evaluation.findings.is_empty());
    assert!(evaluation
        .findings
        .iter()
        .all(|f| f.rule != "no-important" && f.rule != "empty-rules"));
}

#[test]
fn directive_after_url_still_applies() {
    let source = "a { background: url(http://x.com/a.png) } /* sheetlint-disable: zero-unit */\n\
                  b { margin: 0px }";
    let evaluation = lint_str(source, &only(&["zero-unit"]), 1000);
    assert!(evaluation.findings.is_empty());
}

#[test]
fn comment_marker_inside_string_does_not_swallow_directive() {
    let source = "a { content: \"/*\" }\nb { margin: 0px }\n/* sheetlint-disable: zero-unit */";
    let evaluation = lint_str(source, &only(&["zero-unit"]), 1000);
    assert!(evaluation.findings.is_empty());
}

#[test]
fn disable_below_keeps_earlier_findings() {
    let source = "a { margin: 0px }\n/* sheetlint-disable-below: zero-unit */\nb { margin: 0px }";
    let evaluation = lint_str(source, &only(&["zero-unit"]), 1000);

    let lines: Vec<_> = evaluation.findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![Some(1)]);
}

#[test]
fn zero_budget_returns_nothing() {
    let evaluation = lint_str(FLAGGABLE, &strict_settings(), 0);
    assert!(evaluation.findings.is_empty());
    assert!(evaluation.budget_exhausted);
}

#[test]
fn budget_cutoff_follows_registration_order() {
    let all = lint_str(FLAGGABLE, &strict_settings(), 1000);
    let capped = lint_str(FLAGGABLE, &strict_settings(), 3);

    assert!(all.findings.len() > 3);
    assert_eq!(capped.findings, all.findings[..3]);
    assert!(capped.budget_exhausted);
}

#[test]
fn findings_follow_registration_order() {
    let evaluation = lint_str(FLAGGABLE, &strict_settings(), 1000);
    let order: Vec<_> = evaluation
        .findings
        .iter()
        .map(|f| RuleId::from_name(&f.rule).expect("built-in rule"))
        .collect();

    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);

    insta::assert_snapshot!(
        evaluation
            .findings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        @r"
    3:3: [zero-unit] Unit `px` is redundant on zero value `0px` in `margin`
    4:3: [hex-shorthand] Color `#ffffff` can be written as `#fff`
    5:3: [no-named-colors] Named color `red` in `color`
    4:3: [no-important] Avoid `!important` on `color`
    5:3: [duplicate-properties] Property `color` is already declared on line 4
    7:1: [empty-rules] Rule `b` is empty
    1:1: [no-import] Avoid `@import 'base.css'`
    "
    );
}

#[test]
fn misconfigured_threshold_is_skipped() {
    let mut settings = RuleSettings::new();
    settings.insert("max-font-faces".into(), RuleConfig::from(true));
    let source = "@font-face { font-family: A }\n@font-face { font-family: B }";

    assert!(lint_str(source, &settings, 1000).findings.is_empty());

    settings.insert("max-font-faces".into(), RuleConfig::from(1));
    let evaluation = lint_str(source, &settings, 1000);
    assert_eq!(evaluation.findings.len(), 1);
    assert!(evaluation.findings[0].is_file_scoped());
}

#[test]
fn unknown_rule_in_directive_warns() {
    let evaluation = lint_str(
        "/* sheetlint-disable: zero-units */\np { height: 0px }",
        &only(&["zero-unit"]),
        1000,
    );
    assert_eq!(evaluation.findings.len(), 1);
    assert_eq!(evaluation.warnings.len(), 1);
    assert_eq!(evaluation.warnings[0].rule, "zero-units");
}

#[test]
fn unknown_unit_is_a_dimension() {
    let tokens = classify("123dd");
    assert_eq!(tokens[0].kind(), TokenKind::Dimension);

    let evaluation = lint_str("a { width: 123dd }", &only(&["unknown-unit"]), 1000);
    assert_eq!(evaluation.findings.len(), 1);
}

#[test]
fn config_file_drives_settings() {
    let config = Config::parse("[rules]\nno-import = true\nzero-unit = false\n").expect("valid");
    let evaluation = lint_str(FLAGGABLE, &config.rules, 1000);

    assert_eq!(evaluation.findings.len(), 1);
    assert_eq!(evaluation.findings[0].rule, "no-import");
}

#[test]
fn analyzer_applies_preset_to_directory() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("site.css"), "a { margin: 0px; }\n").expect("write");
    std::fs::write(dir.path().join("theme.css"), "@import 'x.css';\n").expect("write");

    let config = Config::parse("preset = \"recommended\"\n").expect("valid");
    let result = sheetlint::analyzer(config)
        .expect("known preset")
        .root(dir.path())
        .build()
        .expect("analyzer")
        .analyze()
        .expect("analysis");

    let found: Vec<String> = result
        .findings()
        .map(|(path, finding)| format!("{} {finding}", path.display()))
        .collect();
    assert_eq!(result.files_checked, 2);
    assert_eq!(found.len(), 2);
    assert!(found[0].starts_with("site.css 1:5: [zero-unit]"));
    assert!(found[1].starts_with("theme.css 1:1: [no-import]"));
}
