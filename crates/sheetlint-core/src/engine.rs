//! Evaluates an ordered set of rules against one stylesheet.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use crate::budget::ErrorBudget;
use crate::config::{RuleConfig, RuleSettings};
use crate::context::FileContext;
use crate::rule::{FindingSink, RuleBox, RuleError, SettingKind};
use crate::suppression::Suppressions;
use crate::syntax::Stylesheet;
use crate::types::{EvalWarning, Evaluation, Finding};

/// Runs rules in registration order.
pub struct Engine {
    rules: Vec<RuleBox>,
}

impl Engine {
    /// Creates an engine over `rules`, which are evaluated in the given order.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns true if a rule with this name is registered.
    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name() == name)
    }

    /// Evaluates in-memory source.
    pub fn evaluate(
        &self,
        sheet: &Stylesheet,
        source: &str,
        settings: &RuleSettings,
        budget: &mut ErrorBudget,
    ) -> Evaluation {
        self.evaluate_context(FileContext::new(source, sheet), settings, budget)
    }

    /// Evaluates a prepared file context.
    ///
    /// Rules without a usable setting are skipped, as are rules suppressed
    /// for the whole file. A rule that faults or panics contributes no
    /// findings. Its spending is refunded unless it exhausted the budget,
    /// which stays exhausted for the rest of the pass.
    pub fn evaluate_context(
        &self,
        ctx: FileContext<'_>,
        settings: &RuleSettings,
        budget: &mut ErrorBudget,
    ) -> Evaluation {
        let suppressions = Suppressions::resolve(ctx.content);
        let mut evaluation = Evaluation {
            warnings: self.unknown_directive_rules(&suppressions),
            ..Evaluation::default()
        };

        for rule in &self.rules {
            let name = rule.name();
            if budget.is_exhausted() {
                debug!(rule = name, "Error budget exhausted, skipping remaining rules");
                break;
            }

            let Some(config) = settings.get(name) else {
                trace!(rule = name, "Rule not configured");
                continue;
            };
            if !is_usable(rule.setting_kind(), config) {
                debug!(rule = name, setting = %config.value(), "Skipping disabled rule");
                continue;
            }
            if suppressions.suppresses_file(name) {
                debug!(rule = name, "Rule suppressed for file");
                continue;
            }

            let before = *budget;
            let mut sink = FindingSink::new(name, ctx, &suppressions, budget);
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| rule.check(&ctx, config, &mut sink)));
            let mut findings = sink.into_findings();

            let fault = match outcome {
                Ok(Ok(()) | Err(RuleError::BudgetExhausted)) => None,
                Ok(Err(RuleError::Fault { message })) => Some(message),
                Err(payload) => Some(format!("panicked: {}", panic_message(payload.as_ref()))),
            };

            if let Some(message) = fault {
                warn!(rule = name, %message, "Rule failed, discarding its findings");
                if !budget.is_exhausted() {
                    *budget = before;
                }
                evaluation.warnings.push(EvalWarning::new(name, message));
                continue;
            }

            sort_by_line(&mut findings);
            debug!(rule = name, count = findings.len(), "Rule finished");
            evaluation.findings.extend(findings);
        }

        evaluation.budget_exhausted = budget.is_exhausted();
        evaluation
    }

    fn unknown_directive_rules(&self, suppressions: &Suppressions) -> Vec<EvalWarning> {
        let unknown: BTreeSet<&str> = suppressions
            .named_rules()
            .filter(|name| !self.has_rule(name))
            .collect();
        unknown
            .into_iter()
            .map(|name| {
                warn!(rule = name, "Unknown rule named in suppression directive");
                EvalWarning::new(name, "unknown rule named in suppression directive")
            })
            .collect()
    }
}

/// Returns true if `config` enables a rule taking settings of `kind`.
fn is_usable(kind: SettingKind, config: &RuleConfig) -> bool {
    match kind {
        SettingKind::Flag => config.is_enabled(),
        SettingKind::Threshold => config.threshold().is_some(),
    }
}

/// Stable sort, file-scoped findings first.
fn sort_by_line(findings: &mut [Finding]) {
    findings.sort_by_key(|finding| finding.line);
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use crate::syntax::Position;

    /// Reports one finding per line listed, in the given order.
    struct Lines(&'static str, Vec<usize>);

    impl Rule for Lines {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(
            &self,
            _ctx: &FileContext,
            _config: &RuleConfig,
            sink: &mut FindingSink,
        ) -> Result<(), RuleError> {
            for line in &self.1 {
                sink.at(Position::new(*line, 1), format!("line {line}"))?;
            }
            Ok(())
        }
    }

    struct Faulty;

    impl Rule for Faulty {
        fn name(&self) -> &'static str {
            "faulty"
        }

        fn check(
            &self,
            _ctx: &FileContext,
            _config: &RuleConfig,
            sink: &mut FindingSink,
        ) -> Result<(), RuleError> {
            sink.file("partial")?;
            Err(RuleError::fault("gave up"))
        }
    }

    /// Keeps going after the sink refuses, then faults.
    struct Stubborn;

    impl Rule for Stubborn {
        fn name(&self) -> &'static str {
            "stubborn"
        }

        fn check(
            &self,
            _ctx: &FileContext,
            _config: &RuleConfig,
            sink: &mut FindingSink,
        ) -> Result<(), RuleError> {
            let _ = sink.file("first");
            let _ = sink.file("second");
            Err(RuleError::fault("gave up"))
        }
    }

    struct Panicky;

    impl Rule for Panicky {
        fn name(&self) -> &'static str {
            "panicky"
        }

        fn check(
            &self,
            _ctx: &FileContext,
            _config: &RuleConfig,
            _sink: &mut FindingSink,
        ) -> Result<(), RuleError> {
            panic!("boom")
        }
    }

    struct Counted;

    impl Rule for Counted {
        fn name(&self) -> &'static str {
            "counted"
        }

        fn setting_kind(&self) -> SettingKind {
            SettingKind::Threshold
        }

        fn check(
            &self,
            _ctx: &FileContext,
            config: &RuleConfig,
            sink: &mut FindingSink,
        ) -> Result<(), RuleError> {
            let max = config.threshold().unwrap_or_default();
            sink.file(format!("max {max}"))
        }
    }

    fn enable(names: &[&str]) -> RuleSettings {
        names
            .iter()
            .map(|name| ((*name).to_string(), RuleConfig::from(true)))
            .collect()
    }

    fn run(engine: &Engine, source: &str, settings: &RuleSettings, max: usize) -> Evaluation {
        let sheet = Stylesheet::parse(source);
        engine.evaluate(&sheet, source, settings, &mut ErrorBudget::new(max))
    }

    const SOURCE: &str = "a {}\nb {}\nc {}\nd {}\ne {}";

    #[test]
    fn findings_follow_registration_then_line_order() {
        let engine = Engine::new(vec![
            Box::new(Lines("second", vec![3, 1])),
            Box::new(Lines("first", vec![2])),
        ]);
        let evaluation = run(&engine, SOURCE, &enable(&["first", "second"]), 100);

        let order: Vec<_> = evaluation
            .findings
            .iter()
            .map(|f| (f.rule.as_str(), f.line))
            .collect();
        assert_eq!(
            order,
            vec![("second", Some(1)), ("second", Some(3)), ("first", Some(2))]
        );
        assert!(!evaluation.budget_exhausted);
    }

    #[test]
    fn unconfigured_and_falsy_rules_are_skipped() {
        let engine = Engine::new(vec![
            Box::new(Lines("on", vec![1])),
            Box::new(Lines("off", vec![1])),
            Box::new(Lines("absent", vec![1])),
        ]);
        let mut settings = enable(&["on"]);
        settings.insert("off".into(), RuleConfig::from(false));

        let evaluation = run(&engine, SOURCE, &settings, 100);
        assert_eq!(evaluation.findings.len(), 1);
        assert_eq!(evaluation.findings[0].rule, "on");
    }

    #[test]
    fn threshold_rules_require_a_number() {
        let engine = Engine::new(vec![Box::new(Counted)]);

        let evaluation = run(&engine, SOURCE, &enable(&["counted"]), 100);
        assert!(evaluation.findings.is_empty());

        let mut settings = RuleSettings::new();
        settings.insert("counted".into(), RuleConfig::from(2));
        let evaluation = run(&engine, SOURCE, &settings, 100);
        assert_eq!(evaluation.findings[0].message, "max 2");
    }

    #[test]
    fn budget_caps_findings_across_rules() {
        let engine = Engine::new(vec![
            Box::new(Lines("first", vec![1, 2])),
            Box::new(Lines("second", vec![3, 4])),
        ]);
        let evaluation = run(&engine, SOURCE, &enable(&["first", "second"]), 3);

        assert_eq!(evaluation.findings.len(), 3);
        assert_eq!(evaluation.findings[2].rule, "second");
        assert!(evaluation.budget_exhausted);
    }

    #[test]
    fn zero_budget_yields_nothing() {
        let engine = Engine::new(vec![Box::new(Lines("first", vec![1]))]);
        let evaluation = run(&engine, SOURCE, &enable(&["first"]), 0);
        assert!(evaluation.findings.is_empty());
        assert!(evaluation.budget_exhausted);
    }

    #[test]
    fn faults_and_panics_become_warnings() {
        let engine = Engine::new(vec![
            Box::new(Faulty),
            Box::new(Panicky),
            Box::new(Lines("healthy", vec![1])),
        ]);
        let mut budget = ErrorBudget::new(10);
        let sheet = Stylesheet::parse(SOURCE);
        let evaluation = engine.evaluate(
            &sheet,
            SOURCE,
            &enable(&["faulty", "panicky", "healthy"]),
            &mut budget,
        );

        assert_eq!(evaluation.findings.len(), 1);
        assert_eq!(evaluation.findings[0].rule, "healthy");
        assert_eq!(budget.spent(), 1);

        let warned: Vec<_> = evaluation.warnings.iter().map(|w| w.rule.as_str()).collect();
        assert_eq!(warned, vec!["faulty", "panicky"]);
        assert_eq!(evaluation.warnings[1].message, "panicked: boom");
    }

    #[test]
    fn fault_after_exhausting_budget_keeps_it_exhausted() {
        let engine = Engine::new(vec![
            Box::new(Stubborn),
            Box::new(Lines("later", vec![1])),
        ]);
        let mut budget = ErrorBudget::new(1);
        let sheet = Stylesheet::parse(SOURCE);
        let evaluation =
            engine.evaluate(&sheet, SOURCE, &enable(&["stubborn", "later"]), &mut budget);

        assert!(evaluation.findings.is_empty());
        assert!(evaluation.budget_exhausted);
        assert!(budget.is_exhausted());
        assert_eq!(evaluation.warnings.len(), 1);
        assert_eq!(evaluation.warnings[0].rule, "stubborn");
    }

    #[test]
    fn whole_file_suppression_skips_rule() {
        let source = "/* sheetlint-disable: first */\na {}";
        let engine = Engine::new(vec![
            Box::new(Lines("first", vec![2])),
            Box::new(Lines("second", vec![2])),
        ]);
        let evaluation = run(&engine, source, &enable(&["first", "second"]), 100);

        assert_eq!(evaluation.findings.len(), 1);
        assert_eq!(evaluation.findings[0].rule, "second");
        assert!(evaluation.warnings.is_empty());
    }

    #[test]
    fn unknown_directive_names_warn() {
        let source = "/* sheetlint-disable: no-such-rule */";
        let engine = Engine::new(vec![Box::new(Lines("first", vec![]))]);
        let evaluation = run(&engine, source, &enable(&["first"]), 100);

        assert_eq!(evaluation.warnings.len(), 1);
        assert_eq!(evaluation.warnings[0].rule, "no-such-rule");
    }
}
