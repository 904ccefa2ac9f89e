//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! /* sheetlint-disable */
//! /* sheetlint-disable: zero-unit, no-important */
//! /* sheetlint-disable-below: max-floats */
//! ```
//!
//! Directives are read from the comment tokens of the raw source, so they
//! apply even when the surrounding stylesheet fails to parse, and comment
//! markers inside strings or urls are not mistaken for comments.
//! Suppression only ever grows: a later directive never re-enables a rule.

use cssparser::{ParseError, Parser, ParserInput, Token};
use std::collections::BTreeSet;

const DIRECTIVE: &str = "sheetlint-disable";

/// Where a suppression applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionScope {
    /// The entire file.
    WholeFile,
    /// The given 1-indexed line and every line after it.
    FromLine(usize),
}

/// Which rules a suppression covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressedRules {
    /// Every rule.
    All,
    /// Only the named rules.
    Named(BTreeSet<String>),
}

impl SuppressedRules {
    /// Returns true if the rule is covered.
    #[must_use]
    pub fn contains(&self, rule: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(names) => names.contains(rule),
        }
    }
}

/// A parsed suppression directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionRegion {
    /// Where the directive applies.
    pub scope: SuppressionScope,
    /// Which rules it disables.
    pub rules: SuppressedRules,
}

impl SuppressionRegion {
    /// Returns true if a finding from `rule` at `line` falls in this region.
    ///
    /// File-scoped findings (no line) are only covered by whole-file regions.
    #[must_use]
    pub fn covers(&self, rule: &str, line: Option<usize>) -> bool {
        let in_scope = match (self.scope, line) {
            (SuppressionScope::WholeFile, _) => true,
            (SuppressionScope::FromLine(start), Some(line)) => line >= start,
            (SuppressionScope::FromLine(_), None) => false,
        };
        in_scope && self.rules.contains(rule)
    }
}

/// All suppression regions of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suppressions {
    regions: Vec<SuppressionRegion>,
}

impl Suppressions {
    /// Scans source text for directives.
    #[must_use]
    pub fn resolve(source: &str) -> Self {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let mut comments = Vec::new();
        collect_comments(&mut parser, &mut comments);

        let regions = comments
            .into_iter()
            .filter_map(|(line, body)| parse_directive(body, line))
            .collect();
        Self { regions }
    }

    /// Returns the regions in source order.
    #[must_use]
    pub fn regions(&self) -> &[SuppressionRegion] {
        &self.regions
    }

    /// Returns true if there are no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns true if a finding from `rule` at `line` is suppressed.
    #[must_use]
    pub fn is_suppressed(&self, rule: &str, line: Option<usize>) -> bool {
        self.regions.iter().any(|region| region.covers(rule, line))
    }

    /// Returns true if the rule is disabled for the entire file.
    #[must_use]
    pub fn suppresses_file(&self, rule: &str) -> bool {
        self.regions.iter().any(|region| {
            region.scope == SuppressionScope::WholeFile && region.rules.contains(rule)
        })
    }

    /// Iterates over every rule name mentioned by a directive.
    pub fn named_rules(&self) -> impl Iterator<Item = &str> {
        self.regions
            .iter()
            .filter_map(|region| match &region.rules {
                SuppressedRules::Named(names) => Some(names),
                SuppressedRules::All => None,
            })
            .flatten()
            .map(String::as_str)
    }
}

/// Collects `(line, body)` for every comment, descending into blocks.
fn collect_comments<'i>(parser: &mut Parser<'i, '_>, comments: &mut Vec<(usize, &'i str)>) {
    loop {
        let line = parser.current_source_location().line as usize + 1;
        let nested = match parser.next_including_whitespace_and_comments() {
            Ok(Token::Comment(body)) => {
                comments.push((line, *body));
                false
            }
            Ok(
                Token::Function(_)
                | Token::ParenthesisBlock
                | Token::SquareBracketBlock
                | Token::CurlyBracketBlock,
            ) => true,
            Ok(_) => false,
            Err(_) => break,
        };
        if nested {
            let _ = parser.parse_nested_block(|block| {
                collect_comments(block, comments);
                Ok::<(), ParseError<'i, ()>>(())
            });
        }
    }
}

/// Parses the body of one comment.
fn parse_directive(body: &str, line: usize) -> Option<SuppressionRegion> {
    let rest = body.trim().strip_prefix(DIRECTIVE)?;
    let (scope, rest) = match rest.strip_prefix("-below") {
        Some(rest) => (SuppressionScope::FromLine(line), rest),
        None => (SuppressionScope::WholeFile, rest),
    };

    let rest = rest.trim();
    if rest.is_empty() {
        return Some(SuppressionRegion {
            scope,
            rules: SuppressedRules::All,
        });
    }

    let names: BTreeSet<String> = rest
        .strip_prefix(':')?
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return None;
    }

    Some(SuppressionRegion {
        scope,
        rules: SuppressedRules::Named(names),
    })
}
