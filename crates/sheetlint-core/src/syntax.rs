//! Minimal stylesheet tree built on the `cssparser` tokenizer.
//!
//! The tree exposes only what rules query: rule blocks with their
//! declarations, and at-rules. Parsing recovers from errors; a malformed
//! declaration is skipped and never aborts the stylesheet.

use cssparser::{Delimiter, Delimiters, ParseError, Parser, ParserInput, SourceLocation, Token};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// At-rules whose block contains nested rules rather than declarations.
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "document",
    "-moz-document",
    "layer",
    "container",
    "scope",
    "keyframes",
    "-webkit-keyframes",
];

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), counted in UTF-16 code units.
    pub column: usize,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<SourceLocation> for Position {
    fn from(location: SourceLocation) -> Self {
        Self {
            line: location.line as usize + 1,
            column: location.column as usize,
        }
    }
}

/// A `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Property name as written.
    pub property: String,
    /// Raw value text, trimmed, without `!important`.
    pub value: String,
    /// Whether the declaration ends in `!important`.
    pub important: bool,
    /// Position of the property name.
    pub position: Position,
}

impl Declaration {
    /// Returns true if the property name matches, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, property: &str) -> bool {
        self.property.eq_ignore_ascii_case(property)
    }
}

/// A selector (or declaration-bearing at-rule) with its declaration block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBlock {
    /// Selector text, or `@name prelude` for at-rules such as `@font-face`.
    pub selector: String,
    /// Position of the first selector token.
    pub position: Position,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// An at-rule such as `@import` or `@media`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRule {
    /// Lower-cased name without the `@`.
    pub name: String,
    /// Text between the name and the block or `;`.
    pub prelude: String,
    /// Position of the at-keyword.
    pub position: Position,
}

/// Parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    /// Declaration blocks in the order they close.
    pub blocks: Vec<RuleBlock>,
    /// At-rules in source order.
    pub at_rules: Vec<AtRule>,
}

impl Stylesheet {
    /// Parses stylesheet source text.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let mut sheet = Self::default();
        parse_rule_list(&mut parser, &mut sheet);
        sheet
    }

    /// Iterates over every declaration in every block.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.blocks.iter().flat_map(|block| block.declarations.iter())
    }

    /// Iterates over at-rules with the given (lower-case) name.
    pub fn at_rules_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AtRule> {
        self.at_rules.iter().filter(move |rule| rule.name == name)
    }
}

fn parse_rule_list<'i>(parser: &mut Parser<'i, '_>, sheet: &mut Stylesheet) {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let position = Position::from(parser.current_source_location());
        let state = parser.state();
        let at_name = match parser.next() {
            Ok(Token::AtKeyword(name)) => Some(name.to_ascii_lowercase()),
            Ok(_) => None,
            Err(_) => break,
        };

        match at_name {
            Some(name) => parse_at_rule(parser, sheet, name, position),
            None => {
                parser.reset(&state);
                parse_qualified_rule(parser, sheet, position);
            }
        }
    }
}

fn parse_qualified_rule<'i>(parser: &mut Parser<'i, '_>, sheet: &mut Stylesheet, position: Position) {
    let start = parser.position();
    skip_until_before(parser, Delimiter::CurlyBracketBlock);
    let selector = parser.slice_from(start).trim().to_string();

    if !matches!(parser.next(), Ok(Token::CurlyBracketBlock)) {
        debug!("Dropping selector without a block at line {}", position.line);
        return;
    }

    let declarations = nested_declarations(parser);
    sheet.blocks.push(RuleBlock {
        selector,
        position,
        declarations,
    });
}

fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    sheet: &mut Stylesheet,
    name: String,
    position: Position,
) {
    let start = parser.position();
    skip_until_before(parser, Delimiter::CurlyBracketBlock | Delimiter::Semicolon);
    let prelude = parser.slice_from(start).trim().to_string();

    sheet.at_rules.push(AtRule {
        name: name.clone(),
        prelude: prelude.clone(),
        position,
    });

    if !matches!(parser.next(), Ok(Token::CurlyBracketBlock)) {
        return;
    }

    if GROUPING_AT_RULES.contains(&name.as_str()) {
        let result: Result<(), ParseError<'i, ()>> = parser.parse_nested_block(|nested| {
            parse_rule_list(nested, sheet);
            Ok(())
        });
        if let Err(error) = result {
            debug!("Recovered from error in @{name} block: {error:?}");
        }
    } else {
        let declarations = nested_declarations(parser);
        let selector = format!("@{name} {prelude}").trim_end().to_string();
        sheet.blocks.push(RuleBlock {
            selector,
            position,
            declarations,
        });
    }
}

fn nested_declarations<'i>(parser: &mut Parser<'i, '_>) -> Vec<Declaration> {
    let result: Result<Vec<Declaration>, ParseError<'i, ()>> =
        parser.parse_nested_block(|block| Ok(parse_declaration_list(block)));
    result.unwrap_or_default()
}

fn parse_declaration_list<'i>(parser: &mut Parser<'i, '_>) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let position = Position::from(parser.current_source_location());
        let result: Result<Declaration, ParseError<'i, ()>> = parser
            .parse_until_after(Delimiter::Semicolon, |declaration| {
                parse_declaration(declaration, position)
            });
        match result {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => debug!(
                "Skipping malformed declaration at {}:{}: {error:?}",
                position.line, position.column
            ),
        }
    }
    declarations
}

fn parse_declaration<'i>(
    parser: &mut Parser<'i, '_>,
    position: Position,
) -> Result<Declaration, ParseError<'i, ()>> {
    let property = parser.expect_ident()?.to_string();
    parser.expect_colon()?;

    let start = parser.position();
    let mut end = start;
    let mut important = false;
    loop {
        match parser.next() {
            Ok(Token::Delim('!')) => {
                if parser
                    .try_parse(|p| p.expect_ident_matching("important"))
                    .is_ok()
                {
                    important = true;
                } else {
                    end = parser.position();
                }
            }
            Ok(_) => end = parser.position(),
            Err(_) => break,
        }
    }

    Ok(Declaration {
        property,
        value: parser.slice(start..end).trim().to_string(),
        important,
        position,
    })
}

fn skip_until_before<'i>(parser: &mut Parser<'i, '_>, delimiters: Delimiters) {
    let result: Result<(), ParseError<'i, ()>> =
        parser.parse_until_before(delimiters, |nested| {
            while nested.next().is_ok() {}
            Ok(())
        });
    if let Err(error) = result {
        debug!("Recovered while skipping tokens: {error:?}");
    }
}
