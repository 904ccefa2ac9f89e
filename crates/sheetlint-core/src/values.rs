//! Value tokenizer.
//!
//! Turns a raw property value into a sequence of typed [`Token`]s. Each
//! top-level comma-separated segment becomes exactly one token; the
//! classification is total, so input that matches no specific shape
//! degrades to an identifier or operator instead of failing.
//!
//! ```
//! use sheetlint_core::values::{classify, TokenKind};
//!
//! let tokens = classify("123deg, #aaa");
//! assert_eq!(tokens[0].kind(), TokenKind::Angle);
//! assert_eq!(tokens[1].kind(), TokenKind::Color);
//! ```

mod color;
mod keywords;
mod token;

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token as CssToken};
use regex::Regex;
use std::sync::LazyLock;

pub use color::{Color, Hsl};
pub use token::{Token, TokenKind, Value};

/// Length units recognized as `dimension`.
pub const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "cm", "mm", "in", "pt", "pc", "q",
    "fr",
];

/// Angle units.
pub const ANGLE_UNITS: &[&str] = &["deg", "rad", "grad", "turn"];

/// Time units.
pub const TIME_UNITS: &[&str] = &["s", "ms"];

/// Frequency units.
pub const FREQUENCY_UNITS: &[&str] = &["hz", "khz"];

/// Resolution units.
pub const RESOLUTION_UNITS: &[&str] = &["dpi", "dpcm", "dppx"];

/// Characters that form an operator token on their own.
const OPERATORS: &[char] = &['/', '+', '-', '*', '=', ':', ';', '!', '>', '<', '~', '|', ','];

#[allow(clippy::expect_used)] // literal pattern
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+))(%|[A-Za-z]+)?$").expect("numeric pattern")
});

#[allow(clippy::expect_used)] // literal pattern
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("hex color pattern")
});

/// Input accepted by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Raw value text as written in the stylesheet.
    Text(&'a str),
    /// A bare number.
    Number(f64),
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for RawValue<'_> {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i64> for RawValue<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: i64) -> Self {
        Self::Number(number as f64)
    }
}

/// Classifies a raw value into tokens, one per top-level comma-separated
/// segment.
#[must_use]
pub fn classify<'a>(value: impl Into<RawValue<'a>>) -> Vec<Token> {
    match value.into() {
        RawValue::Number(number) => vec![number_token(format_number(number), number)],
        RawValue::Text(text) => segments(text)
            .into_iter()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(classify_segment)
            .collect(),
    }
}

/// Splits a value on top-level whitespace, keeping functions, blocks and
/// quoted strings (escapes included) intact.
///
/// ```
/// use sheetlint_core::values::components;
///
/// assert_eq!(
///     components("0px rgb(1, 2, 3) 'a b'"),
///     vec!["0px", "rgb(1, 2, 3)", "'a b'"]
/// );
/// ```
#[must_use]
pub fn components(value: &str) -> Vec<&str> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut parts = Vec::new();
    let mut start = parser.position();
    loop {
        let before = parser.position();
        let is_space = match parser.next_including_whitespace() {
            Ok(token) => matches!(token, CssToken::WhiteSpace(_)),
            Err(_) => break,
        };
        if is_space {
            parts.push(parser.slice(start..before));
            start = parser.position();
        }
    }
    parts.push(parser.slice_from(start));
    parts.retain(|part| !part.is_empty());
    parts
}

/// Parses a signed decimal number, rejecting anything with trailing text.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let captures = NUMERIC.captures(text.trim())?;
    if captures.get(2).is_some() {
        return None;
    }
    captures[1].parse().ok()
}

fn classify_segment(segment: &str) -> Token {
    classify_numeric(segment)
        .or_else(|| classify_color(segment))
        .or_else(|| classify_shape(segment))
        .unwrap_or_else(|| classify_word(segment))
}

fn classify_numeric(segment: &str) -> Option<Token> {
    let captures = NUMERIC.captures(segment)?;
    let value: f64 = captures[1].parse().ok()?;
    let Some(suffix) = captures.get(2) else {
        return Some(number_token(segment.to_string(), value));
    };
    if suffix.as_str() == "%" {
        return Some(Token::new(segment, Value::Percentage { value }));
    }

    let unit = suffix.as_str().to_ascii_lowercase();
    let payload = if ANGLE_UNITS.contains(&unit.as_str()) {
        Value::Angle { value, unit }
    } else if TIME_UNITS.contains(&unit.as_str()) {
        Value::Time { value, unit }
    } else if FREQUENCY_UNITS.contains(&unit.as_str()) {
        Value::Frequency { value, unit }
    } else if RESOLUTION_UNITS.contains(&unit.as_str()) {
        Value::Resolution { value, unit }
    } else {
        // Known lengths and unrecognized suffixes alike (`123dd`).
        Value::Dimension { value, unit }
    };
    Some(Token::new(segment, payload))
}

fn classify_color(segment: &str) -> Option<Token> {
    let color = if let Some(captures) = HEX_COLOR.captures(segment) {
        Color::from_hex(&captures[1])?
    } else {
        Color::from_keyword(segment)?
    };
    Some(Token::new(segment, Value::Color(color)))
}

/// A segment that tokenizes as exactly one string, url or function.
enum Shape<'i> {
    Quoted,
    Url(&'i str),
    Call { name: String, args: Vec<&'i str> },
}

fn shape(segment: &str) -> Option<Shape<'_>> {
    let mut input = ParserInput::new(segment);
    let mut parser = Parser::new(&mut input);
    let first = parser.next().ok()?.clone();
    let shape = match first {
        CssToken::QuotedString(_) => Shape::Quoted,
        CssToken::UnquotedUrl(_) => Shape::Url(segment.strip_suffix(')')?.get(4..)?.trim()),
        CssToken::Function(name) if name.eq_ignore_ascii_case("url") => {
            let quoted = parser.parse_nested_block(|block| {
                let start = block.position();
                block.expect_string()?;
                let text = block.slice_from(start).trim();
                block.expect_exhausted()?;
                Ok::<_, ParseError<'_, ()>>(text)
            });
            match quoted {
                Ok(text) => Shape::Url(unquote(text).unwrap_or(text)),
                Err(_) => Shape::Call {
                    name: name.to_string(),
                    args: Vec::new(),
                },
            }
        }
        CssToken::Function(name) => {
            let args = parser
                .parse_nested_block(|block| Ok::<_, ParseError<'_, ()>>(call_args(block)))
                .ok()?;
            Shape::Call {
                name: name.to_string(),
                args,
            }
        }
        _ => return None,
    };
    parser.is_exhausted().then_some(shape)
}

/// Source text of each argument, split on commas, `/` and whitespace.
fn call_args<'i>(parser: &mut Parser<'i, '_>) -> Vec<&'i str> {
    let mut args = Vec::new();
    loop {
        let start = parser.position();
        let (is_separator, opens_block) = match parser.next() {
            Ok(token) => (
                matches!(token, CssToken::Comma | CssToken::Delim('/')),
                matches!(
                    token,
                    CssToken::Function(_)
                        | CssToken::ParenthesisBlock
                        | CssToken::SquareBracketBlock
                        | CssToken::CurlyBracketBlock
                ),
            ),
            Err(_) => break,
        };
        if is_separator {
            continue;
        }
        if opens_block {
            let _ = parser.parse_nested_block(|block| {
                while block.next().is_ok() {}
                Ok::<(), ParseError<'i, ()>>(())
            });
        }
        args.push(parser.slice_from(start).trim());
    }
    args
}

fn classify_shape(segment: &str) -> Option<Token> {
    let payload = match shape(segment)? {
        Shape::Quoted => Value::String {
            value: unquote(segment)?.to_string(),
        },
        Shape::Url(uri) => Value::Uri {
            uri: uri.to_string(),
        },
        Shape::Call { name, args } => {
            let color = match name.to_ascii_lowercase().as_str() {
                "rgb" | "rgba" => Color::from_rgb_args(&args),
                "hsl" | "hsla" => Color::from_hsl_args(&args),
                _ => None,
            };
            match color {
                Some(color) => Value::Color(color),
                None => Value::Function {
                    name,
                    value: segment.to_string(),
                },
            }
        }
    };
    Some(Token::new(segment, payload))
}

fn classify_word(segment: &str) -> Token {
    let mut chars = segment.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if OPERATORS.contains(&c) {
            return Token::new(
                segment,
                Value::Operator {
                    value: segment.to_string(),
                },
            );
        }
    }
    Token::new(
        segment,
        Value::Identifier {
            value: segment.to_string(),
        },
    )
}

fn number_token(text: String, value: f64) -> Token {
    let payload = if value.fract() == 0.0 {
        Value::Integer { value }
    } else {
        Value::Number { value }
    };
    Token::new(text, payload)
}

fn format_number(number: f64) -> String {
    format!("{number}")
}

/// Strips the enclosing quotes, leaving escapes as written.
fn unquote(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if text.len() >= 2 && text.ends_with(quote) {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Top-level comma-separated segments of `text`.
fn segments(text: &str) -> Vec<&str> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut parts = Vec::new();
    loop {
        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Comma, |segment| {
            while segment.next_including_whitespace_and_comments().is_ok() {}
            Ok::<(), ParseError<'_, ()>>(())
        });
        parts.push(parser.slice_from(start));
        if parser.next().is_err() {
            break;
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(value: &str) -> Token {
        let mut tokens = classify(value);
        assert_eq!(tokens.len(), 1, "expected one token for {value:?}");
        tokens.remove(0)
    }

    #[test]
    fn numeric_input_is_integer_or_number() {
        let tokens = classify(12.0);
        assert_eq!(tokens[0].kind(), TokenKind::Integer);
        assert_eq!(tokens[0].text, "12");

        let tokens = classify(1.5);
        assert_eq!(tokens[0].kind(), TokenKind::Number);
        assert_eq!(tokens[0].text, "1.5");

        assert_eq!(classify(7_i64)[0].kind(), TokenKind::Integer);
    }

    #[test]
    fn numeric_strings_match_numeric_input() {
        assert_eq!(single("-3").value, Value::Integer { value: -3.0 });
        assert_eq!(single("+.5").value, Value::Number { value: 0.5 });
    }

    #[test]
    fn units_are_classified_by_family() {
        assert_eq!(
            single("123deg").value,
            Value::Angle {
                value: 123.0,
                unit: "deg".into()
            }
        );
        assert_eq!(single("200MS").kind(), TokenKind::Time);
        assert_eq!(single("10khz").kind(), TokenKind::Frequency);
        assert_eq!(single("2dppx").kind(), TokenKind::Resolution);
        assert_eq!(single("1.5em").kind(), TokenKind::Dimension);
    }

    #[test]
    fn unrecognized_unit_falls_back_to_dimension() {
        assert_eq!(
            single("123dd").value,
            Value::Dimension {
                value: 123.0,
                unit: "dd".into()
            }
        );
    }

    #[test]
    fn percentage_stores_no_unit() {
        let token = single("50%");
        assert_eq!(token.value, Value::Percentage { value: 50.0 });
        assert_eq!(token.unit(), None);
    }

    #[test]
    fn hex_forms_are_equivalent() {
        assert_eq!(single("#aaa").color(), single("#aaaaaa").color());
        let color = single("#aaa").color().copied().unwrap();
        assert_eq!((color.red, color.green, color.blue), (170.0, 170.0, 170.0));
    }

    #[test]
    fn named_color_uses_keyword_table() {
        let color = single("Navy").color().copied().unwrap();
        assert_eq!((color.red, color.green, color.blue), (0.0, 0.0, 128.0));
    }

    #[test]
    fn rgb_percentages_are_not_rounded() {
        let color = single("rgb(5%, 5%, 5%)").color().copied().unwrap();
        assert_eq!((color.red, color.green, color.blue), (12.75, 12.75, 12.75));
        assert_eq!(color.alpha, None);
    }

    #[test]
    fn rgba_carries_alpha() {
        let color = single("rgba(10, 20, 30, 0.5)").color().copied().unwrap();
        assert_eq!(color.alpha, Some(0.5));
        let modern = single("rgb(10 20 30 / 25%)").color().copied().unwrap();
        assert_eq!(modern.alpha, Some(0.25));
    }

    #[test]
    fn hsl_is_passed_through() {
        let color = single("hsl(170, 20%, 20%)").color().copied().unwrap();
        assert_eq!(
            color.hsl,
            Some(Hsl {
                hue: 170.0,
                saturation: 0.2,
                lightness: 0.2
            })
        );
    }

    #[test]
    fn malformed_color_call_degrades_to_function() {
        let token = single("rgb(foo)");
        assert_eq!(
            token.value,
            Value::Function {
                name: "rgb".into(),
                value: "rgb(foo)".into()
            }
        );
    }

    #[test]
    fn hsl_with_bare_fractions_degrades_to_function() {
        assert_eq!(single("hsl(0, 0.5, 0.5)").kind(), TokenKind::Function);
    }

    #[test]
    fn escaped_quote_keeps_string_whole() {
        let token = single(r"'it\'s, ok'");
        assert_eq!(
            token.value,
            Value::String {
                value: r"it\'s, ok".into()
            }
        );

        let kinds: Vec<TokenKind> = classify(r#""a\"b", serif"#).iter().map(Token::kind).collect();
        assert_eq!(kinds, vec![TokenKind::String, TokenKind::Identifier]);
    }

    #[test]
    fn comma_inside_url_does_not_split() {
        assert_eq!(
            single("url(a,b.png)").value,
            Value::Uri {
                uri: "a,b.png".into()
            }
        );
    }

    #[test]
    fn url_strips_one_layer_of_quotes() {
        assert_eq!(
            single("url(\"a.png\")").value,
            Value::Uri {
                uri: "a.png".into()
            }
        );
        assert_eq!(
            single("URL(b.png)").value,
            Value::Uri {
                uri: "b.png".into()
            }
        );
    }

    #[test]
    fn function_keeps_full_text() {
        let token = single("calc(100% - (2 * 4px))");
        assert_eq!(
            token.value,
            Value::Function {
                name: "calc".into(),
                value: "calc(100% - (2 * 4px))".into()
            }
        );
    }

    #[test]
    fn strings_and_operators() {
        assert_eq!(
            single("'Helvetica Neue'").value,
            Value::String {
                value: "Helvetica Neue".into()
            }
        );
        assert_eq!(single("/").kind(), TokenKind::Operator);
        assert_eq!(single("-").kind(), TokenKind::Operator);
    }

    #[test]
    fn anything_else_is_identifier() {
        assert_eq!(single("sans-serif").kind(), TokenKind::Identifier);
        assert_eq!(single("1px solid red").kind(), TokenKind::Identifier);
        assert_eq!(single("#abcd").kind(), TokenKind::Identifier);
        assert_eq!(single("f(a) g(b)").kind(), TokenKind::Identifier);
    }

    #[test]
    fn top_level_commas_split_segments() {
        let tokens = classify("rgb(1, 2, 3), 'a,b', serif");
        let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Color, TokenKind::String, TokenKind::Identifier]
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert!(classify("").is_empty());
        assert_eq!(classify("a,, b").len(), 2);
    }

    #[test]
    fn classification_is_idempotent() {
        for value in [
            "12px",
            "-4",
            "0.25",
            "50%",
            "#abc",
            "rebeccapurple",
            "rgb(5%, 5%, 5%)",
            "hsla(10, 50%, 50%, 0.3)",
            "url('x.svg')",
            "\"quoted\"",
            "translate(1px, 2px)",
            "+",
            "auto",
            "123dd",
        ] {
            let first = single(value);
            let again = single(&first.text);
            assert_eq!(first, again, "re-classifying {value:?}");
        }
    }

    #[test]
    fn components_respect_groups() {
        assert_eq!(components("  0px   auto "), vec!["0px", "auto"]);
        assert_eq!(
            components(r"'a\' b' 1px"),
            vec![r"'a\' b'", "1px"]
        );
        assert_eq!(
            components("url(\"a b.png\") no-repeat"),
            vec!["url(\"a b.png\")", "no-repeat"]
        );
    }
}
