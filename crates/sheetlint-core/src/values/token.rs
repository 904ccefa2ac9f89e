//! Typed tokens produced by the value tokenizer.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Classification of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Length-like quantity (`12px`), or a number with an unrecognized unit.
    Dimension,
    /// Angle quantity (`90deg`).
    Angle,
    /// Time quantity (`200ms`).
    Time,
    /// Frequency quantity (`10khz`).
    Frequency,
    /// Resolution quantity (`2dppx`).
    Resolution,
    /// Percentage (`50%`).
    Percentage,
    /// Number without a fractional part.
    Integer,
    /// Number with a fractional part.
    Number,
    /// Any color notation.
    Color,
    /// `url(...)` reference.
    Uri,
    /// Function call other than colors and urls.
    Function,
    /// Quoted string.
    String,
    /// Identifier, or anything that matched nothing more specific.
    Identifier,
    /// Single punctuation character.
    Operator,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Dimension => "dimension",
            Self::Angle => "angle",
            Self::Time => "time",
            Self::Frequency => "frequency",
            Self::Resolution => "resolution",
            Self::Percentage => "percentage",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Color => "color",
            Self::Uri => "uri",
            Self::Function => "function",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Operator => "operator",
        };
        f.write_str(name)
    }
}

/// Kind-specific payload of a [`Token`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Value {
    /// Length-like quantity.
    Dimension {
        /// Numeric part.
        value: f64,
        /// Lower-cased unit.
        unit: String,
    },
    /// Angle quantity.
    Angle {
        /// Numeric part.
        value: f64,
        /// Lower-cased unit.
        unit: String,
    },
    /// Time quantity.
    Time {
        /// Numeric part.
        value: f64,
        /// Lower-cased unit.
        unit: String,
    },
    /// Frequency quantity.
    Frequency {
        /// Numeric part.
        value: f64,
        /// Lower-cased unit.
        unit: String,
    },
    /// Resolution quantity.
    Resolution {
        /// Numeric part.
        value: f64,
        /// Lower-cased unit.
        unit: String,
    },
    /// Percentage; the value excludes the `%` sign.
    Percentage {
        /// Numeric part.
        value: f64,
    },
    /// Whole number.
    Integer {
        /// Numeric value.
        value: f64,
    },
    /// Fractional number.
    Number {
        /// Numeric value.
        value: f64,
    },
    /// Color in any notation.
    Color(Color),
    /// `url(...)` with one layer of quotes removed.
    Uri {
        /// The referenced location.
        uri: String,
    },
    /// Function call; `value` is the full original text.
    Function {
        /// Identifier before `(`.
        name: String,
        /// Original text, not recursively parsed.
        value: String,
    },
    /// Quoted string with the enclosing quotes removed.
    String {
        /// Unquoted contents.
        value: String,
    },
    /// Identifier.
    Identifier {
        /// Same as the token text.
        value: String,
    },
    /// Operator.
    Operator {
        /// Same as the token text.
        value: String,
    },
}

/// One classified unit of a property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Original (trimmed) text of the segment.
    pub text: String,
    /// Classified payload.
    #[serde(flatten)]
    pub value: Value,
}

impl Token {
    /// Creates a token from its text and payload.
    #[must_use]
    pub fn new(text: impl Into<String>, value: Value) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }

    /// Returns the token classification.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match &self.value {
            Value::Dimension { .. } => TokenKind::Dimension,
            Value::Angle { .. } => TokenKind::Angle,
            Value::Time { .. } => TokenKind::Time,
            Value::Frequency { .. } => TokenKind::Frequency,
            Value::Resolution { .. } => TokenKind::Resolution,
            Value::Percentage { .. } => TokenKind::Percentage,
            Value::Integer { .. } => TokenKind::Integer,
            Value::Number { .. } => TokenKind::Number,
            Value::Color(_) => TokenKind::Color,
            Value::Uri { .. } => TokenKind::Uri,
            Value::Function { .. } => TokenKind::Function,
            Value::String { .. } => TokenKind::String,
            Value::Identifier { .. } => TokenKind::Identifier,
            Value::Operator { .. } => TokenKind::Operator,
        }
    }

    /// Returns the numeric part of quantity, percentage and number tokens.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match &self.value {
            Value::Dimension { value, .. }
            | Value::Angle { value, .. }
            | Value::Time { value, .. }
            | Value::Frequency { value, .. }
            | Value::Resolution { value, .. }
            | Value::Percentage { value }
            | Value::Integer { value }
            | Value::Number { value } => Some(*value),
            _ => None,
        }
    }

    /// Returns the unit of quantity tokens.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        match &self.value {
            Value::Dimension { unit, .. }
            | Value::Angle { unit, .. }
            | Value::Time { unit, .. }
            | Value::Frequency { unit, .. }
            | Value::Resolution { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// Returns the color payload of color tokens.
    #[must_use]
    pub fn color(&self) -> Option<&Color> {
        match &self.value {
            Value::Color(color) => Some(color),
            _ => None,
        }
    }
}
