//! Runtime values and the coercion rules the evaluator applies to them.
//!
//! Values are dynamically typed. Arithmetic, comparison and truthiness follow
//! loose scripting-language rules: `true + 1` is `2`, `"3" * "4"` is `12`, and
//! `"a" + 1` is `"a1"`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::tokenizer::is_whitespace;

/// A value produced by evaluation or supplied through a [`Context`](crate::Context).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Null,
    /// Missing data: an unresolved variable or an empty expression.
    #[default]
    #[cfg_attr(feature = "serde", serde(skip_deserializing))]
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Null
            | Self::Undefined
            | Self::Boolean(_)
            | Self::String(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(string) => Some(string),
            Self::Null
            | Self::Undefined
            | Self::Boolean(_)
            | Self::Number(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(boolean) => Some(*boolean),
            Self::Null
            | Self::Undefined
            | Self::Number(_)
            | Self::String(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    /// Truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null | Self::Undefined => false,
            Self::Boolean(boolean) => *boolean,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::String(string) => !string.is_empty(),
            Self::Array(_) | Self::Object(_) => true,
        }
    }

    /// Numeric coercion.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined | Self::Object(_) => f64::NAN,
            Self::Null => 0.0,
            Self::Boolean(boolean) => f64::from(u8::from(*boolean)),
            Self::Number(number) => *number,
            Self::String(string) => parse_number(string),
            Self::Array(items) => match items.as_slice() {
                [] => 0.0,
                [single] => parse_number(&single.to_template_string()),
                _ => f64::NAN,
            },
        }
    }

    /// Arrays and objects collapse to their string form; scalars stay as they are.
    fn to_primitive(&self) -> Self {
        match self {
            Self::Array(_) | Self::Object(_) => Self::String(self.to_string()),
            Self::Null
            | Self::Undefined
            | Self::Boolean(_)
            | Self::Number(_)
            | Self::String(_) => self.clone(),
        }
    }

    /// Text used when a value is spliced into a template: missing values render empty.
    pub fn to_template_string(&self) -> String {
        match self {
            Self::Null | Self::Undefined => String::new(),
            Self::Boolean(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::Array(_)
            | Self::Object(_) => self.to_string(),
        }
    }

    /// `+`: string concatenation if either side is textual, numeric addition otherwise.
    pub fn add(&self, other: &Self) -> Self {
        match (self.to_primitive(), other.to_primitive()) {
            (Self::String(left), right) => Self::String(left + &right.to_string()),
            (left, Self::String(right)) => Self::String(left.to_string() + &right),
            (left, right) => Self::Number(left.to_number() + right.to_number()),
        }
    }

    pub fn subtract(&self, other: &Self) -> Self {
        Self::Number(self.to_number() - other.to_number())
    }

    pub fn multiply(&self, other: &Self) -> Self {
        Self::Number(self.to_number() * other.to_number())
    }

    pub fn divide(&self, other: &Self) -> Self {
        Self::Number(self.to_number() / other.to_number())
    }

    /// Truncated remainder; the result takes the sign of the dividend.
    pub fn remainder(&self, other: &Self) -> Self {
        Self::Number(self.to_number() % other.to_number())
    }

    /// Relational comparison. `None` means the operands are unordered, which
    /// makes every relational operator false.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self.to_primitive(), other.to_primitive()) {
            (Self::String(left), Self::String(right)) => {
                Some(left.encode_utf16().cmp(right.encode_utf16()))
            }
            (left, right) => left.to_number().partial_cmp(&right.to_number()),
        }
    }

    /// `===`: same kind and same value, with no coercion.
    pub fn strict_equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// Parse a string the way numeric coercion does: surrounding whitespace is
/// ignored, the empty string is zero, and anything unparseable is `NaN`.
fn parse_number(text: &str) -> f64 {
    let text = text.trim_matches(is_whitespace);
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    // Rust accepts spellings like "inf" and "NaN" that must not coerce.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Unsigned digits in `radix`; anything else, including an empty run, is `NaN`.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |total: f64, c| {
            c.to_digit(radix)
                .map(|digit| total.mul_add(f64::from(radix), f64::from(digit)))
        })
        .unwrap_or(f64::NAN)
}

/// Format a number in its shortest round-trip form, switching to exponent
/// notation outside `[1e-6, 1e21)`.
pub(crate) fn format_number(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if number == 0.0 {
        return "0".to_string();
    }

    let magnitude = number.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return number.to_string();
    }

    let formatted = format!("{:e}", number);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        Some(_) | None => formatted,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
            Self::Boolean(boolean) => write!(f, "{}", boolean),
            Self::Number(number) => f.write_str(&format_number(*number)),
            Self::String(string) => f.write_str(string),
            Self::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&item.to_template_string())?;
                }
                Ok(())
            }
            Self::Object(_) => f.write_str("[object Object]"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Self>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
