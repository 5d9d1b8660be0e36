//! Literal default values, parsed against the parameter's declared type.
//!
//! A literal is raw annotation text. It is accepted only if the host language
//! could spell it as a constant of the declared type; the accepted form is
//! rendered back as host-language literal text for the generator.

use thiserror::Error;

use crate::core::diag::{Span, SpannedError};
use crate::core::model::{DefaultExpr, TypeRef};
use crate::core::names;
use crate::core::types::{PrimitiveKind, Type};

/// The sentinel literal that stands for a null reference.
pub const NULL_LITERAL: &str = "null";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralErrorKind {
    #[error("Empty value is only valid for a String-like type, found `{0}`")]
    EmptyValue(Type),

    #[error("Cannot parse `{text}` as `{ty}`")]
    Unparseable { text: String, ty: Type },

    #[error("Value `{text}` is out of range for `{ty}`")]
    OutOfRange { text: String, ty: Type },

    #[error("`null` is not a valid default for primitive type `{0}`")]
    NullForPrimitive(Type),

    #[error("`{text}` is not a constant of enum `{enum_name}`")]
    UnknownEnumConstant {
        text: String,
        enum_name: String,
        suggestion: Option<String>,
        constants: Vec<String>,
    },

    #[error("Literal defaults are not supported for type `{0}`; use a field or factory reference")]
    UnsupportedType(Type),
}

pub type LiteralError = SpannedError<LiteralErrorKind>;

impl LiteralErrorKind {
    pub fn at(self, span: Span) -> LiteralError {
        LiteralError::new(self, span)
    }
}

/// Constants of an enum-typed parameter, when the fact base declares it.
#[derive(Debug, Clone, Copy)]
pub struct EnumInfo<'a> {
    pub owner: &'a TypeRef,
    pub constants: &'a [String],
}

pub fn parse_literal(
    text: &str,
    ty: &Type,
    enum_info: Option<EnumInfo<'_>>,
) -> Result<DefaultExpr, LiteralErrorKind> {
    if text == NULL_LITERAL {
        return if ty.is_nullable() {
            Ok(DefaultExpr::Null)
        } else {
            Err(LiteralErrorKind::NullForPrimitive(ty.clone()))
        };
    }

    if text.is_empty() {
        return if ty.is_string_like() {
            Ok(DefaultExpr::Literal(quote_string("")))
        } else {
            Err(LiteralErrorKind::EmptyValue(ty.clone()))
        };
    }

    if ty.is_string_like() {
        return Ok(DefaultExpr::Literal(quote_string(text)));
    }

    if let Some(kind) = ty.primitive_kind() {
        return parse_primitive(text, kind, ty).map(DefaultExpr::Literal);
    }

    if let Some(info) = enum_info {
        if info.constants.iter().any(|constant| constant == text) {
            return Ok(DefaultExpr::StaticField {
                owner: info.owner.clone(),
                name: text.to_string(),
            });
        }
        return Err(LiteralErrorKind::UnknownEnumConstant {
            text: text.to_string(),
            enum_name: info.owner.qualified(),
            suggestion: names::suggest(text, info.constants.iter().map(String::as_str)),
            constants: info.constants.to_vec(),
        });
    }

    Err(LiteralErrorKind::UnsupportedType(ty.clone()))
}

fn parse_primitive(text: &str, kind: PrimitiveKind, ty: &Type) -> Result<String, LiteralErrorKind> {
    let unparseable = || LiteralErrorKind::Unparseable {
        text: text.to_string(),
        ty: ty.clone(),
    };
    let out_of_range = || LiteralErrorKind::OutOfRange {
        text: text.to_string(),
        ty: ty.clone(),
    };

    match kind {
        PrimitiveKind::Boolean => {
            if text.eq_ignore_ascii_case("true") {
                Ok("true".to_string())
            } else if text.eq_ignore_ascii_case("false") {
                Ok("false".to_string())
            } else {
                Err(unparseable())
            }
        }
        PrimitiveKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(quote_char(ch)),
                _ => Err(unparseable()),
            }
        }
        PrimitiveKind::Byte => {
            let value = parse_integer(text, i8::MIN.into(), i8::MAX.into(), ty)?;
            Ok(format!("(byte) {value}"))
        }
        PrimitiveKind::Short => {
            let value = parse_integer(text, i16::MIN.into(), i16::MAX.into(), ty)?;
            Ok(format!("(short) {value}"))
        }
        PrimitiveKind::Int => {
            let value = parse_integer(text, i32::MIN.into(), i32::MAX.into(), ty)?;
            Ok(value.to_string())
        }
        PrimitiveKind::Long => {
            let digits = text
                .strip_suffix('L')
                .or_else(|| text.strip_suffix('l'))
                .unwrap_or(text);
            let value = parse_integer(digits, i64::MIN.into(), i64::MAX.into(), ty)?;
            Ok(format!("{value}L"))
        }
        PrimitiveKind::Float => {
            let digits = strip_float_suffix(text, 'f');
            let value: f32 = digits.parse().map_err(|_| unparseable())?;
            if !representable(digits, value.is_infinite(), value == 0.0) {
                return Err(out_of_range());
            }
            Ok(if value.is_nan() {
                "Float.NaN".to_string()
            } else if value.is_infinite() {
                let sign = if value > 0.0 { "POSITIVE" } else { "NEGATIVE" };
                format!("Float.{sign}_INFINITY")
            } else {
                format!("{value:?}f")
            })
        }
        PrimitiveKind::Double => {
            let digits = strip_float_suffix(text, 'd');
            let value: f64 = digits.parse().map_err(|_| unparseable())?;
            if !representable(digits, value.is_infinite(), value == 0.0) {
                return Err(out_of_range());
            }
            Ok(if value.is_nan() {
                "Double.NaN".to_string()
            } else if value.is_infinite() {
                let sign = if value > 0.0 { "POSITIVE" } else { "NEGATIVE" };
                format!("Double.{sign}_INFINITY")
            } else {
                format!("{value:?}")
            })
        }
    }
}

fn parse_integer(text: &str, min: i128, max: i128, ty: &Type) -> Result<i128, LiteralErrorKind> {
    let value: i128 = text.parse().map_err(|_| LiteralErrorKind::Unparseable {
        text: text.to_string(),
        ty: ty.clone(),
    })?;
    if value < min || value > max {
        return Err(LiteralErrorKind::OutOfRange {
            text: text.to_string(),
            ty: ty.clone(),
        });
    }
    Ok(value)
}

/// Finite text must not overflow to infinity, and nonzero text must not
/// round to zero.
fn representable(digits: &str, infinite: bool, zero: bool) -> bool {
    let unsigned = digits.trim_start_matches(['+', '-']);
    if infinite {
        return unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    }
    let mantissa = unsigned.split(['e', 'E']).next().unwrap_or(unsigned);
    !zero || !mantissa.chars().any(|c| matches!(c, '1'..='9'))
}

fn strip_float_suffix(text: &str, suffix: char) -> &str {
    let lower = text.strip_suffix(suffix);
    let upper = text.strip_suffix(suffix.to_ascii_uppercase());
    // `inf` ends in `f`; only strip when digits remain.
    match lower.or(upper) {
        Some(rest) if rest.ends_with(|c: char| c.is_ascii_digit() || c == '.') => rest,
        _ => text,
    }
}

pub fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            other => push_escaped(&mut out, other),
        }
    }
    out.push('"');
    out
}

fn quote_char(ch: char) -> String {
    let mut out = String::from('\'');
    match ch {
        '\'' => out.push_str("\\'"),
        other => push_escaped(&mut out, other),
    }
    out.push('\'');
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push(c),
    }
}

#[cfg(test)]
#[path = "../tests/literal/t_literal.rs"]
mod tests;
