use alloc::string::{String, ToString};
use core::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::CoerceError;
use crate::info::{AtomicInfo, AtomicKind, TypeInfo};
use crate::value::{AtomicValue, EnumValue};

/// Accepted date-time layouts, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// -----------------------------------------------------------------------------
// Number

/// A numeric value widened for range-checked conversion.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    UInt(u128),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    fn of(value: &AtomicValue) -> Option<Self> {
        Some(match *value {
            AtomicValue::Bool(v) => Self::Int(i128::from(v)),
            AtomicValue::Char(v) => Self::Int(i128::from(u32::from(v))),
            AtomicValue::I8(v) => Self::Int(v.into()),
            AtomicValue::I16(v) => Self::Int(v.into()),
            AtomicValue::I32(v) => Self::Int(v.into()),
            AtomicValue::I64(v) => Self::Int(v.into()),
            AtomicValue::I128(v) => Self::Int(v),
            AtomicValue::Isize(v) => Self::Int(v as i128),
            AtomicValue::U8(v) => Self::Int(v.into()),
            AtomicValue::U16(v) => Self::Int(v.into()),
            AtomicValue::U32(v) => Self::Int(v.into()),
            AtomicValue::U64(v) => Self::Int(v.into()),
            AtomicValue::U128(v) => Self::UInt(v),
            AtomicValue::Usize(v) => Self::UInt(v as u128),
            AtomicValue::F32(v) => Self::Float(v.into()),
            AtomicValue::F64(v) => Self::Float(v),
            AtomicValue::Decimal(v) => Self::Decimal(v),
            AtomicValue::Enum(v) => Self::Int(v.discriminant().into()),
            _ => return None,
        })
    }

    fn describe(self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
        }
    }

    fn overflow(self, target: AtomicKind) -> CoerceError {
        CoerceError::Overflow {
            value: self.describe(),
            target,
        }
    }

    /// Integer conversion. Fractions round half to even.
    fn to_int<T>(self, target: AtomicKind) -> Result<T, CoerceError>
    where
        T: TryFrom<i128> + TryFrom<u128>,
    {
        let converted = match self {
            Self::Int(v) => T::try_from(v).ok(),
            Self::UInt(v) => T::try_from(v).ok(),
            Self::Float(v) => {
                let rounded = v.round_ties_even();
                if rounded.is_finite() && rounded >= i128::MIN as f64 && rounded < i128::MAX as f64 {
                    T::try_from(rounded as i128).ok()
                } else {
                    None
                }
            }
            Self::Decimal(v) => v.round().to_i128().and_then(|v| T::try_from(v).ok()),
        };
        converted.ok_or_else(|| self.overflow(target))
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => v,
            Self::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn to_f32(self) -> Result<f32, CoerceError> {
        let wide = self.to_f64();
        if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
            return Err(self.overflow(AtomicKind::F32));
        }
        Ok(wide as f32)
    }

    fn to_decimal(self) -> Result<Decimal, CoerceError> {
        let converted = match self {
            Self::Int(v) => Decimal::from_i128(v),
            Self::UInt(v) => Decimal::from_u128(v),
            Self::Float(v) => Decimal::from_f64(v),
            Self::Decimal(v) => Some(v),
        };
        converted.ok_or_else(|| self.overflow(AtomicKind::Decimal))
    }

    fn to_bool(self) -> bool {
        match self {
            Self::Int(v) => v != 0,
            Self::UInt(v) => v != 0,
            Self::Float(v) => v != 0.0,
            Self::Decimal(v) => !v.is_zero(),
        }
    }

    fn to_char(self) -> Result<char, CoerceError> {
        let code: u32 = self.to_int(AtomicKind::Char)?;
        char::from_u32(code).ok_or_else(|| self.overflow(AtomicKind::Char))
    }

    fn into_kind(self, from: AtomicKind, target: AtomicKind) -> Result<AtomicValue, CoerceError> {
        Ok(match target {
            AtomicKind::Bool => AtomicValue::Bool(self.to_bool()),
            AtomicKind::Char => AtomicValue::Char(self.to_char()?),
            AtomicKind::I8 => AtomicValue::I8(self.to_int(target)?),
            AtomicKind::I16 => AtomicValue::I16(self.to_int(target)?),
            AtomicKind::I32 => AtomicValue::I32(self.to_int(target)?),
            AtomicKind::I64 => AtomicValue::I64(self.to_int(target)?),
            AtomicKind::I128 => AtomicValue::I128(self.to_int(target)?),
            AtomicKind::Isize => AtomicValue::Isize(self.to_int(target)?),
            AtomicKind::U8 => AtomicValue::U8(self.to_int(target)?),
            AtomicKind::U16 => AtomicValue::U16(self.to_int(target)?),
            AtomicKind::U32 => AtomicValue::U32(self.to_int(target)?),
            AtomicKind::U64 => AtomicValue::U64(self.to_int(target)?),
            AtomicKind::U128 => AtomicValue::U128(self.to_int(target)?),
            AtomicKind::Usize => AtomicValue::Usize(self.to_int(target)?),
            AtomicKind::F32 => AtomicValue::F32(self.to_f32()?),
            AtomicKind::F64 => AtomicValue::F64(self.to_f64()),
            AtomicKind::Decimal => AtomicValue::Decimal(self.to_decimal()?),
            AtomicKind::String => AtomicValue::String(self.describe()),
            _ => return Err(CoerceError::Unsupported { from, to: target }),
        })
    }
}

// -----------------------------------------------------------------------------
// Strings

fn parse_error(text: &str, target: AtomicKind) -> CoerceError {
    CoerceError::Parse {
        value: String::from(text),
        target,
    }
}

fn parse<T: FromStr>(text: &str, target: AtomicKind) -> Result<T, CoerceError> {
    text.trim().parse().map_err(|_| parse_error(text, target))
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_local()))
}

fn parse_str(text: &str, target: AtomicKind) -> Result<AtomicValue, CoerceError> {
    Ok(match target {
        AtomicKind::Bool => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                AtomicValue::Bool(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                AtomicValue::Bool(false)
            } else {
                return Err(parse_error(text, target));
            }
        }
        AtomicKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => AtomicValue::Char(c),
                _ => return Err(parse_error(text, target)),
            }
        }
        AtomicKind::I8 => AtomicValue::I8(parse(text, target)?),
        AtomicKind::I16 => AtomicValue::I16(parse(text, target)?),
        AtomicKind::I32 => AtomicValue::I32(parse(text, target)?),
        AtomicKind::I64 => AtomicValue::I64(parse(text, target)?),
        AtomicKind::I128 => AtomicValue::I128(parse(text, target)?),
        AtomicKind::Isize => AtomicValue::Isize(parse(text, target)?),
        AtomicKind::U8 => AtomicValue::U8(parse(text, target)?),
        AtomicKind::U16 => AtomicValue::U16(parse(text, target)?),
        AtomicKind::U32 => AtomicValue::U32(parse(text, target)?),
        AtomicKind::U64 => AtomicValue::U64(parse(text, target)?),
        AtomicKind::U128 => AtomicValue::U128(parse(text, target)?),
        AtomicKind::Usize => AtomicValue::Usize(parse(text, target)?),
        AtomicKind::F32 => AtomicValue::F32(parse(text, target)?),
        AtomicKind::F64 => AtomicValue::F64(parse(text, target)?),
        AtomicKind::Decimal => {
            let trimmed = text.trim();
            let decimal = Decimal::from_str(trimmed)
                .or_else(|_| Decimal::from_scientific(trimmed))
                .map_err(|_| parse_error(text, target))?;
            AtomicValue::Decimal(decimal)
        }
        AtomicKind::DateTime => {
            AtomicValue::DateTime(parse_date_time(text).ok_or_else(|| parse_error(text, target))?)
        }
        AtomicKind::Date => {
            let date = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                .ok()
                .or_else(|| parse_date_time(text).map(|dt| dt.date()))
                .ok_or_else(|| parse_error(text, target))?;
            AtomicValue::Date(date)
        }
        AtomicKind::String => AtomicValue::String(String::from(text)),
        _ => {
            return Err(CoerceError::Unsupported {
                from: AtomicKind::String,
                to: target,
            });
        }
    })
}

// -----------------------------------------------------------------------------
// Conversion

/// Convert an atomic value into the atomic type `target`.
///
/// The caller has checked that the target kind is convertible and that the
/// value is not already of the target type.
pub(crate) fn convert_atomic(
    value: AtomicValue,
    target: &'static TypeInfo,
) -> Result<AtomicValue, CoerceError> {
    let Some(info) = target.as_atomic() else {
        return Err(CoerceError::NotAtomic {
            ty: target.type_path(),
        });
    };
    let kind = info.kind();
    if info.is_enum() {
        return convert_enum(value, target, info);
    }
    if kind == AtomicKind::String {
        return Ok(AtomicValue::String(value.to_string()));
    }
    let from = value.kind();
    match value {
        AtomicValue::String(text) => parse_str(&text, kind),
        AtomicValue::DateTime(dt) if kind == AtomicKind::Date => Ok(AtomicValue::Date(dt.date())),
        AtomicValue::Date(date) if kind == AtomicKind::DateTime => {
            Ok(AtomicValue::DateTime(date.and_time(NaiveTime::MIN)))
        }
        AtomicValue::DateTimeUtc(dt) => match kind {
            AtomicKind::DateTime => Ok(AtomicValue::DateTime(dt.naive_utc())),
            AtomicKind::Date => Ok(AtomicValue::Date(dt.date_naive())),
            _ => Err(CoerceError::Unsupported { from, to: kind }),
        },
        AtomicValue::DateTimeOffset(dt) => match kind {
            AtomicKind::DateTime => Ok(AtomicValue::DateTime(dt.naive_local())),
            AtomicKind::Date => Ok(AtomicValue::Date(dt.date_naive())),
            _ => Err(CoerceError::Unsupported { from, to: kind }),
        },
        other => match Number::of(&other) {
            Some(number) if kind.is_numeric() || matches!(kind, AtomicKind::Bool | AtomicKind::Char) => {
                number.into_kind(from, kind)
            }
            _ => Err(CoerceError::Unsupported { from, to: kind }),
        },
    }
}

/// Resolve a variant by name, or by discriminant for numeric input.
fn convert_enum(
    value: AtomicValue,
    target: &'static TypeInfo,
    info: &AtomicInfo,
) -> Result<AtomicValue, CoerceError> {
    let ty = target.type_path();
    let unknown = |variant: String| CoerceError::UnknownVariant { ty, variant };
    let variant = match &value {
        AtomicValue::String(text) => {
            let text = text.trim();
            match info.variant(text) {
                Some(variant) => variant,
                None => text
                    .parse::<i64>()
                    .ok()
                    .and_then(|d| info.variant_by_discriminant(d))
                    .ok_or_else(|| unknown(String::from(text)))?,
            }
        }
        AtomicValue::Enum(other) => info
            .variant(other.name())
            .ok_or_else(|| unknown(String::from(other.name())))?,
        other => {
            let number = Number::of(other).ok_or(CoerceError::Unsupported {
                from: other.kind(),
                to: AtomicKind::Enum,
            })?;
            let discriminant: i64 = number.to_int(AtomicKind::I64)?;
            info.variant_by_discriminant(discriminant)
                .ok_or_else(|| unknown(discriminant.to_string()))?
        }
    };
    Ok(AtomicValue::Enum(EnumValue::new(
        target,
        variant.name(),
        variant.discriminant(),
    )))
}
