//! Lenient input parsing shared by the engine and the wire types
//!
//! Review forms are filled in fast, so numeric input follows a single
//! leniency policy: anything that does not parse becomes zero. Every
//! call site goes through [`parse_decimal`] so rounding and separator
//! handling stay consistent.

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

/// Wire format used when serializing timestamps
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a quantity/currency string, returning zero when it cannot be parsed.
///
/// Accepts `.` or `,` as the decimal separator. When both appear, the
/// last one is the decimal separator and the other is a thousands
/// separator (`1.234,56` and `1,234.56` both give `1234.56`).
pub fn parse_decimal(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (Some(_), None) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or_else(|_| {
            tracing::debug!(raw = %raw, "Unparsable numeric input, coercing to 0");
            Decimal::ZERO
        })
}

/// Convert a JSON float to `Decimal`, zero for NaN/infinite values.
#[inline]
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Parse a wall-clock timestamp from a form or backend field.
///
/// Empty or unparsable input gives `None`. RFC 3339 values keep their
/// local wall-clock time and drop the offset.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Serde adapters for lenient decimals (number, numeric string, null or missing → value or 0)
///
/// Serialization always writes a JSON number.
pub mod lenient_decimal {
    use super::{decimal_from_f64, parse_decimal};
    use rust_decimal::Decimal;
    use serde::Serializer;
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct LenientDecimalVisitor;

    impl<'de> Visitor<'de> for LenientDecimalVisitor {
        type Value = Option<Decimal>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(decimal_from_f64(v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            if v.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(parse_decimal(v)))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(LenientDecimalVisitor)
        }
    }

    /// Required decimal; null/missing/garbage become zero
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(deserializer
            .deserialize_any(LenientDecimalVisitor)?
            .unwrap_or_default())
    }

    /// Nullable decimal; null/missing/empty string stay `None`
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientDecimalVisitor)
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn serialize_option<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float_option::serialize(value, serializer)
    }
}

/// Serde adapter for `Option<NaiveDateTime>` using [`parse_datetime`]
pub mod lenient_datetime {
    use super::{DATETIME_FORMAT, parse_datetime};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_datetime))
    }
}
