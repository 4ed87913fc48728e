//! Displacement distance bands
//!
//! Upstream data uses a loose vocabulary for the distance band
//! ("até 50km", "acima de 100 km", "ate_100km", ...). Everything is
//! funnelled through [`KmOption::normalize`] so the rest of the system
//! only sees the four canonical values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical distance band of a displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KmOption {
    /// No travel
    #[default]
    None,
    /// Up to 50 km
    UpTo50,
    /// Up to 100 km
    UpTo100,
    /// Above 100 km, billed per km
    Above100,
}

type Predicate = fn(&str) -> bool;

/// Normalization rules, first match wins.
///
/// "Above 100" must be tested before "up to 100": "acima de 100km"
/// contains "100" too.
const NORMALIZATION_RULES: &[(Predicate, KmOption)] = &[
    (is_no_displacement, KmOption::None),
    (is_above_100, KmOption::Above100),
    (mentions_100, KmOption::UpTo100),
    (mentions_50, KmOption::UpTo50),
];

fn is_no_displacement(s: &str) -> bool {
    s.is_empty()
        || s == "0"
        || s == "none"
        || s.starts_with("sem")
        || s.starts_with("nenhum")
}

fn mentions_100(s: &str) -> bool {
    s.contains("100")
}

fn mentions_50(s: &str) -> bool {
    s.contains("50")
}

fn is_above_100(s: &str) -> bool {
    ["acima", "maior", "mais de", ">", "above"]
        .iter()
        .any(|needle| s.contains(needle))
}

impl KmOption {
    /// All canonical options in ascending distance order
    pub const ALL: [KmOption; 4] = [
        KmOption::None,
        KmOption::UpTo50,
        KmOption::UpTo100,
        KmOption::Above100,
    ];

    /// Map any upstream spelling onto a canonical option.
    ///
    /// Unknown text falls back to [`KmOption::None`].
    pub fn normalize(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        NORMALIZATION_RULES
            .iter()
            .find(|(matches, _)| matches(&lowered))
            .map(|(_, option)| *option)
            .unwrap_or(KmOption::None)
    }

    /// Canonical wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            KmOption::None => "sem_deslocamento",
            KmOption::UpTo50 => "ate_50km",
            KmOption::UpTo100 => "ate_100km",
            KmOption::Above100 => "acima_100km",
        }
    }
}

impl fmt::Display for KmOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for KmOption {
    fn from(raw: &str) -> Self {
        KmOption::normalize(raw)
    }
}

impl Serialize for KmOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KmOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(KmOption::normalize).unwrap_or_default())
    }
}
